//! Customer repository against a real (in-memory) SQLite database

mod common;

use common::{add_customer, add_reservation, test_pool};
use lunchly_server::db::{CustomerRepo, DbError};
use lunchly_server::models::{CustomerDraft, CustomerId};

fn names(customers: &[lunchly_server::models::Customer]) -> Vec<String> {
    customers.iter().map(|c| c.full_name()).collect()
}

#[tokio::test]
async fn save_draft_assigns_id() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let draft = CustomerDraft::new("Jane", "Smith", Some("555-0100"), Some("likes the patio"))
        .unwrap();
    let saved = repo.save(draft.clone()).await.unwrap();
    assert!(saved.id().get() > 0);

    let loaded = repo.get(saved.id()).await.unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.first_name, draft.first_name);
    assert_eq!(loaded.last_name, draft.last_name);
    assert_eq!(loaded.phone, draft.phone);
    assert_eq!(loaded.notes, draft.notes);
}

#[tokio::test]
async fn optional_fields_round_trip_as_none() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let saved = repo
        .save(CustomerDraft::new("Ann", "Lee", Some(""), None).unwrap())
        .await
        .unwrap();
    let loaded = repo.get(saved.id()).await.unwrap();

    assert_eq!(loaded.phone, None);
    assert_eq!(loaded.notes, None);
}

#[tokio::test]
async fn save_persisted_updates_in_place() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let mut customer = add_customer(&pool, "Jane", "Smith").await;
    let id = customer.id();

    customer.apply(CustomerDraft::new("Janet", "Smythe", Some("555-0199"), Some("vip")).unwrap());
    let saved = repo.save(customer).await.unwrap();
    assert_eq!(saved.id(), id);

    let loaded = repo.get(id).await.unwrap();
    assert_eq!(loaded.full_name(), "Janet Smythe");
    assert_eq!(loaded.phone.as_ref().map(|p| p.as_str()), Some("555-0199"));
    assert_eq!(loaded.notes.as_deref(), Some("vip"));

    // No new row was created
    assert_eq!(repo.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unchanged_resave_is_a_no_op() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let saved = repo
        .save(CustomerDraft::new("Jane", "Smith", Some("555-0100"), Some("allergic to nuts")).unwrap())
        .await
        .unwrap();
    let first = repo.get(saved.id()).await.unwrap();

    repo.save(first.clone()).await.unwrap();
    let second = repo.get(saved.id()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let err = repo.get(CustomerId::new(999).unwrap()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "customer", .. }));
}

#[tokio::test]
async fn update_of_vanished_row_is_not_found() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let customer = add_customer(&pool, "Jane", "Smith").await;
    sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(customer.id().get())
        .execute(&pool)
        .await
        .unwrap();

    let err = repo.save(customer).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "customer", .. }));
}

#[tokio::test]
async fn all_orders_by_last_then_first_name() {
    let pool = test_pool().await;
    add_customer(&pool, "Zoe", "Adams").await;
    add_customer(&pool, "Bob", "Young").await;
    add_customer(&pool, "Amy", "Adams").await;
    add_customer(&pool, "Carl", "Miller").await;

    let all = CustomerRepo::new(&pool).all().await.unwrap();
    assert_eq!(
        names(&all),
        vec!["Amy Adams", "Zoe Adams", "Carl Miller", "Bob Young"]
    );
}

#[tokio::test]
async fn search_matches_full_name_ignoring_case() {
    let pool = test_pool().await;
    add_customer(&pool, "Jane", "Smith").await;
    add_customer(&pool, "John", "Doe").await;
    add_customer(&pool, "Will", "Smithers").await;
    let repo = CustomerRepo::new(&pool);

    let found = repo.search(Some("smith")).await.unwrap();
    assert_eq!(names(&found), vec!["Jane Smith", "Will Smithers"]);

    let found = repo.search(Some("JANE")).await.unwrap();
    assert_eq!(names(&found), vec!["Jane Smith"]);

    // Spans the space between first and last name
    let found = repo.search(Some("n d")).await.unwrap();
    assert_eq!(names(&found), vec!["John Doe"]);

    assert!(repo.search(Some("nobody")).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
    let pool = test_pool().await;
    add_customer(&pool, "Émile", "Zola").await;
    add_customer(&pool, "Ana", "Müller").await;
    add_customer(&pool, "Jane", "Smith").await;
    let repo = CustomerRepo::new(&pool);

    assert_eq!(names(&repo.search(Some("émile")).await.unwrap()), vec!["Émile Zola"]);
    assert_eq!(names(&repo.search(Some("MÜLLER")).await.unwrap()), vec!["Ana Müller"]);
    assert_eq!(names(&repo.search(Some("ÉMILE Z")).await.unwrap()), vec!["Émile Zola"]);
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
    let pool = test_pool().await;
    add_customer(&pool, "Jane", "Smith").await;
    let repo = CustomerRepo::new(&pool);

    assert!(repo.search(Some("%")).await.unwrap().is_empty());
    assert!(repo.search(Some("_")).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_search_is_everything() {
    let pool = test_pool().await;
    add_customer(&pool, "Jane", "Smith").await;
    add_customer(&pool, "John", "Doe").await;
    let repo = CustomerRepo::new(&pool);

    let all = names(&repo.all().await.unwrap());
    assert_eq!(names(&repo.search(None).await.unwrap()), all);
    assert_eq!(names(&repo.search(Some("")).await.unwrap()), all);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn best_customers_empty_without_reservations() {
    let pool = test_pool().await;
    add_customer(&pool, "Jane", "Smith").await;

    let ranked = CustomerRepo::new(&pool).best_customers().await.unwrap();
    assert!(ranked.is_empty());
}

#[tokio::test]
async fn best_customers_ranked_by_count_then_id() {
    let pool = test_pool().await;
    let a = add_customer(&pool, "Ann", "A").await;
    let b = add_customer(&pool, "Ben", "B").await;
    let c = add_customer(&pool, "Cat", "C").await;
    let d = add_customer(&pool, "Dan", "D").await;

    for _ in 0..2 {
        add_reservation(&pool, &a, "2024-06-01 18:00", 2).await;
    }
    for _ in 0..3 {
        add_reservation(&pool, &c, "2024-06-01 19:00", 4).await;
    }
    for _ in 0..2 {
        add_reservation(&pool, &b, "2024-06-02 12:00", 1).await;
    }
    // d has no reservations

    let ranked = CustomerRepo::new(&pool).best_customers().await.unwrap();
    let order: Vec<_> = ranked
        .iter()
        .map(|r| (r.customer.id(), r.reservation_count))
        .collect();

    assert_eq!(order, vec![(c.id(), 3), (a.id(), 2), (b.id(), 2)]);
    assert!(ranked.iter().all(|r| r.customer.id() != d.id()));
}

#[tokio::test]
async fn best_customers_capped_at_ten() {
    let pool = test_pool().await;

    for i in 0..12 {
        let customer = add_customer(&pool, &format!("Guest{i}"), "Regular").await;
        for _ in 0..=(i % 4) {
            add_reservation(&pool, &customer, "2024-07-01 20:00", 2).await;
        }
    }

    let ranked = CustomerRepo::new(&pool).best_customers().await.unwrap();
    assert_eq!(ranked.len(), 10);
    assert!(ranked
        .windows(2)
        .all(|w| w[0].reservation_count >= w[1].reservation_count));
    assert_eq!(ranked[0].reservation_count, 4);
}
