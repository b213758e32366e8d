//! Customer inspection commands

use anyhow::Result;
use clap::{Parser, Subcommand};

use lunchly_server::db::{CustomerRepo, ReservationRepo};
use lunchly_server::models::{Customer, CustomerId};

use super::open_database;
use crate::config::LunchlyConfig;

#[derive(Parser, Debug)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    /// List customers, optionally filtered by name
    List {
        /// Case-insensitive text to look for in the full name
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Show the ten customers with the most reservations
    Top,
    /// Show one customer and their reservations
    Show {
        /// Customer ID
        id: CustomerId,
    },
}

pub async fn run_customers(args: CustomersArgs, config: &LunchlyConfig) -> Result<()> {
    let pool = open_database(config).await?;
    let customers = CustomerRepo::new(&pool);

    match args.command {
        CustomersCommand::List { search } => {
            let found = customers.search(search.as_deref()).await?;
            if found.is_empty() {
                println!("No customers found.");
            }
            for customer in &found {
                println!("{}", customer_line(customer));
            }
        }
        CustomersCommand::Top => {
            let ranked = customers.best_customers().await?;
            if ranked.is_empty() {
                println!("No reservations yet.");
            }
            for (rank, entry) in ranked.iter().enumerate() {
                println!(
                    "{:>2}. {}  ({} reservations)",
                    rank + 1,
                    customer_line(&entry.customer),
                    entry.reservation_count
                );
            }
        }
        CustomersCommand::Show { id } => {
            let customer = customers.get(id).await?;
            let reservations = customer.reservations(&ReservationRepo::new(&pool)).await?;

            println!("{}", customer_line(&customer));
            if let Some(notes) = &customer.notes {
                println!("      notes: {}", notes);
            }
            if reservations.is_empty() {
                println!("      no reservations");
            }
            for r in &reservations {
                println!(
                    "      #{} {}  {} guests{}",
                    r.id(),
                    r.start_at.format("%Y-%m-%d %H:%M"),
                    r.num_guests.get(),
                    r.notes
                        .as_deref()
                        .map(|n| format!("  ({})", n))
                        .unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn customer_line(customer: &Customer) -> String {
    let phone = customer
        .phone
        .as_ref()
        .map(|p| p.as_str())
        .unwrap_or("-");
    format!("{:>4}  {:<30} {}", customer.id().get(), customer.full_name(), phone)
}
