//! Transient vs persisted entity state
//!
//! A record is either a draft that has never been stored, or a value
//! loaded from (or written to) storage and carrying its row id. Repository
//! `save` methods branch on this tag: drafts are inserted, persisted
//! values are updated in place.

/// Storage state of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity<D, P> {
    /// Not yet stored; no id assigned.
    Transient(D),
    /// Backed by a row with a storage-assigned id.
    Persisted(P),
}

impl<D, P> Entity<D, P> {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}
