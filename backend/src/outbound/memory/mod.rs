//! In-process adapters for every driven storage port.
//!
//! [`InMemoryStore`] backs debug builds started without `DATABASE_URL` and
//! the HTTP test suites. It honours the same uniqueness and reference rules
//! as the PostgreSQL adapters; data is lost when the process exits.

mod store;

pub use store::InMemoryStore;
