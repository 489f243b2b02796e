//! Background workers for the runtime.

/// Catalog request execution with in-flight de-duplication.
pub mod fetch;

pub use fetch::spawn_fetch_worker;
