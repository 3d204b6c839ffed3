//! Database access: connection pools and the supervision store seam.

pub mod pools;
pub mod store;

pub use store::{PgSupervisionStore, Record, StoreError, SupervisionStatus, SupervisionStore};
