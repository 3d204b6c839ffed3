//! # Planta Core
//!
//! Backend services for a palm-oil processing plant's internal management
//! system: gate access, truck weighing, agronomy field logging, laboratory
//! measurements, logistics trips, training records, and user administration.
//!
//! Operator data entry lands in a **staging** database; a supervisor's
//! decision promotes each record to the **main** database (approval) or
//! marks it terminally rejected. The two databases are independent, so the
//! promotion is a best-effort step sequence, never a transaction: every
//! sub-step is fault-isolated and every outcome (row counts, warnings) is
//! reported back so operators can reconcile partial failures by hand.
//!
//! ## Architecture
//!
//! - [`registry`] - static per-module table specs and identifier allow-lists
//! - [`database`] - the [`database::store::SupervisionStore`] seam and its
//!   Postgres implementation; one store handle per database
//! - [`reconciliation`] - the approve/reject step sequence and its outcome
//!   reporting
//! - [`query`] - list/filter/sort/pagination building for the per-module
//!   listing endpoints
//! - [`web`] - Axum routes, handlers, and shared application state
//!
//! Handlers never touch a global connection: the store handles live in
//! [`web::state::AppState`] and are passed down explicitly, which is also
//! what makes the reconciliation engine testable against in-memory stores.

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod query;
pub mod reconciliation;
pub mod registry;
pub mod web;

pub use config::PlantaConfig;
pub use error::{PlantaError, Result};
