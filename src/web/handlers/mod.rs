//! Request handlers, grouped by endpoint family.

pub mod health;
pub mod listing;
pub mod modules;
pub mod supervision;
