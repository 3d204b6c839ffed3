//! Listing query support for the per-module table endpoints.

pub mod list;

pub use list::{ListPage, ListQuery};
