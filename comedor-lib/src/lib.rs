//! Client-side table engine for the school meal-service dashboards.
//!
//! Rows flow through search and filters, then sort, then pagination, and
//! end up as a [`table::TableView`] that a front end draws.
//! [`render::render_text`] draws it for a terminal.

pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod render;
pub mod schedule;
pub mod search;
pub mod selection;
pub mod session;
pub mod sort;
pub mod table;

pub use table::DataTable;
