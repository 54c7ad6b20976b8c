//! # API Route Modules
//!
//! - `templates`: read-only standard template catalog.
//! - `tasks`: assessment task lifecycle and scored results.
//! - `items`: item rating and evidence upload.
//! - `system`: health check and task statistics.

pub mod items;
pub mod system;
pub mod tasks;
pub mod templates;
