//! # sas-core: Domain Types for the Standards Self-Assessment Service
//!
//! This crate holds everything about a compliance self-assessment that does
//! not touch a database or a socket: the rating vocabulary, the task
//! lifecycle, the shape of a standard template, the built-in catalog of
//! national standards, and the scoring routine that turns a list of rated
//! items into an [`AssessmentResult`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sas-*` crates.
//! - No I/O. Every function is deterministic over its inputs.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Wire identifiers (`compliant`, `in_progress`, ...) are produced by
//!   `as_str()` and parsed by `FromStr`. Nothing else spells them out.

pub mod catalog;
pub mod error;
pub mod rating;
pub mod scoring;
pub mod status;
pub mod template;

// Re-export primary types for ergonomic imports.
pub use catalog::{builtin_templates, TemplateCatalog};
pub use error::{SasError, ValidationError};
pub use rating::Rating;
pub use scoring::{
    compliance_rate, evaluate, item_score, AssessmentResult, DimensionScore, RatingDistribution,
    ScoredItem,
};
pub use status::TaskStatus;
pub use template::{ControlItem, Dimension, Template, TemplateSummary, DEFAULT_MAX_SCORE};
