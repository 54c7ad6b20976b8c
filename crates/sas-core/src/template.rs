//! # Standard Templates
//!
//! A template renders one national standard as an ordered list of weighted
//! dimensions and an ordered list of control items, each item belonging to
//! exactly one dimension. Templates are immutable reference data: tasks copy
//! item metadata out of them at creation time and never write back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default maximum score of a control item.
pub const DEFAULT_MAX_SCORE: u32 = 5;

/// A weighted grouping of control items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: String,
    pub name: String,
    /// Relative weight of this dimension in the weighted overall score.
    pub weight: f64,
}

/// A single requirement to be rated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlItem {
    pub id: String,
    /// Id of the owning [`Dimension`].
    pub dimension: String,
    /// Grade or protection level the requirement belongs to, as written in
    /// the standard ("1", "二级", "基础", ...).
    pub level: String,
    /// Requirement text.
    pub content: String,
    pub max_score: u32,
}

/// A regulatory standard rendered as dimensions and control items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Standard number, e.g. `GB/T 22239-2019`.
    pub standard_no: String,
    pub version: String,
    pub description: String,
    pub dimensions: Vec<Dimension>,
    pub items: Vec<ControlItem>,
}

impl Template {
    /// Look up a dimension by id.
    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    /// Control items belonging to `dimension_id`, in template order.
    pub fn items_in<'a>(&'a self, dimension_id: &'a str) -> impl Iterator<Item = &'a ControlItem> {
        self.items.iter().filter(move |i| i.dimension == dimension_id)
    }

    /// Number of control items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Listing projection of this template.
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            standard_no: self.standard_no.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            dimensions: self.dimensions.clone(),
            item_count: self.items.len(),
        }
    }

    /// Check the template is internally consistent.
    ///
    /// Ids must be non-empty and unique, every item must reference a declared
    /// dimension, maxima must be positive, and weights non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidTemplate {
            template: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyField("template id"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        if self.dimensions.is_empty() {
            return Err(invalid("no dimensions declared".to_string()));
        }

        let mut dimension_ids = HashSet::new();
        for dim in &self.dimensions {
            if dim.id.trim().is_empty() {
                return Err(invalid("dimension with empty id".to_string()));
            }
            if !dimension_ids.insert(dim.id.as_str()) {
                return Err(invalid(format!("duplicate dimension id {}", dim.id)));
            }
            if dim.weight.is_nan() || dim.weight < 0.0 {
                return Err(invalid(format!("dimension {} has negative weight", dim.id)));
            }
        }

        let mut item_ids = HashSet::new();
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(invalid("control item with empty id".to_string()));
            }
            if !item_ids.insert(item.id.as_str()) {
                return Err(invalid(format!("duplicate item id {}", item.id)));
            }
            if !dimension_ids.contains(item.dimension.as_str()) {
                return Err(invalid(format!(
                    "item {} references undeclared dimension {}",
                    item.id, item.dimension
                )));
            }
            if item.max_score == 0 {
                return Err(invalid(format!("item {} has zero max_score", item.id)));
            }
        }

        Ok(())
    }
}

/// Template listing entry: everything but the item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub standard_no: String,
    pub version: String,
    pub description: String,
    pub dimensions: Vec<Dimension>,
    pub item_count: usize,
}
