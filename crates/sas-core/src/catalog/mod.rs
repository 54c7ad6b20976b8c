//! # Built-in Template Catalog
//!
//! Hand-authored renderings of the national standards the service ships
//! with. The data lives in one submodule per standard family:
//!
//! | Module        | Template id(s)                    | Standard |
//! |---------------|-----------------------------------|----------|
//! | [`dsmm`]      | `dsmm`                            | GB/T 37988-2019 |
//! | [`djcp`]      | `djcp`                            | GB/T 22239-2019 |
//! | [`grxxb`]     | `grxxb`                           | GB/T 35273-2020 |
//! | [`djcp_data`] | `djcp_data_level1`, `djcp_data`   | GA/T 2380-2026 |

pub mod djcp;
pub mod djcp_data;
pub mod dsmm;
pub mod grxxb;

use crate::error::ValidationError;
use crate::template::{ControlItem, Dimension, Template, DEFAULT_MAX_SCORE};

/// Every built-in template, in catalog order.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        dsmm::template(),
        djcp::template(),
        grxxb::template(),
        djcp_data::level1_template(),
        djcp_data::level3_template(),
    ]
}

fn dimension(id: &str, name: &str, weight: f64) -> Dimension {
    Dimension {
        id: id.to_string(),
        name: name.to_string(),
        weight,
    }
}

fn item(id: &str, dimension: &str, level: &str, content: &str) -> ControlItem {
    ControlItem {
        id: id.to_string(),
        dimension: dimension.to_string(),
        level: level.to_string(),
        content: content.to_string(),
        max_score: DEFAULT_MAX_SCORE,
    }
}

/// Ordered, id-addressable set of templates.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Build a catalog, validating every template and rejecting duplicate ids.
    pub fn new(templates: Vec<Template>) -> Result<Self, ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for template in &templates {
            template.validate()?;
            if !seen.insert(template.id.clone()) {
                return Err(ValidationError::InvalidTemplate {
                    template: template.id.clone(),
                    reason: "declared more than once in catalog".to_string(),
                });
            }
        }
        Ok(Self { templates })
    }

    /// The catalog of built-in templates.
    pub fn builtin() -> Result<Self, ValidationError> {
        Self::new(builtin_templates())
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Look up a template by id, failing with [`ValidationError::UnknownTemplate`].
    pub fn require(&self, id: &str) -> Result<&Template, ValidationError> {
        self.get(id)
            .ok_or_else(|| ValidationError::UnknownTemplate(id.to_string()))
    }

    /// All templates in catalog order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
