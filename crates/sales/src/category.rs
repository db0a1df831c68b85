//! Category configuration.
//!
//! The category set is data, not a compiled-in enum: deployments have
//! shipped with different sets, so the closed set a sale must belong to is
//! loaded at startup and passed to the validation path.

use serde::{Deserialize, Serialize};

use ventra_core::DomainError;

/// One sale category plus the display metadata clients render with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Key stored on sale records.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Hex color used by the proportional chart.
    pub color: String,
}

impl CategoryDef {
    pub fn new(key: &str, color: &str) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
            color: color.to_string(),
        }
    }
}

/// The closed set of categories sale records may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<CategoryDef>);

impl CategorySet {
    /// Build a set from explicit definitions. Keys must be unique and the
    /// set non-empty.
    pub fn new(defs: Vec<CategoryDef>) -> Result<Self, DomainError> {
        if defs.is_empty() {
            return Err(DomainError::validation("category set must not be empty"));
        }
        for (i, def) in defs.iter().enumerate() {
            if def.key.trim().is_empty() {
                return Err(DomainError::validation("category key must not be empty"));
            }
            if defs[..i].iter().any(|d| d.key == def.key) {
                return Err(DomainError::validation(format!(
                    "duplicate category key: {}",
                    def.key
                )));
            }
        }
        Ok(Self(defs))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|d| d.key == key)
    }

    pub fn defs(&self) -> &[CategoryDef] {
        &self.0
    }
}

impl Default for CategorySet {
    /// Built-in line-up with its chart colors.
    fn default() -> Self {
        Self(vec![
            CategoryDef::new("Formation", "#6366F1"),
            CategoryDef::new("Ebook", "#A855F7"),
            CategoryDef::new("Coaching", "#10B981"),
            CategoryDef::new("Service", "#F59E0B"),
        ])
    }
}
