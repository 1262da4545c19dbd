//! Bean domain types.

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// A coffee bean product that shots are pulled with.
///
/// Beans are append-only: once saved they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bean {
    /// Store-assigned identifier.
    pub id: i64,
    pub name: String,
    pub roaster: String,
}

impl Bean {
    /// Label used wherever a bean is shown next to a shot, e.g. `"Ethiopia - Onyx"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.roaster)
    }
}

/// Validated data for inserting a new bean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBean {
    pub name: String,
    pub roaster: String,
}

/// Raw bean form values as submitted by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeanInput {
    pub name: String,
    pub roaster: String,
}

impl BeanInput {
    pub fn new(name: impl Into<String>, roaster: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roaster: roaster.into(),
        }
    }

    /// Trim both fields and reject blanks.
    pub fn validate(&self) -> Result<NewBean, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        let roaster = self.roaster.trim();
        if roaster.is_empty() {
            return Err(ValidationError::EmptyField("roaster"));
        }
        Ok(NewBean {
            name: name.to_string(),
            roaster: roaster.to_string(),
        })
    }
}
