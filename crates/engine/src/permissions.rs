//! Role capability flags.
//!
//! A role carries named categories of togglable permission flags. The gate
//! is independent of the contract domain: callers pass the active role
//! explicitly instead of reading it from ambient session state.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlag {
    pub id: String,
    pub enabled: bool,
}

/// A named, ordered group of permission flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCategory {
    pub id: String,
    pub name: String,
    pub permissions: Vec<PermissionFlag>,
}

impl PermissionCategory {
    fn all_enabled(&self) -> bool {
        self.permissions.iter().all(|flag| flag.enabled)
    }
}

/// A role: its permission set is the union of enabled flag ids across its
/// categories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub categories: Vec<PermissionCategory>,
}

impl Role {
    /// Returns `true` iff `permission_id` is enabled in this role.
    #[must_use]
    pub fn is_allowed(&self, permission_id: &str) -> bool {
        self.categories.iter().any(|category| {
            category
                .permissions
                .iter()
                .any(|flag| flag.id == permission_id && flag.enabled)
        })
    }

    /// Flips a whole category at once and returns the updated role.
    ///
    /// If every flag in the category is enabled, all of them are disabled;
    /// **any** other state enables all of them. This is deliberately
    /// asymmetric: a partially-enabled category flips to all-enabled, never
    /// to all-disabled.
    pub fn toggle_category(&self, category_id: &str) -> ResultEngine<Role> {
        let mut role = self.clone();
        let category = role
            .categories
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or_else(|| EngineError::KeyNotFound(category_id.to_string()))?;

        let enable = !category.all_enabled();
        for flag in &mut category.permissions {
            flag.enabled = enable;
        }

        Ok(role)
    }
}
