//! Reconciliation settings.

use serde::{Deserialize, Serialize};

/// What to do with schema nodes that declare no protected attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionPolicy {
    /// Nothing is protected; once synced, content is kept as-is.
    #[default]
    TrustContent,
    /// The identity attribute (`"<component>Name"`) is protected implicitly
    /// whenever the schema node carries it.
    RequireIdentity,
}

/// Naming conventions and merge policy used by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Joins a parent key and an inner name into a child key.
    pub key_separator: String,
    /// Suffix of the per-component protected list, e.g. `inputDisabledOptions`.
    pub protected_suffix: String,
    /// Suffix of the identity attribute, e.g. `inputName`.
    pub identity_suffix: String,
    pub protection: ProtectionPolicy,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            key_separator: "---".to_string(),
            protected_suffix: "DisabledOptions".to_string(),
            identity_suffix: "Name".to_string(),
            protection: ProtectionPolicy::default(),
        }
    }
}

impl ReconcileConfig {
    /// `"<component>Name"`.
    pub fn identity_attr(&self, component: &str) -> String {
        format!("{component}{}", self.identity_suffix)
    }

    /// `"<component>DisabledOptions"`.
    pub fn protected_list_attr(&self, component: &str) -> String {
        format!("{component}{}", self.protected_suffix)
    }

    /// `"<parentKey>---<innerName>"`.
    pub fn child_key(&self, parent_key: &str, inner_name: &str) -> String {
        format!("{parent_key}{}{inner_name}", self.key_separator)
    }

    /// Turns a declared protected entry into a fully-qualified attribute key.
    ///
    /// Entries already carrying the component prefix followed by an upper-case
    /// letter are kept; others get the prefix and an upper-cased first letter
    /// (`"type"` -> `"inputType"`, `"optional"` -> `"optionOptional"`).
    pub fn qualify(&self, component: &str, entry: &str) -> Option<String> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        if entry
            .strip_prefix(component)
            .is_some_and(|rest| rest.starts_with(char::is_uppercase))
        {
            return Some(entry.to_string());
        }
        let mut chars = entry.chars();
        let first = chars.next()?;
        Some(format!("{component}{}{}", first.to_uppercase(), chars.as_str()))
    }
}
