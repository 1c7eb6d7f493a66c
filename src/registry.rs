//! Template-key → controller registry.
//!
//! The registry is populated once by the loader during discovery and is
//! read-only afterwards; `insert` stays crate-private so no ambient mutation
//! path exists. Lookups return `None` instead of erroring; callers surface
//! errors with whatever context referenced the missing key.

use crate::loader::{CollisionPolicy, Controller};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Registry key under which the site-wide fallback controller is recorded.
pub const BASE_KEY: &str = "base";

/// Key a controller is registered under: its file stem, extension stripped.
///
/// Directories never contribute, so `a/page.ctrl` and `b/page.ctrl` produce
/// the same key.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateKey(pub String);

impl TemplateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// In-memory store binding template keys to loaded controllers.
#[derive(Default)]
pub struct Registry {
    controllers: BTreeMap<TemplateKey, Box<dyn Controller>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field(
                "controllers",
                &self.controllers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Registry {
    /// Record a controller under its key, honoring the collision policy.
    ///
    /// Only the loader calls this; the registry has no public mutators.
    pub(crate) fn insert(
        &mut self,
        key: TemplateKey,
        controller: Box<dyn Controller>,
        policy: CollisionPolicy,
    ) -> Result<()> {
        if self.controllers.contains_key(&key) {
            match policy {
                CollisionPolicy::Overwrite => {
                    warn!(key = key.as_str(), "duplicate template key, overwriting");
                }
                CollisionPolicy::Reject => {
                    bail!("duplicate template key '{}'", key.as_str());
                }
            }
        }
        self.controllers.insert(key, controller);
        Ok(())
    }

    /// Fetch the controller bound to a key, if any.
    pub fn get(&self, key: &str) -> Option<&dyn Controller> {
        self.controllers
            .get(&TemplateKey(key.to_string()))
            .map(|boxed| boxed.as_ref())
    }

    /// Data from the `"base"` fallback controller.
    ///
    /// Missing base is not an error; the host merges an empty map.
    pub fn base_data(&self) -> BTreeMap<String, Value> {
        match self.get(BASE_KEY) {
            Some(controller) => controller.data(),
            None => BTreeMap::new(),
        }
    }

    /// Read-only view of every binding.
    pub fn all(&self) -> &BTreeMap<TemplateKey, Box<dyn Controller>> {
        &self.controllers
    }

    /// Iterates registered keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &TemplateKey> {
        self.controllers.keys()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedData(BTreeMap<String, Value>);

    impl Controller for FixedData {
        fn data(&self) -> BTreeMap<String, Value> {
            self.0.clone()
        }
    }

    fn controller(pairs: &[(&str, Value)]) -> Box<dyn Controller> {
        Box::new(FixedData(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ))
    }

    #[test]
    fn absent_key_is_none_not_an_error() {
        let registry = Registry::default();
        assert!(registry.get("page").is_none());
    }

    #[test]
    fn base_data_on_empty_registry_is_empty() {
        let registry = Registry::default();
        assert!(registry.base_data().is_empty());
    }

    #[test]
    fn base_data_invokes_the_base_controller() {
        let mut registry = Registry::default();
        registry
            .insert(
                TemplateKey(BASE_KEY.to_string()),
                controller(&[("site", json!("Demo"))]),
                CollisionPolicy::Reject,
            )
            .unwrap();
        let data = registry.base_data();
        assert_eq!(data.get("site"), Some(&json!("Demo")));
    }

    #[test]
    fn overwrite_policy_keeps_the_last_binding() {
        let mut registry = Registry::default();
        let key = TemplateKey("page".to_string());
        registry
            .insert(
                key.clone(),
                controller(&[("v", json!(1))]),
                CollisionPolicy::Overwrite,
            )
            .unwrap();
        registry
            .insert(
                key.clone(),
                controller(&[("v", json!(2))]),
                CollisionPolicy::Overwrite,
            )
            .unwrap();
        assert_eq!(registry.len(), 1);
        let data = registry.get("page").unwrap().data();
        assert_eq!(data.get("v"), Some(&json!(2)));
    }

    #[test]
    fn reject_policy_fails_on_duplicates() {
        let mut registry = Registry::default();
        let key = TemplateKey("page".to_string());
        registry
            .insert(key.clone(), controller(&[]), CollisionPolicy::Reject)
            .unwrap();
        let err = registry
            .insert(key, controller(&[]), CollisionPolicy::Reject)
            .expect_err("duplicate key should fail");
        assert!(err.to_string().contains("page"));
    }
}
