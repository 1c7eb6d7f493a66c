//! Two-pass discovery: helpers first, then controllers.
//!
//! The loader walks the configured tree twice over the same scan. Pass 1
//! loads every helper unit so anything a controller depends on is already in
//! the host runtime; pass 2 loads each controller and records the handle the
//! host returns, immediately, under the file's stem. Any load or traversal
//! failure aborts the rest of the run; callers wanting resilience wrap the
//! whole call.

use crate::classify::{Classification, classify};
use crate::registry::{Registry, TemplateKey};
use crate::scan::{FileEntry, Scanner};
use crate::DiscoveryConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// A loaded controller: the unit bound to a template key.
///
/// `data()` is the fixed no-argument contract the template layer renders
/// from. The handle is created by the host at load time and owned by the
/// registry entry it is recorded under.
pub trait Controller {
    fn data(&self) -> BTreeMap<String, Value>;
}

/// The host's load primitive.
///
/// `load_controller` returns the handle the unit registered; identity travels
/// with the load instead of being inferred from runtime-global state, so the
/// loader never has to ask "what was declared last".
pub trait SourceHost {
    /// One-time, idempotent load of a shared helper unit.
    fn load_helper(&mut self, entry: &FileEntry) -> Result<()>;

    /// Load a controller unit and hand back its registered handle.
    fn load_controller(&mut self, entry: &FileEntry) -> Result<Box<dyn Controller>>;
}

/// What to do when two controller files share a stem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Last-write-wins, logged as a warning.
    #[default]
    Overwrite,
    /// Fail discovery on the duplicate.
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderOptions {
    pub collision_policy: CollisionPolicy,
}

/// Run discovery over the configured scan root.
///
/// A missing root is a no-op: the registry comes back empty and no loads are
/// attempted. Everything else is fail-fast.
pub fn discover(
    config: &DiscoveryConfig,
    host: &mut dyn SourceHost,
    options: &LoaderOptions,
) -> Result<Registry> {
    let root = config.scan_root();
    if !root.is_dir() {
        debug!(root = %root.display(), "scan root missing, skipping discovery");
        return Ok(Registry::default());
    }

    let scanner = Scanner::new(&root);
    load_helpers(&scanner, host)?;
    load_controllers(&scanner, host, options)
}

/// Pass 1: every loadable file without the controller directive.
fn load_helpers(scanner: &Scanner, host: &mut dyn SourceHost) -> Result<()> {
    for entry in scanner.entries() {
        let entry = entry?;
        if classify(&entry)? != Classification::Helper {
            continue;
        }
        debug!(path = %entry.path.display(), "loading helper");
        host.load_helper(&entry)
            .with_context(|| format!("loading helper {}", entry.path.display()))?;
    }
    Ok(())
}

/// Pass 2: load each controller and record its handle right away.
///
/// Recording is coupled to the load so the registry reflects scan order even
/// under the overwrite policy.
fn load_controllers(
    scanner: &Scanner,
    host: &mut dyn SourceHost,
    options: &LoaderOptions,
) -> Result<Registry> {
    let mut registry = Registry::default();
    for entry in scanner.entries() {
        let entry = entry?;
        if classify(&entry)? != Classification::Controller {
            continue;
        }
        debug!(path = %entry.path.display(), key = %entry.stem, "loading controller");
        let controller = host
            .load_controller(&entry)
            .with_context(|| format!("loading controller {}", entry.path.display()))?;
        registry.insert(
            TemplateKey(entry.stem.clone()),
            controller,
            options.collision_policy,
        )?;
    }
    Ok(registry)
}
