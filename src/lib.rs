//! Convention-based controller discovery for a templating host.
//!
//! The crate scans a controller tree, classifies each file as a shared helper
//! or a template-bound controller, loads helpers before controllers through
//! the host's [`SourceHost`] seam, and hands back a [`Registry`] mapping
//! template keys to controllers. [`hierarchy`] derives body classes from the
//! host's template-resolution order and is independent of discovery; the two
//! share only the naming convention.

use std::path::{Path, PathBuf};

pub mod classify;
pub mod hierarchy;
pub mod loader;
pub mod registry;
pub mod scan;

pub use classify::{CONTROLLER_DIRECTIVE, Classification, SOURCE_EXTENSION, classify, is_loadable};
pub use hierarchy::{
    BASE_CLASS, COMPILED_MARKER, FALLBACK_TEMPLATE, append_body_classes, body_classes,
};
pub use loader::{CollisionPolicy, Controller, LoaderOptions, SourceHost, discover};
pub use registry::{BASE_KEY, Registry, TemplateKey};
pub use scan::{FileEntry, Scanner};

/// Default controller subpath under the host's base directory.
pub const DEFAULT_CONTROLLER_DIR: &str = "src/controllers";

/// Where discovery looks for controller sources.
///
/// The default root is a fixed subpath under the host's base directory; a
/// path override replaces it entirely. Resolution order mirrors the rest of
/// the crate: explicit configuration first, convention as the fallback.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    base_dir: PathBuf,
    path_override: Option<PathBuf>,
}

impl DiscoveryConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            path_override: None,
        }
    }

    /// Replace the default scan root with an explicit path.
    pub fn with_path_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_override = Some(path.into());
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the scan root: the override if set, else the conventional
    /// subpath under the base directory.
    pub fn scan_root(&self) -> PathBuf {
        match &self.path_override {
            Some(path) => path.clone(),
            None => self.base_dir.join(DEFAULT_CONTROLLER_DIR),
        }
    }
}
