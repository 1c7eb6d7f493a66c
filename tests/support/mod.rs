use anyhow::{Context, Result};
use bindery::{CONTROLLER_DIRECTIVE, Controller, FileEntry, SourceHost};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Minimal host for the line-oriented fixture format.
///
/// A controller file carries the directive plus `key value` lines; `data()`
/// returns those pairs as strings. Helper loads are recorded by stem so tests
/// can assert what reached the host runtime.
#[derive(Default)]
pub struct LineHost {
    pub helper_stems: Vec<String>,
}

pub struct LineController {
    data: BTreeMap<String, Value>,
}

impl Controller for LineController {
    fn data(&self) -> BTreeMap<String, Value> {
        self.data.clone()
    }
}

impl SourceHost for LineHost {
    fn load_helper(&mut self, entry: &FileEntry) -> Result<()> {
        self.helper_stems.push(entry.stem.clone());
        Ok(())
    }

    fn load_controller(&mut self, entry: &FileEntry) -> Result<Box<dyn Controller>> {
        let contents = fs::read_to_string(&entry.path)
            .with_context(|| format!("reading {}", entry.path.display()))?;
        let mut data = BTreeMap::new();
        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut parts = trimmed.splitn(2, char::is_whitespace);
            let key = parts.next().unwrap_or_default();
            if key == CONTROLLER_DIRECTIVE {
                continue;
            }
            let value = parts.next().unwrap_or_default().trim();
            data.insert(key.to_string(), json!(value));
        }
        Ok(Box::new(LineController { data }))
    }
}

/// Write a fixture file under the root, creating parent directories.
pub fn write_fixture(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("fixture directories");
    }
    fs::write(path, contents).expect("fixture file");
}
