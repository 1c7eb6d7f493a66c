//! Classification of scanned files into helpers and controllers.
//!
//! Eligibility is an exact extension match; the controller decision comes from
//! an explicit `@controller` directive read line-by-line, so a mention inside
//! a comment never classifies a file. Classification is computed fresh per
//! entry and never cached.

use crate::scan::FileEntry;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

/// The single recognized source extension, matched case-sensitively.
pub const SOURCE_EXTENSION: &str = "ctrl";

/// Directive a source file declares to bind itself to a template key.
pub const CONTROLLER_DIRECTIVE: &str = "@controller";

const COMMENT_PREFIX: char = '#';

/// What a scanned file turned out to be.
///
/// `Helper` units load in pass 1 with no registry key; `Controller` units load
/// in pass 2 and bind to their file stem. `Ineligible` files are skipped in
/// both passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Ineligible,
    Helper,
    Controller,
}

/// True iff the entry carries the recognized source extension.
pub fn is_loadable(entry: &FileEntry) -> bool {
    entry.extension == SOURCE_EXTENSION
}

/// Classify an entry from its extension and raw content.
///
/// Content is only read for loadable files. Read failures propagate; a file
/// that cannot be read cannot be loaded either, and discovery is fail-fast.
pub fn classify(entry: &FileEntry) -> Result<Classification> {
    if !is_loadable(entry) {
        return Ok(Classification::Ineligible);
    }
    let contents = fs::read_to_string(&entry.path)
        .with_context(|| format!("reading {}", entry.path.display()))?;
    if declares_controller(&contents) {
        Ok(Classification::Controller)
    } else {
        Ok(Classification::Helper)
    }
}

/// Line-wise directive detection.
///
/// A line declares the directive when its first token is `@controller`;
/// comment lines are skipped entirely.
fn declares_controller(contents: &str) -> bool {
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        match trimmed.split_whitespace().next() {
            Some(token) if token == CONTROLLER_DIRECTIVE => return true,
            _ => continue,
        }
    }
    false
}
