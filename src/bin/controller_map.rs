//! Prints the discovery map for a controller tree as NDJSON.
//!
//! One JSON object per discovered file: its path, classification, and (for
//! controllers) the template key it would bind to. The tool only scans and
//! classifies; it never drives a host load, so it is safe to point at any
//! tree.

use anyhow::{Context, Result, bail};
use bindery::{Classification, DiscoveryConfig, FileEntry, Scanner, classify};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = parse_args()?;
    let root = config.scan_root();
    if !root.is_dir() {
        bail!("scan root {} does not exist", root.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in Scanner::new(&root).entries() {
        let entry = entry?;
        let record = MapRecord::build(&entry)?;
        serde_json::to_writer(&mut out, &record)
            .with_context(|| format!("serializing record for {}", entry.path.display()))?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct MapRecord {
    path: String,
    classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

impl MapRecord {
    fn build(entry: &FileEntry) -> Result<Self> {
        let classification = classify(entry)?;
        let key = match classification {
            Classification::Controller => Some(entry.stem.clone()),
            _ => None,
        };
        Ok(Self {
            path: entry.path.display().to_string(),
            classification,
            key,
        })
    }
}

fn parse_args() -> Result<DiscoveryConfig> {
    let mut base: Option<String> = None;
    let mut path: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base" | "-b" => {
                base = Some(args.next().with_context(|| "--base requires a directory")?);
            }
            "--path" | "-p" => {
                path = Some(args.next().with_context(|| "--path requires a directory")?);
            }
            "--help" | "-h" => usage(0),
            other => bail!("unrecognized argument '{other}' (see --help)"),
        }
    }

    let mut config = match base {
        Some(dir) => DiscoveryConfig::new(dir),
        None => DiscoveryConfig::new(env::current_dir().context("resolving current directory")?),
    };
    if let Some(dir) = path {
        config = config.with_path_override(dir);
    }
    Ok(config)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: controller-map [--base DIR] [--path DIR]\n\nOptions:\n  --base, -b DIR   Host base directory; scans DIR/src/controllers (default: cwd).\n  --path, -p DIR   Scan DIR directly, ignoring the conventional subpath.\n\nEmits one JSON object per discovered file (NDJSON)."
    );
    std::process::exit(code);
}
