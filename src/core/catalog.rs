//! The English catalog written next to the mod: a KSP `Localization` cfg
//! node plus a CSV sheet for translators.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{
    literal::Origin,
    registry::{KeyEntry, KeyRegistry},
};
use crate::utils::{escape_newlines, unescape_newlines};

pub const DEFAULT_OUT_DIR: &str = "Localization";
pub const LOCALE: &str = "en-us";
pub const CATALOG_CFG: &str = "en-us.cfg";
pub const CATALOG_CSV: &str = "en-us.csv";
pub const CODE_CATALOG_CFG: &str = "en-us-cs.cfg";
pub const CONFIG_CATALOG_CFG: &str = "en-us-cfg.cfg";

const HEADER_COMMENT: &str = "// Autogenerated by ksploc";

#[derive(Debug, Serialize)]
struct CatalogRecord<'a> {
    #[serde(rename = "Key")]
    key: &'a str,
    #[serde(rename = "Text")]
    text: String,
}

/// Render the `Localization { en-us { ... } }` node for entries selected by `filter`.
pub fn render_cfg(entries: &[KeyEntry], filter: Origin) -> String {
    let mut out = String::new();
    out.push_str(HEADER_COMMENT);
    out.push_str("\nLocalization\n{\n");
    out.push_str(&format!("    {}\n    {{\n", LOCALE));
    for entry in entries
        .iter()
        .filter(|e| e.literal.origin.selected_by(filter))
    {
        out.push_str(&format!(
            "        #{} = {}\n",
            entry.key,
            escape_newlines(&entry.literal.text)
        ));
    }
    out.push_str("    }\n}\n");
    out
}

/// Write a `Key,Text` sheet with every field quoted.
pub fn write_csv<W: Write>(entries: &[KeyEntry], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    for entry in entries {
        wtr.serialize(CatalogRecord {
            key: &entry.key,
            text: escape_newlines(&entry.literal.text),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every catalog file into `dir`, creating it if needed.
///
/// Returns the written paths.
pub fn write_catalog(dir: &Path, registry: &KeyRegistry, separate_parts_cfg: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let entries = registry.entries();
    let cfg_files: Vec<(&str, Origin)> = if separate_parts_cfg {
        vec![
            (CODE_CATALOG_CFG, Origin::Code),
            (CONFIG_CATALOG_CFG, Origin::Config),
        ]
    } else {
        vec![(CATALOG_CFG, Origin::Both)]
    };

    let mut written = Vec::new();
    for (name, filter) in cfg_files {
        let path = dir.join(name);
        fs::write(&path, render_cfg(entries, filter))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    let csv_path = dir.join(CATALOG_CSV);
    let file = File::create(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    write_csv(entries, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    written.push(csv_path);

    Ok(written)
}

/// Parse `#KEY = text` lines from a catalog cfg.
///
/// Text is kept exactly as written after the `= ` separator, so trailing
/// spaces survive a write/read cycle.
pub fn parse_cfg(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let (lhs, rhs) = line.trim_start().strip_prefix('#')?.split_once('=')?;
            let key = lhs.trim();
            if key.is_empty() {
                return None;
            }
            let text = rhs.strip_prefix(' ').unwrap_or(rhs);
            Some((key.to_string(), unescape_newlines(text)))
        })
        .collect()
}

/// Seed `registry` from catalog files already present in `dir`.
///
/// Returns the number of entries loaded.
pub fn load_catalog(dir: &Path, registry: &mut KeyRegistry) -> Result<usize> {
    let sources = [
        (CODE_CATALOG_CFG, Origin::Code),
        (CONFIG_CATALOG_CFG, Origin::Config),
        (CATALOG_CFG, Origin::Code),
    ];

    let mut loaded = 0;
    for (name, origin) in sources {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        for (key, text) in parse_cfg(&content) {
            if registry.seed(&key, &text, origin) {
                loaded += 1;
            }
        }
    }
    Ok(loaded)
}
