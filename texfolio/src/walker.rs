//! Directory walker for discovering annex part files

use crate::toc::Part;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extension of markup source files
pub const SOURCE_EXTENSION: &str = "tex";

/// Errors that can occur while walking an annex directory
#[derive(Error, Debug)]
pub enum WalkerError {
    /// Reading a part file failed
    #[error("IO error reading {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Traversing the directory failed
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// File name does not follow the `NN_label-words` format
    #[error("Invalid filename format: {}", .0.display())]
    InvalidFilename(PathBuf),
}

/// Walk an annex directory and load its parts in file-name order.
///
/// Only `*.tex` files named `NN_label-words.tex` are parts; other files
/// (README, drafts without a number) are skipped.
pub fn walk_annex(root: &Path) -> Result<Vec<Part>, WalkerError> {
    let mut parts = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        match load_part(path) {
            Ok(part) => parts.push(part),
            Err(WalkerError::InvalidFilename(path)) => {
                log::debug!("Skipping {}: not a numbered part", path.display());
            }
            Err(e) => return Err(e),
        }
    }

    log::info!("Found {} annex part(s) in {}", parts.len(), root.display());
    Ok(parts)
}

/// Load a single part file, taking its label from the file name
pub fn load_part(path: &Path) -> Result<Part, WalkerError> {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| WalkerError::InvalidFilename(path.to_path_buf()))?;

    let label = parse_filename(filename)
        .ok_or_else(|| WalkerError::InvalidFilename(path.to_path_buf()))?;

    let text = fs::read_to_string(path).map_err(|source| WalkerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Part { label, text })
}

/// Parse a part file name into its label
/// Examples:
///   "01_probability" -> "Probability"
///   "02_linear-algebra" -> "Linear Algebra"
fn parse_filename(filename: &str) -> Option<String> {
    let (number, label_slug) = filename.split_once('_')?;

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let label = label_slug
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}
