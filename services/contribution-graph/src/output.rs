//! Writing the finished document.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::STDOUT_FILENAME;

/// Write `document` to `filename`, or to stdout for `-`.
///
/// Parent directories are created as needed. The document is written in
/// one call, after rendering has fully succeeded.
pub fn write_document(filename: &str, document: &[u8]) -> Result<()> {
    if filename == STDOUT_FILENAME {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(document)
            .and_then(|_| stdout.flush())
            .context("Failed to write document to stdout")?;
        return Ok(());
    }

    let path = Path::new(filename);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    fs::write(path, document).with_context(|| format!("Failed to write {:?}", path))
}
