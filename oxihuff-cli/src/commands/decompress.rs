//! Decompress command implementation.

use crate::container;
use crate::utils::{check_overwrite, decompressed_path, format_size, output_path};
use log::info;
use oxihuff_codec::{HuffmanConfig, HuffmanDecoder};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    files: &[PathBuf],
    output: Option<&Path>,
    force: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files given".into());
    }

    let decoder = HuffmanDecoder::new(if strict {
        HuffmanConfig::STRICT
    } else {
        HuffmanConfig::DEFAULT
    });

    for file in files {
        let target = output_path(file, output, files.len(), decompressed_path)?;
        check_overwrite(&target, force)?;

        let bytes = fs::read(file)?;
        let data = container::unwrap(&bytes, &decoder)
            .map_err(|e| format!("{}: {}", file.display(), e))?;
        fs::write(&target, &data)?;

        info!("Wrote {}", target.display());
        println!(
            "  {} -> {} ({})",
            file.display(),
            target.display(),
            format_size(data.len() as u64)
        );
    }

    Ok(())
}
