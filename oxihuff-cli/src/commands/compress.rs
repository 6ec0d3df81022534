//! Compress command implementation.

use crate::container;
use crate::utils::{check_overwrite, compressed_path, create_progress_bar, format_size, output_path};
use log::info;
use oxihuff_codec::HuffmanEncoder;
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_compress(
    files: &[PathBuf],
    output: Option<&Path>,
    force: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files given".into());
    }

    let encoder = HuffmanEncoder::default();
    let pb = create_progress_bar(files.len() as u64, progress && files.len() > 1);
    pb.set_message("files");

    let mut total_in = 0u64;
    let mut total_out = 0u64;

    for file in files {
        let target = output_path(file, output, files.len(), compressed_path)?;
        check_overwrite(&target, force)?;

        let data = fs::read(file)?;
        let wrapped = container::wrap(&data, &encoder)?;
        fs::write(&target, &wrapped)?;

        info!("Wrote {}", target.display());
        pb.suspend(|| {
            println!(
                "  {}: {} -> {} ({})",
                file.display(),
                format_size(data.len() as u64),
                format_size(wrapped.len() as u64),
                describe_ratio(data.len() as u64, wrapped.len() as u64),
            )
        });

        total_in += data.len() as u64;
        total_out += wrapped.len() as u64;
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    if files.len() > 1 {
        println!(
            "Compressed {} files: {} -> {} ({})",
            files.len(),
            format_size(total_in),
            format_size(total_out),
            describe_ratio(total_in, total_out),
        );
    }

    Ok(())
}

fn describe_ratio(original: u64, compressed: u64) -> String {
    if original == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", compressed as f64 / original as f64 * 100.0)
}
