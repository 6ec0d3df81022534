//! Test command implementation.

use crate::container;
use oxihuff_codec::{HuffmanConfig, HuffmanDecoder, OxiHuffError};
use std::fs;
use std::path::PathBuf;

pub fn cmd_test(files: &[PathBuf], strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let decoder = HuffmanDecoder::new(if strict {
        HuffmanConfig::STRICT
    } else {
        HuffmanConfig::DEFAULT
    });

    let mut failed = 0usize;

    for file in files {
        let result = fs::read(file)
            .map_err(OxiHuffError::from)
            .and_then(|bytes| container::unwrap(&bytes, &decoder));

        match result {
            Ok(data) => println!("  OK: {} ({} bytes)", file.display(), data.len()),
            Err(e) => {
                failed += 1;
                println!("  FAILED: {} - {}", file.display(), e);
            }
        }
    }

    println!();
    println!(
        "Tested {} files: {} OK, {} failed",
        files.len(),
        files.len() - failed,
        failed
    );

    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{} of {} files failed verification", failed, files.len()).into())
    }
}
