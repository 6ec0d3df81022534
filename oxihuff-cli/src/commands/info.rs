//! Info command implementation.

use crate::container::{Container, HEADER_LEN};
use oxihuff_codec::{CodeTable, EncodedUnit, HuffmanTree};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Machine-readable summary of a compressed file.
#[derive(Debug, Serialize)]
struct InfoReport {
    file: String,
    version: u8,
    crc32: String,
    symbol_count: u64,
    distinct_symbols: usize,
    container_bytes: u64,
    header_bytes: u64,
    payload_bytes: u64,
    padding_bits: u8,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    codes: Option<Vec<CodeEntry>>,
}

#[derive(Debug, Serialize)]
struct CodeEntry {
    symbol: u8,
    frequency: u64,
    code: String,
    length: u8,
}

pub fn cmd_info(path: &Path, json: bool, table: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    let container = Container::parse(&bytes)?;
    let unit = EncodedUnit::<u8>::from_bytes(container.unit)?;
    let stats = unit.stats();

    let codes = if table && !unit.is_empty() {
        let tree = HuffmanTree::build(unit.frequencies())?;
        let codes = CodeTable::from_tree(&tree)?;
        let entries = codes
            .sorted()
            .into_iter()
            .map(|(symbol, code)| CodeEntry {
                symbol,
                frequency: unit.frequencies().get(&symbol).unwrap_or(0),
                code: code.to_string(),
                length: code.len(),
            })
            .collect();
        Some(entries)
    } else {
        None
    };

    let report = InfoReport {
        file: path.display().to_string(),
        version: container.version,
        crc32: format!("{:08x}", container.crc),
        symbol_count: stats.symbol_count,
        distinct_symbols: stats.distinct_symbols,
        container_bytes: (HEADER_LEN as u64) + stats.encoded_bytes(),
        header_bytes: stats.header_bytes,
        payload_bytes: stats.payload_bytes,
        padding_bits: stats.padding_bits,
        ratio: stats.ratio(),
        codes,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", report.file);
    println!("  Container version: {}", report.version);
    println!("  CRC-32:            {}", report.crc32);
    println!("  Original size:     {} bytes", report.symbol_count);
    println!("  Distinct symbols:  {}", report.distinct_symbols);
    println!("  Table overhead:    {} bytes", report.header_bytes);
    println!(
        "  Payload:           {} bytes ({} padding bits)",
        report.payload_bytes, report.padding_bits
    );
    println!("  Total size:        {} bytes", report.container_bytes);
    if report.symbol_count > 0 {
        println!(
            "  Ratio:             {:.2}% ({:.2}% saved)",
            report.ratio,
            stats.space_savings()
        );
    }

    if let Some(codes) = &report.codes {
        println!();
        println!("{:>8} {:>12} {:>4}  Code", "Symbol", "Frequency", "Bits");
        println!("{}", "-".repeat(40));
        for entry in codes {
            println!(
                "{:>8} {:>12} {:>4}  {}",
                describe_symbol(entry.symbol),
                entry.frequency,
                entry.length,
                entry.code
            );
        }
    }

    Ok(())
}

fn describe_symbol(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}
