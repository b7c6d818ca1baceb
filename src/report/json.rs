//! JSON report output
//!
//! Everything the other formats show, in one machine-readable document:
//! generation timestamp, summary counts, the full scan (24 expected assets
//! plus strays), and the commentary table.

use crate::library::LibraryScan;
use crate::report::{finding_rows, FindingRow, Summary};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: Summary,
    scan: &'a LibraryScan,
    findings: Vec<FindingRow>,
}

pub fn write<W: Write>(writer: &mut W, scan: &LibraryScan) -> io::Result<()> {
    let report = JsonReport {
        generated: chrono::Local::now().to_rfc3339(),
        summary: Summary::from_scan(scan),
        scan,
        findings: finding_rows(),
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writer.write_all(b"\n")
}
