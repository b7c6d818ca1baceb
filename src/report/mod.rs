//! Report generation for the asset inventory
//!
//! This module provides output formatters for the inventory scan plus the
//! commentary table in multiple formats:
//!
//! - **HTML**: Self-contained offline summary (availability matrix, tiles)
//! - **JSON**: Machine-readable format for programmatic consumption
//! - **CSV**: Spreadsheet-compatible format, one row per expected asset
//!
//! # Usage
//!
//! ```ignore
//! use speiglass::{library, report};
//!
//! let scan = library::scan(std::path::Path::new("."));
//!
//! // Automatically picks format based on extension
//! report::generate("inventory.html", &scan)?; // HTML
//! report::generate("inventory.json", &scan)?; // JSON
//! report::generate("inventory.csv", &scan)?;  // CSV
//! ```

pub mod csv;
pub mod html;
pub mod json;

use crate::findings::{self, Finding};
use crate::library::LibraryScan;
use crate::species::{Month, Species};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, scan: &LibraryScan) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "html" | "htm" => html::write(&mut file, scan),
        "json" => json::write(&mut file, scan),
        _ => csv::write(&mut file, scan),
    }
}

/// Summary statistics for one inventory scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub expected: usize,
    pub present: usize,
    pub missing: usize,
    pub strays: usize,
}

impl Summary {
    pub fn from_scan(scan: &LibraryScan) -> Self {
        let present = scan.assets.iter().filter(|a| a.present).count();
        Self {
            expected: scan.assets.len(),
            present,
            missing: scan.assets.len() - present,
            strays: scan.strays.len(),
        }
    }
}

/// One commentary row per (species, month) pair.
///
/// Rows come out in the same species-major order as `LibraryScan::assets`,
/// so the writers can zip the two without re-keying.
#[derive(Debug, Clone, Serialize)]
pub struct FindingRow {
    pub species: &'static str,
    pub species_name: &'static str,
    pub month: &'static str,
    pub finding: &'static Finding,
    /// False when the pair fell through to the default record
    pub authored: bool,
}

/// The full commentary table, one row per pair in scan order.
pub fn finding_rows() -> Vec<FindingRow> {
    let mut rows = Vec::with_capacity(Species::ALL.len() * Month::ALL.len());
    for species in Species::ALL {
        for month in Month::ALL {
            rows.push(FindingRow {
                species: species.code(),
                species_name: species.korean_name(),
                month: month.token(),
                finding: findings::lookup(species, month),
                authored: findings::authored(species, month),
            });
        }
    }
    rows
}
