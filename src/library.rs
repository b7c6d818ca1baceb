//! Video asset resolution
//!
//! Survey clips are pre-rendered by a separate pipeline and dropped into a
//! single flat directory as `{species_code}_{month}.mp4` - 24 expected names
//! in all. The dashboard only ever queries for existence; it never creates,
//! moves, or deletes an asset. A missing clip is a normal, displayed outcome,
//! not an error.

use crate::species::{Month, Species};
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

/// Expected filename for one (species, month) pair: `{code}_{month}.mp4`.
pub fn video_file_name(species: Species, month: Month) -> String {
    format!("{}_{}.mp4", species.code(), month.token())
}

/// Parse an expected filename back into its pair.
///
/// Returns `None` for anything that is not exactly `{code}_{month}.mp4`,
/// which makes this the whitelist check for the streaming route and the
/// stray-file test for the scan.
pub fn parse_file_name(name: &str) -> Option<(Species, Month)> {
    let stem = name.strip_suffix(".mp4")?;
    let (code, token) = stem.split_once('_')?;
    Some((Species::from_code(code)?, Month::from_token(token)?))
}

/// One expected asset and whether it is on disk right now.
#[derive(Debug, Clone, Serialize)]
pub struct VideoAsset {
    /// Species code, `bird1`..`bird4`
    pub species: &'static str,
    /// Species display name
    pub species_name: &'static str,
    /// Month token, two digits
    pub month: &'static str,
    /// Month display label
    pub month_label: &'static str,
    /// `{code}_{month}.mp4`
    pub file_name: String,
    /// Full path the resolver checked
    pub path: String,
    /// Existence at resolution time
    pub present: bool,
}

/// Resolve one (species, month) pair against an asset directory.
///
/// Existence is queried at call time; nothing is cached, so a clip dropped
/// into the directory shows up on the next render.
pub fn resolve(dir: &Path, species: Species, month: Month) -> VideoAsset {
    let file_name = video_file_name(species, month);
    let path = dir.join(&file_name);
    VideoAsset {
        species: species.code(),
        species_name: species.korean_name(),
        month: month.token(),
        month_label: month.label(),
        present: path.is_file(),
        path: path.display().to_string(),
        file_name,
    }
}

/// Every expected asset in one directory, plus the strays.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryScan {
    /// Directory that was scanned
    pub dir: String,
    /// All 24 expected assets, species-major, month-control order
    pub assets: Vec<VideoAsset>,
    /// `.mp4` files in the directory matching no expected name
    pub strays: Vec<String>,
}

/// Resolve all 24 expected assets and collect stray `.mp4` files.
pub fn scan(dir: &Path) -> LibraryScan {
    let mut assets = Vec::with_capacity(Species::ALL.len() * Month::ALL.len());
    for species in Species::ALL {
        for month in Month::ALL {
            assets.push(resolve(dir, species, month));
        }
    }

    LibraryScan {
        dir: dir.display().to_string(),
        strays: stray_videos(dir),
        assets,
    }
}

/// `.mp4` files whose names match no expected `{code}_{month}.mp4`.
///
/// The convention is a flat directory, so the walk stays at depth 1; a
/// subdirectory full of unrelated clips is not this dashboard's business.
/// Catches the typos content authors actually make (`bird3_1.mp4`,
/// `bird5_01.mp4`, uppercase codes).
fn stray_videos(dir: &Path) -> Vec<String> {
    let mut strays: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(|s| s.to_string()))
        .filter(|name| {
            name.to_ascii_lowercase().ends_with(".mp4") && parse_file_name(name).is_none()
        })
        .collect();
    strays.sort();
    strays
}
