//! Speiglass - Monthly bird-distribution footage against the SPEI drought index
//!
//! Speiglass serves a local dashboard over a folder of pre-rendered
//! distribution clips, one per species and survey month, and pairs every clip
//! with the surveyors' drought-correlation notes.
//!
//! # Overview
//!
//! Four wintering species are tracked across six survey months (January,
//! February, March, October, November, December). For each (species, month)
//! pair the archive holds one MP4 under the `{code}_{month}.mp4` naming
//! convention, e.g. `bird3_01.mp4`. The library scanner inventories the 24
//! expected clips, the findings table answers "how does this species track
//! the SPEI drought index in this month", and the server renders both into a
//! browser dashboard with a side-by-side species comparison.
//!
//! # Quick Start
//!
//! ```no_run
//! use speiglass::{findings, library, Month, Species};
//! use std::path::Path;
//!
//! let scan = library::scan(Path::new("./clips"));
//! let present = scan.assets.iter().filter(|a| a.present).count();
//! println!("{} / {} clips present", present, scan.assets.len());
//!
//! let finding = findings::lookup(Species::LittleEgret, Month::Jan);
//! println!("민감도: {}", finding.sensitivity);
//! println!("상관관계: {}", finding.correlation);
//! ```
//!
//! # Vocabulary
//!
//! | Code | Species | Months on file |
//! |-------|---------------|----------------|
//! | bird1 | 괭이갈매기 | 01 02 03 10 11 12 |
//! | bird2 | 흰뺨검둥오리 | 01 02 03 10 11 12 |
//! | bird3 | 쇠백로 | 01 02 03 10 11 12 |
//! | bird4 | 왜가리 | 01 02 03 10 11 12 |
//!
//! The vocabulary is closed: unknown codes and months are rejected at the
//! edges (CLI, query params, video routes), never stored.
//!
//! # Modules
//!
//! - [`species`]: The fixed species and survey-month vocabulary
//! - [`findings`]: Authored SPEI sensitivity/correlation notes per pair
//! - [`library`]: Naming convention, asset resolution, directory scan
//! - [`embed`]: Base64 data-URI dual render and single-panel fragments
//! - [`report`]: Offline report formatters (HTML, JSON, CSV)
//! - [`serve`]: The dashboard HTTP server

pub mod embed;
pub mod findings;
pub mod library;
pub mod report;
pub mod serve;
pub mod species;

pub use findings::{Finding, DEFAULT_FINDING};
pub use library::{LibraryScan, VideoAsset};
pub use species::{Month, Species};
