//! Inline HTML renderers for the video panels
//!
//! The species panels stream their clip from the `/videos/` route and play it
//! with normal controls. The comparison panel is different: the whole point
//! is that both clips start rendering in the same browser paint cycle, and
//! two independently-fetched streams never do. The closest a static page
//! gets is one fragment whose two `<video>` elements carry the full file
//! bytes as base64 data URIs with `autoplay muted loop` - the browser has
//! everything in hand before either element exists, so both start together.
//!
//! This is approximate synchronization, not a clock: there is no frame-level
//! negotiation between the two streams, and none is attempted.
//!
//! Every value interpolated into a fragment comes from the closed
//! species/month sets or from base64 output; nothing user-typed reaches the
//! markup, so the renderers do no escaping.

use crate::library::VideoAsset;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::fs;
use std::io;

/// Why a dual render could not be produced.
///
/// Either failure kills the whole fragment: the comparison view shows an
/// "assets unavailable" notice rather than one clip playing against a hole.
#[derive(Debug)]
pub enum EmbedError {
    /// The expected clip is not on disk.
    Missing { file_name: String },
    /// The clip exists but could not be read.
    Unreadable { file_name: String, source: io::Error },
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::Missing { file_name } => {
                write!(f, "영상 파일이 없습니다: {}", file_name)
            }
            EmbedError::Unreadable { file_name, source } => {
                write!(f, "영상 파일을 읽을 수 없습니다: {} ({})", file_name, source)
            }
        }
    }
}

impl std::error::Error for EmbedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmbedError::Missing { .. } => None,
            EmbedError::Unreadable { source, .. } => Some(source),
        }
    }
}

/// Read a clip fully and wrap it as a `data:video/mp4;base64,…` URI.
pub fn data_uri(asset: &VideoAsset) -> Result<String, EmbedError> {
    let bytes = fs::read(&asset.path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            EmbedError::Missing {
                file_name: asset.file_name.clone(),
            }
        } else {
            EmbedError::Unreadable {
                file_name: asset.file_name.clone(),
                source: e,
            }
        }
    })?;
    Ok(format!("data:video/mp4;base64,{}", STANDARD.encode(bytes)))
}

/// One fragment, two embedded clips, simultaneous autoplay start.
///
/// Reads both files fully into memory. If either is missing or unreadable
/// the whole emission fails - no partial pair is ever returned.
pub fn side_by_side(left: &VideoAsset, right: &VideoAsset) -> Result<String, EmbedError> {
    // Fail on a missing side before reading anything, so the error names the
    // file a content author needs to supply.
    for asset in [left, right] {
        if !asset.present {
            return Err(EmbedError::Missing {
                file_name: asset.file_name.clone(),
            });
        }
    }

    let left_uri = data_uri(left)?;
    let right_uri = data_uri(right)?;

    Ok(format!(
        r#"<div class="dual-wrap">
  <figure class="dual-cell">
    <video autoplay muted loop playsinline src="{left_uri}"></video>
    <figcaption>{left_name} · {left_month}</figcaption>
  </figure>
  <figure class="dual-cell">
    <video autoplay muted loop playsinline src="{right_uri}"></video>
    <figcaption>{right_name} · {right_month}</figcaption>
  </figure>
</div>"#,
        left_uri = left_uri,
        left_name = left.species_name,
        left_month = left.month_label,
        right_uri = right_uri,
        right_name = right.species_name,
        right_month = right.month_label,
    ))
}

/// Panel body for one species view.
///
/// A streaming `<video>` when the clip is on disk, an advisory naming the
/// expected file otherwise. Total - a missing clip is a displayed outcome,
/// not an error.
pub fn single_panel(asset: &VideoAsset) -> String {
    if asset.present {
        format!(
            r#"<div class="panel-video">
  <video controls loop src="/videos/{file}"></video>
</div>"#,
            file = asset.file_name
        )
    } else {
        format!(
            r#"<div class="missing-asset">
  <p>영상 파일이 없습니다: <code>{file}</code></p>
  <p class="hint">자산 폴더에 위 이름으로 클립을 넣으면 바로 표시됩니다.</p>
</div>"#,
            file = asset.file_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::resolve;
    use crate::species::{Month, Species};
    use std::fs;
    use std::path::{Path, PathBuf};

    // ==========================================================================
    // DUAL RENDER TESTS
    // ==========================================================================
    //
    // The comparison fragment is the one place file bytes flow through this
    // crate. The property that matters: what goes in as a file comes out as
    // the same bytes after base64 decode - a corrupted payload plays as a
    // black rectangle with no error anywhere.
    //
    // The clips here are a few fake bytes. The renderer never inspects
    // content; existence and readability are the whole contract.
    // ==========================================================================

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "speiglass_embed_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn write_clip(dir: &Path, name: &str, bytes: &[u8]) {
        fs::write(dir.join(name), bytes).expect("write fake clip");
    }

    #[test]
    fn test_side_by_side_embeds_exactly_two_sources() {
        let dir = scratch_dir("two_sources");
        write_clip(&dir, "bird3_02.mp4", b"left clip bytes");
        write_clip(&dir, "bird2_02.mp4", b"right clip bytes");

        let left = resolve(&dir, Species::LittleEgret, Month::Feb);
        let right = resolve(&dir, Species::SpotBilledDuck, Month::Feb);
        let html = side_by_side(&left, &right).expect("both clips present");

        assert_eq!(
            html.matches("data:video/mp4;base64,").count(),
            2,
            "exactly two embedded sources"
        );
        assert_eq!(html.matches("<video").count(), 2);
        assert!(html.contains("autoplay muted loop playsinline"));
        assert!(html.contains("쇠백로"));
        assert!(html.contains("흰뺨검둥오리"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_embedded_payloads_survive_the_round_trip() {
        let dir = scratch_dir("round_trip");
        let left_bytes: Vec<u8> = (0u8..=255).collect();
        let right_bytes = b"\x00\x00\x00\x18ftypmp42 not a real clip".to_vec();
        write_clip(&dir, "bird3_02.mp4", &left_bytes);
        write_clip(&dir, "bird2_02.mp4", &right_bytes);

        let left = resolve(&dir, Species::LittleEgret, Month::Feb);
        let right = resolve(&dir, Species::SpotBilledDuck, Month::Feb);
        let html = side_by_side(&left, &right).expect("both clips present");

        // Pull each payload back out of its src attribute and decode it
        let payloads: Vec<Vec<u8>> = html
            .match_indices("data:video/mp4;base64,")
            .map(|(start, marker)| {
                let rest = &html[start + marker.len()..];
                let end = rest.find('"').expect("src attribute closes");
                STANDARD.decode(&rest[..end]).expect("payload decodes")
            })
            .collect();

        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0], left_bytes, "left payload byte-identical");
        assert_eq!(payloads[1], right_bytes, "right payload byte-identical");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_side_fails_the_whole_fragment() {
        let dir = scratch_dir("missing_side");
        write_clip(&dir, "bird3_02.mp4", b"only the left clip exists");

        let left = resolve(&dir, Species::LittleEgret, Month::Feb);
        let right = resolve(&dir, Species::SpotBilledDuck, Month::Feb);

        let err = side_by_side(&left, &right).expect_err("right side missing");
        match err {
            EmbedError::Missing { ref file_name } => {
                assert_eq!(file_name, "bird2_02.mp4", "error names the missing file");
            }
            other => panic!("expected Missing, got {:?}", other),
        }

        // Order should not matter: the missing side fails first either way
        let err = side_by_side(&right, &left).expect_err("left arg missing");
        assert!(err.to_string().contains("bird2_02.mp4"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_clip_vanishing_between_resolve_and_read_is_reported_missing() {
        let dir = scratch_dir("vanishing");
        write_clip(&dir, "bird1_01.mp4", b"soon gone");
        write_clip(&dir, "bird2_01.mp4", b"stays");

        let left = resolve(&dir, Species::BlackTailedGull, Month::Jan);
        let right = resolve(&dir, Species::SpotBilledDuck, Month::Jan);
        assert!(left.present, "clip existed at resolve time");

        fs::remove_file(dir.join("bird1_01.mp4")).unwrap();
        let err = side_by_side(&left, &right).expect_err("left vanished");
        assert!(
            matches!(err, EmbedError::Missing { .. }),
            "a vanished clip is missing, not unreadable: {:?}",
            err
        );

        let _ = fs::remove_dir_all(&dir);
    }

    // ==========================================================================
    // SINGLE PANEL TESTS
    // ==========================================================================

    #[test]
    fn test_single_panel_streams_a_present_clip() {
        let dir = scratch_dir("single_present");
        write_clip(&dir, "bird1_10.mp4", b"clip");

        let asset = resolve(&dir, Species::BlackTailedGull, Month::Oct);
        let html = single_panel(&asset);

        assert!(html.contains(r#"src="/videos/bird1_10.mp4""#));
        assert!(html.contains("controls"));
        assert!(!html.contains("missing-asset"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_single_panel_advisory_names_the_missing_file() {
        let dir = scratch_dir("single_missing");

        let asset = resolve(&dir, Species::GreyHeron, Month::Nov);
        let html = single_panel(&asset);

        assert!(html.contains("missing-asset"));
        assert!(
            html.contains("bird4_11.mp4"),
            "advisory must name the file a content author should supply"
        );
        assert!(!html.contains("<video"), "no player for a missing clip");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_embed_error_messages_name_the_file() {
        let missing = EmbedError::Missing {
            file_name: "bird2_03.mp4".to_string(),
        };
        assert!(missing.to_string().contains("bird2_03.mp4"));

        let unreadable = EmbedError::Unreadable {
            file_name: "bird2_03.mp4".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(unreadable.to_string().contains("bird2_03.mp4"));
        assert!(std::error::Error::source(&unreadable).is_some());
    }
}
