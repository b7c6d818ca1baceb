//! HTTP server for the interactive dashboard
//!
//! `speiglass serve ./clips` → starts server, opens browser, shows the panels
//!
//! One blocking accept loop, request/response only. Every interaction
//! recomputes the visible panel from the current control values; the only
//! shared state is the embedded commentary table and the read-only clips on
//! disk, so there is nothing to lock and nothing to invalidate.

use crate::embed;
use crate::findings::{self, Finding};
use crate::library::{self, LibraryScan, VideoAsset};
use crate::report::Summary;
use crate::species::{Month, Species};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tiny_http::{Header, Method, Request, Response, Server};

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { ok: false, data: None, error: Some(message.into()) }
    }
}

#[derive(Deserialize, Debug)]
pub struct PanelParams {
    pub species: String,
    pub month: String,
}

#[derive(Deserialize, Debug)]
pub struct CompareParams {
    #[serde(default = "default_left")]
    pub left: String,
    #[serde(default = "default_right")]
    pub right: String,
    #[serde(default = "default_month")]
    pub month: String,
}

// The comparison the surveyors reach for first: the most and least
// SPEI-sensitive species in the month with the strongest signal.
fn default_left() -> String { "bird3".to_string() }
fn default_right() -> String { "bird2".to_string() }
fn default_month() -> String { "01".to_string() }

/// Everything one species panel needs for a render.
#[derive(Serialize, Debug)]
pub struct PanelView {
    pub species: &'static str,
    pub species_name: &'static str,
    pub english_name: &'static str,
    pub month: &'static str,
    pub month_label: &'static str,
    pub finding: &'static Finding,
    /// False when the commentary is the fallback line, so the UI can dim it
    pub authored: bool,
    pub video: VideoAsset,
    /// Pre-rendered video area: a streaming player or the missing-file advisory
    pub html: String,
}

/// A successful dual render plus the assets it embedded.
#[derive(Serialize, Debug)]
pub struct CompareView {
    pub month: &'static str,
    pub month_label: &'static str,
    pub left: VideoAsset,
    pub right: VideoAsset,
    /// The side-by-side fragment with both clips inlined as data URIs
    pub html: String,
}

/// Scan payload for the sidebar availability block.
#[derive(Serialize)]
pub struct LibraryView {
    pub summary: Summary,
    pub scan: LibraryScan,
}

/// Start server, open browser, serve UI
pub fn start(port: u16, dir: PathBuf) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let url = format!("http://localhost:{}", port);
    let dir = dir.canonicalize().unwrap_or(dir);

    eprintln!("\n\x1b[1;32m🦅 speiglass\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Assets: {}\n", dir.display());

    // Open browser
    let _ = open::that(&url);

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &dir) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn handle_request(mut request: Request, dir: &Path) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        // Serve embedded UI with the asset directory injected
        (&Method::Get, "/") => {
            let html = UI_HTML.replace("{{ASSET_DIR}}", &html_escape(&dir.display().to_string()));
            respond_html(request, html)
        }

        // API: one species panel
        (&Method::Get, "/api/panel") => {
            let Some(params) = read_params::<PanelParams>(&mut request) else {
                return respond_json(
                    request,
                    &ApiResponse::<PanelView>::error("species와 month 파라미터가 필요합니다"),
                );
            };
            eprintln!("→ {} {}", params.species, params.month);

            match panel_view(dir, &params) {
                Ok(view) => respond_json(request, &ApiResponse::success(view)),
                Err(msg) => respond_json(request, &ApiResponse::<PanelView>::error(msg)),
            }
        }

        // API: dual render, only ever on the trigger button
        (&Method::Get, "/api/compare") | (&Method::Post, "/api/compare") => {
            let Some(params) = read_params::<CompareParams>(&mut request) else {
                return respond_json(
                    request,
                    &ApiResponse::<CompareView>::error("비교 파라미터를 해석할 수 없습니다"),
                );
            };
            eprintln!("→ compare {} vs {} @ {}", params.left, params.right, params.month);

            match compare_view(dir, &params) {
                Ok(view) => respond_json(request, &ApiResponse::success(view)),
                Err(msg) => respond_json(request, &ApiResponse::<CompareView>::error(msg)),
            }
        }

        // API: full availability scan for the sidebar
        (&Method::Get, "/api/library") => {
            let scan = library::scan(dir);
            let view = LibraryView { summary: Summary::from_scan(&scan), scan };
            respond_json(request, &ApiResponse::success(view))
        }

        // Stream one expected clip for the single-species players
        (&Method::Get, p) if p.starts_with("/videos/") => {
            let name = p["/videos/".len()..].to_string();
            serve_video(request, dir, &name)
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_html(request: Request, html: String) -> std::io::Result<()> {
    let response = Response::from_string(html)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]).unwrap());
    request.respond(response)
}

fn respond_json<T: Serialize>(request: Request, payload: &T) -> std::io::Result<()> {
    let json = serde_json::to_string(payload)?;
    let response = Response::from_string(json)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
    request.respond(response)
}

fn read_params<T: serde::de::DeserializeOwned>(request: &mut Request) -> Option<T> {
    let url = request.url().to_string();

    // Try query string
    if let Some(query) = url.split('?').nth(1) {
        if let Ok(params) = serde_urlencoded::from_str::<T>(query) {
            return Some(params);
        }
    }

    // Try JSON body
    let mut body = String::new();
    request.as_reader().read_to_string(&mut body).ok()?;
    if !body.is_empty() {
        if let Ok(params) = serde_json::from_str::<T>(&body) {
            return Some(params);
        }
    }

    // Bare call: params whose fields all carry defaults still parse
    serde_urlencoded::from_str::<T>("").ok()
}

/// Build one species panel. Pure apart from the existence check.
pub fn panel_view(dir: &Path, params: &PanelParams) -> Result<PanelView, String> {
    let species = Species::from_code(&params.species)
        .ok_or_else(|| format!("알 수 없는 종 코드: {}", params.species))?;
    let month = Month::from_token(&params.month)
        .ok_or_else(|| format!("지원하지 않는 월: {}", params.month))?;

    let video = library::resolve(dir, species, month);
    let html = embed::single_panel(&video);

    Ok(PanelView {
        species: species.code(),
        species_name: species.korean_name(),
        english_name: species.english_name(),
        month: month.token(),
        month_label: month.label(),
        finding: findings::lookup(species, month),
        authored: findings::authored(species, month),
        video,
        html,
    })
}

/// Build the dual render. Fails whole, never partial.
pub fn compare_view(dir: &Path, params: &CompareParams) -> Result<CompareView, String> {
    let left_species = Species::from_code(&params.left)
        .ok_or_else(|| format!("알 수 없는 종 코드: {}", params.left))?;
    let right_species = Species::from_code(&params.right)
        .ok_or_else(|| format!("알 수 없는 종 코드: {}", params.right))?;
    let month = Month::from_token(&params.month)
        .ok_or_else(|| format!("지원하지 않는 월: {}", params.month))?;

    let left = library::resolve(dir, left_species, month);
    let right = library::resolve(dir, right_species, month);
    let html = embed::side_by_side(&left, &right).map_err(|e| e.to_string())?;

    Ok(CompareView {
        month: month.token(),
        month_label: month.label(),
        left,
        right,
        html,
    })
}

fn serve_video(request: Request, dir: &Path, name: &str) -> std::io::Result<()> {
    // Only the 24 expected names are ever served; anything else (including
    // anything with a path separator) fails the parse and 404s.
    if library::parse_file_name(name).is_none() {
        let response = Response::from_string("Not found").with_status_code(404);
        return request.respond(response);
    }

    match File::open(dir.join(name)) {
        Ok(file) => {
            let response = Response::from_file(file)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"video/mp4"[..]).unwrap());
            request.respond(response)
        }
        Err(_) => {
            let response = Response::from_string(format!("영상 파일이 없습니다: {}", name))
                .with_status_code(404);
            request.respond(response)
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // ==========================================================================
    // VIEW BUILDER TESTS
    // ==========================================================================
    //
    // panel_view and compare_view are the whole request pipeline minus the
    // socket: parse the tokens, resolve the clips, render the fragment. They
    // run here against a scratch directory; the accept loop above them is
    // thin enough to leave to manual runs.
    // ==========================================================================

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "speiglass_serve_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn panel(species: &str, month: &str) -> PanelParams {
        PanelParams { species: species.to_string(), month: month.to_string() }
    }

    fn compare(left: &str, right: &str, month: &str) -> CompareParams {
        CompareParams {
            left: left.to_string(),
            right: right.to_string(),
            month: month.to_string(),
        }
    }

    #[test]
    fn test_panel_view_with_present_clip() {
        let dir = scratch_dir("panel_present");
        fs::write(dir.join("bird3_01.mp4"), b"clip").unwrap();

        let view = panel_view(&dir, &panel("bird3", "01")).expect("valid tokens");
        assert_eq!(view.species_name, "쇠백로");
        assert_eq!(view.month_label, "1월");
        assert_eq!(view.finding.sensitivity, "매우 높음");
        assert_eq!(view.finding.correlation, "강한 양의 상관");
        assert!(view.authored);
        assert!(view.video.present);
        assert!(view.html.contains("/videos/bird3_01.mp4"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_panel_view_missing_clip_is_an_advisory_not_an_error() {
        let dir = scratch_dir("panel_missing");

        let view = panel_view(&dir, &panel("bird4", "11")).expect("missing clip still renders");
        assert!(!view.video.present);
        assert!(view.html.contains("missing-asset"));
        assert!(view.html.contains("bird4_11.mp4"));
        // Commentary still shows: bird4/11 has no authored entry
        assert_eq!(view.finding.summary, "특이 사항 없음.");
        assert!(!view.authored);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_panel_view_rejects_unknown_tokens() {
        let dir = scratch_dir("panel_bad");

        let err = panel_view(&dir, &panel("bird9", "01")).expect_err("no such species");
        assert!(err.contains("bird9"));

        let err = panel_view(&dir, &panel("bird1", "05")).expect_err("no footage for May");
        assert!(err.contains("05"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compare_view_embeds_both_sides() {
        let dir = scratch_dir("compare_ok");
        fs::write(dir.join("bird3_02.mp4"), b"left").unwrap();
        fs::write(dir.join("bird2_02.mp4"), b"right").unwrap();

        let view = compare_view(&dir, &compare("bird3", "bird2", "02")).expect("both present");
        assert_eq!(view.html.matches("data:video/mp4;base64,").count(), 2);
        assert!(view.left.present && view.right.present);
        assert_eq!(view.month_label, "2월");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compare_view_fails_whole_when_one_side_missing() {
        let dir = scratch_dir("compare_missing");
        fs::write(dir.join("bird3_02.mp4"), b"left only").unwrap();

        let err = compare_view(&dir, &compare("bird3", "bird2", "02"))
            .expect_err("right side missing");
        assert!(err.contains("bird2_02.mp4"), "notice names the missing file: {}", err);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compare_params_default_to_the_marquee_comparison() {
        let params: CompareParams =
            serde_urlencoded::from_str("").expect("all fields carry defaults");
        assert_eq!(params.left, "bird3");
        assert_eq!(params.right, "bird2");
        assert_eq!(params.month, "01");
    }

    #[test]
    fn test_panel_params_require_both_fields() {
        assert!(serde_urlencoded::from_str::<PanelParams>("species=bird1&month=10").is_ok());
        assert!(serde_urlencoded::from_str::<PanelParams>("species=bird1").is_err());
        assert!(serde_urlencoded::from_str::<PanelParams>("").is_err());
    }

    // ==========================================================================
    // EMBEDDED PAGE TESTS
    // ==========================================================================
    //
    // The UI ships inside the binary. These assertions keep the page and the
    // API from drifting apart: every control the dispatcher depends on has
    // to exist in the markup the server actually serves.
    // ==========================================================================

    #[test]
    fn test_ui_lists_every_species_and_month() {
        for code in ["bird1", "bird2", "bird3", "bird4"] {
            assert!(UI_HTML.contains(code), "UI should know species {}", code);
        }
        for token in ["\"01\"", "\"02\"", "\"03\"", "\"10\"", "\"11\"", "\"12\""] {
            assert!(UI_HTML.contains(token), "UI should know month token {}", token);
        }
        for name in ["괭이갈매기", "흰뺨검둥오리", "쇠백로", "왜가리"] {
            assert!(UI_HTML.contains(name), "UI should label tab {}", name);
        }
    }

    #[test]
    fn test_ui_calls_the_three_api_routes() {
        assert!(UI_HTML.contains("/api/panel"));
        assert!(UI_HTML.contains("/api/compare"));
        assert!(UI_HTML.contains("/api/library"));
    }

    #[test]
    fn test_ui_carries_the_injection_placeholder() {
        assert!(UI_HTML.contains("{{ASSET_DIR}}"));
    }

    #[test]
    fn test_ui_has_the_view_controls() {
        // Month radios for the species panels, a comparison tab with two
        // species dropdowns, the shared month slider, and the trigger button
        assert!(UI_HTML.contains("type=\"radio\""));
        assert!(UI_HTML.contains("종 간 비교"));
        assert!(UI_HTML.contains("id=\"compare-left\""));
        assert!(UI_HTML.contains("id=\"compare-right\""));
        assert!(UI_HTML.contains("id=\"compare-month\""));
        assert!(UI_HTML.contains("type=\"range\""));
        assert!(UI_HTML.contains("id=\"compare-run\""));
        assert!(UI_HTML.contains("동시 재생"));
    }

    #[test]
    fn test_video_route_whitelist_rejects_non_convention_names() {
        // The same parse the route uses; a name that fails here 404s
        assert!(library::parse_file_name("bird1_01.mp4").is_some());
        assert!(library::parse_file_name("../../etc/passwd").is_none());
        assert!(library::parse_file_name("bird1_01.mp4/..").is_none());
        assert!(library::parse_file_name("bird1_13.mp4").is_none());
    }
}
