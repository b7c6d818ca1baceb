//! Self-contained HTML report
//!
//! An offline snapshot of what the dashboard knows: summary tiles, the
//! availability matrix, the commentary table, and any stray files. No
//! scripts and no embedded video - this is the file you attach to an email
//! asking someone to render the missing clips.

use crate::library::LibraryScan;
use crate::report::{finding_rows, Summary};
use crate::species::{Month, Species};
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, scan: &LibraryScan) -> io::Result<()> {
    let summary = Summary::from_scan(scan);
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let matrix_rows = build_matrix_rows(scan);
    let commentary_rows = build_commentary_rows();
    let strays_block = build_strays_block(&scan.strays);

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>speiglass 자산 리포트</title>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --ok: #3fb950;
            --missing: #f85149;
            --stray: #d29922;
            --accent: #58a6ff;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans KR', sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1100px; margin: 0 auto; padding: 2rem; }}
        .header {{
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }}
        .logo {{ font-size: 1.8rem; font-weight: 800; }}
        .subtitle {{ color: var(--dim); font-size: 0.9rem; margin-top: 0.25rem; }}
        .stats {{
            display: grid;
            grid-template-columns: repeat(4, 1fr);
            gap: 1rem;
            margin-bottom: 2rem;
        }}
        .stat {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.25rem;
            text-align: center;
        }}
        .stat-value {{ font-size: 2.4rem; font-weight: 700; line-height: 1; }}
        .stat-label {{ color: var(--dim); font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; margin-top: 0.5rem; }}
        .stat.present .stat-value {{ color: var(--ok); }}
        .stat.missing .stat-value {{ color: var(--missing); }}
        .stat.stray .stat-value {{ color: var(--stray); }}
        .card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 2rem;
        }}
        .card h2 {{ font-size: 1rem; color: var(--dim); margin-bottom: 1rem; }}
        table {{ width: 100%; border-collapse: collapse; font-size: 0.9rem; }}
        th, td {{ padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid var(--border); }}
        th {{ color: var(--dim); font-weight: 600; }}
        td.cell {{ text-align: center; }}
        .yes {{ color: var(--ok); font-weight: 700; }}
        .no {{ color: var(--missing); }}
        .code {{ font-family: 'SF Mono', 'Fira Code', monospace; color: var(--accent); font-size: 0.85rem; }}
        tr.quiet td {{ color: var(--dim); }}
        .stray-name {{ font-family: 'SF Mono', 'Fira Code', monospace; color: var(--stray); }}
        .footer {{ color: var(--dim); font-size: 0.8rem; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">🦅 speiglass 자산 리포트</div>
            <div class="subtitle">자산 폴더: <span class="code">{dir}</span> · 생성 {generated}</div>
        </div>

        <div class="stats">
            <div class="stat">
                <div class="stat-value">{expected}</div>
                <div class="stat-label">Expected</div>
            </div>
            <div class="stat present">
                <div class="stat-value">{present}</div>
                <div class="stat-label">Present</div>
            </div>
            <div class="stat missing">
                <div class="stat-value">{missing}</div>
                <div class="stat-label">Missing</div>
            </div>
            <div class="stat stray">
                <div class="stat-value">{strays}</div>
                <div class="stat-label">Stray</div>
            </div>
        </div>

        <div class="card">
            <h2>영상 자산 현황 (종 × 월)</h2>
            <table id="availability-matrix">
                <thead>
                    <tr><th>종</th><th>1월</th><th>2월</th><th>3월</th><th>10월</th><th>11월</th><th>12월</th></tr>
                </thead>
                <tbody>
{matrix_rows}
                </tbody>
            </table>
        </div>

        <div class="card">
            <h2>분석 코멘트 (민감도 / 상관성 / 요약)</h2>
            <table id="commentary-table">
                <thead>
                    <tr><th>종</th><th>월</th><th>민감도</th><th>상관성</th><th>요약</th></tr>
                </thead>
                <tbody>
{commentary_rows}
                </tbody>
            </table>
        </div>
{strays_block}
        <div class="footer">speiglass · SPEI는 외부 산출물이며 본 리포트는 어떤 지표도 계산하지 않습니다.</div>
    </div>
</body>
</html>
"#,
        dir = html_escape(&scan.dir),
        generated = generated,
        expected = summary.expected,
        present = summary.present,
        missing = summary.missing,
        strays = summary.strays,
        matrix_rows = matrix_rows,
        commentary_rows = commentary_rows,
        strays_block = strays_block,
    )?;

    Ok(())
}

/// One matrix row per species, one cell per month, scan order.
fn build_matrix_rows(scan: &LibraryScan) -> String {
    let months = Month::ALL.len();
    Species::ALL
        .iter()
        .enumerate()
        .map(|(i, species)| {
            let cells: String = scan.assets[i * months..(i + 1) * months]
                .iter()
                .map(|asset| {
                    if asset.present {
                        r#"<td class="cell yes">●</td>"#.to_string()
                    } else {
                        format!(r#"<td class="cell no" title="{}">─</td>"#, asset.file_name)
                    }
                })
                .collect();
            format!(
                "                    <tr><td>{} <span class=\"code\">{}</span></td>{}</tr>\n",
                species.korean_name(),
                species.code(),
                cells
            )
        })
        .collect()
}

fn build_commentary_rows() -> String {
    finding_rows()
        .iter()
        .map(|row| {
            let class = if row.authored { "" } else { " class=\"quiet\"" };
            format!(
                "                    <tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                class,
                row.species_name,
                row.month,
                row.finding.sensitivity,
                row.finding.correlation,
                row.finding.summary,
            )
        })
        .collect()
}

fn build_strays_block(strays: &[String]) -> String {
    if strays.is_empty() {
        return String::new();
    }

    let items: String = strays
        .iter()
        .map(|name| format!("                <li class=\"stray-name\">{}</li>\n", html_escape(name)))
        .collect();

    format!(
        r#"
        <div class="card">
            <h2>규칙에 맞지 않는 .mp4 파일</h2>
            <ul id="stray-list">
{items}            </ul>
        </div>
"#,
        items = items
    )
}

/// The directory path and stray names come from the filesystem, not from our
/// constant sets, so they get escaped before landing in markup.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
