//! CSV report output
//!
//! One row per expected asset with its commentary columns. The summaries
//! contain commas, so fields are quoted when they carry CSV structure.
//! Strays are not rows here; the JSON and HTML reports carry them.

use crate::library::LibraryScan;
use crate::report::finding_rows;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, scan: &LibraryScan) -> io::Result<()> {
    writeln!(
        writer,
        "species,species_name,month,file_name,present,sensitivity,correlation,summary"
    )?;

    for (asset, row) in scan.assets.iter().zip(finding_rows()) {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            asset.species,
            csv_escape(asset.species_name),
            asset.month,
            asset.file_name,
            asset.present,
            csv_escape(row.finding.sensitivity),
            csv_escape(row.finding.correlation),
            csv_escape(row.finding.summary),
        )?;
    }

    Ok(())
}

/// Quote a field when it contains anything CSV treats as structure
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library;
    use std::fs;

    #[test]
    fn test_csv_has_header_and_24_rows() {
        let dir = std::env::temp_dir().join(format!("speiglass_csv_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bird1_01.mp4"), b"x").unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &library::scan(&dir)).expect("csv writer");
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 25, "header plus one row per expected asset");
        assert!(lines[0].starts_with("species,species_name,month"));
        assert!(lines[1].starts_with("bird1,괭이갈매기,01,bird1_01.mp4,true"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_commas_inside_summaries_are_quoted() {
        // The bird1 October note contains "22년, 24년" - a comma in the field
        let dir = std::env::temp_dir().join(format!("speiglass_csv_q_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &library::scan(&dir)).expect("csv writer");
        let text = String::from_utf8(buf).unwrap();

        let gull_october = text
            .lines()
            .find(|l| l.starts_with("bird1,") && l.contains(",10,"))
            .expect("bird1/10 row exists");
        assert!(
            gull_october.contains("\"[추계] 22년, 24년에 특히 높은 밀도 기록.\""),
            "comma-bearing summary must be quoted: {}",
            gull_october
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_csv_escape_rules() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("두 줄\n텍스트"), "\"두 줄\n텍스트\"");
    }
}
