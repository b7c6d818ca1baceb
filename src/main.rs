use chrono::Local;
use clap::{Parser, Subcommand};
use speiglass::report::{self, Summary};
use speiglass::{library, serve};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "speiglass")]
#[command(author, version, about = "Monthly bird-distribution footage viewer with SPEI drought commentary")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding the {species}_{month}.mp4 clips (optional in GUI mode)
    dir: Option<PathBuf>,

    /// Launch GUI folder picker (auto-enabled when double-clicked)
    #[arg(long)]
    gui: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive dashboard in the browser
    Serve {
        /// Directory holding the clips (default: current directory)
        dir: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, default_value = "8701")]
        port: u16,
    },

    /// Write an availability + commentary report (.html, .json, .csv)
    Export {
        /// Directory holding the clips (default: current directory)
        dir: Option<PathBuf>,

        /// Output report file; format follows the extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't prompt to open the report
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let args = Args::parse();

    // Handle subcommands first
    if let Some(cmd) = args.command {
        match cmd {
            Command::Serve { dir, port } => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                if let Err(e) = serve::start(port, dir) {
                    eprintln!("Server error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
            Command::Export { dir, output, no_open } => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                run_export(&dir, output, no_open, args.quiet);
                return;
            }
        }
    }

    // Determine the inventory directory
    // With GUI feature: open the picker if --gui flag OR no directory provided
    // This makes double-click behavior "just work"
    #[cfg(feature = "gui")]
    let dir = if args.gui || args.dir.is_none() {
        match pick_dir_gui() {
            Some(d) => d,
            None => {
                // User cancelled - show message and exit
                eprintln!("No folder selected.");
                std::process::exit(0);
            }
        }
    } else {
        args.dir.clone().unwrap()
    };

    #[cfg(not(feature = "gui"))]
    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let scan = library::scan(&dir);
    let summary = Summary::from_scan(&scan);

    if !args.quiet {
        eprintln!("\x1b[1mSpeiglass - 조류 분포 영상 인벤토리\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!("Directory: {}\n", scan.dir);

        // One row per species, six month cells each
        for row in scan.assets.chunks(6) {
            let cells: Vec<String> = row
                .iter()
                .map(|a| {
                    if a.present {
                        format!("\x1b[32m{:>3} ✓\x1b[0m", a.month_label)
                    } else {
                        format!("\x1b[31m{:>3} ✗\x1b[0m", a.month_label)
                    }
                })
                .collect();
            println!(
                "{:<7} {:<14} {}",
                row[0].species,
                row[0].species_name,
                cells.join("  ")
            );
        }

        if !scan.strays.is_empty() {
            eprintln!("\n\x1b[33mUnrecognized .mp4 files (ignored by the dashboard):\x1b[0m");
            for name in &scan.strays {
                eprintln!("  ? {}", name);
            }
        }
    }

    // Summary
    if !args.quiet {
        eprintln!("\n{}", "─".repeat(70));
    }
    eprintln!("\x1b[1mSummary:\x1b[0m");
    eprintln!("  \x1b[32m✓ Present:\x1b[0m {:>3} / {}", summary.present, summary.expected);
    eprintln!("  \x1b[31m✗ Missing:\x1b[0m {:>3}", summary.missing);
    if summary.strays > 0 {
        eprintln!("  \x1b[33m? Strays:\x1b[0m  {:>3}", summary.strays);
    }

    // Exit with appropriate code
    if summary.missing > 0 {
        std::process::exit(1);
    }
}

fn run_export(dir: &Path, output: Option<PathBuf>, no_open: bool, quiet: bool) {
    let scan = library::scan(dir);

    let output_path = output.unwrap_or_else(|| {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("speiglass_report_{}.csv", timestamp))
    });

    if let Err(e) = report::generate(&output_path, &scan) {
        eprintln!("Failed to write report: {}", e);
        std::process::exit(1);
    }

    if !quiet {
        let summary = Summary::from_scan(&scan);
        eprintln!(
            "Scanned {}: {} / {} clips present",
            scan.dir, summary.present, summary.expected
        );
        eprintln!("\x1b[32mReport saved: {}\x1b[0m", output_path.display());
    }

    // Open report
    if !no_open && !quiet {
        eprint!("\nOpen report? [Y/n] ");
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_ok() {
            let input = input.trim().to_lowercase();
            if input.is_empty() || input == "y" || input == "yes" {
                if let Err(e) = open::that(&output_path) {
                    eprintln!("Failed to open report: {}", e);
                }
            }
        }
    }
}

#[cfg(feature = "gui")]
fn pick_dir_gui() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select the folder holding the monthly bird clips")
        .pick_folder()
}
