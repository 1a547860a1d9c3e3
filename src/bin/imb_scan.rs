use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use imb_scan::debug::{DirSink, debug_enabled};
use imb_scan::tools::{MANIFEST_NAME, collect_images, parse_manifest, run_corpus};
use imb_scan::{ScanConfig, Scanner};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "imb_scan", version, about = "Intelligent Mail barcode reader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the bar-type string of each image (directories are searched)
    Scan {
        paths: Vec<PathBuf>,
        /// Write annotated images to an `out` directory next to each input
        #[arg(long)]
        debug: bool,
        /// Write annotated images to this directory instead
        #[arg(long)]
        debug_dir: Option<PathBuf>,
        /// Also print region and threshold details
        #[arg(long)]
        verbose: bool,
    },
    /// Check every image of a regression corpus against its expected string
    Regress {
        /// Manifest file, or a directory containing barcodes.txt
        manifest: PathBuf,
        /// Write annotated images to this directory
        #[arg(long)]
        debug_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ScanConfig::from_env();

    match cli.command {
        Command::Scan {
            paths,
            debug,
            debug_dir,
            verbose,
        } => scan_cmd(&config, &paths, debug || debug_enabled(), debug_dir, verbose),
        Command::Regress {
            manifest,
            debug_dir,
        } => regress_cmd(&config, &manifest, debug_dir),
    }
}

fn scanner_for(config: &ScanConfig, image: &Path, beside: bool, dir: Option<&Path>) -> Scanner {
    let scanner = Scanner::new(*config);
    match (dir, beside) {
        (Some(dir), _) => scanner.with_debug_sink(DirSink::new(dir)),
        (None, true) => scanner.with_debug_sink(DirSink::beside(image)),
        (None, false) => scanner,
    }
}

fn scan_cmd(
    config: &ScanConfig,
    paths: &[PathBuf],
    debug: bool,
    debug_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    if paths.is_empty() {
        bail!("no input images given");
    }

    let mut images = Vec::new();
    for path in paths {
        if path.is_dir() {
            images.extend(collect_images(path));
        } else {
            images.push(path.clone());
        }
    }

    let mut failures = 0usize;
    for image in &images {
        let scanner = scanner_for(config, image, debug, debug_dir.as_deref());
        let start = Instant::now();
        match scanner.scan_path_report(image) {
            Ok(report) => {
                println!("{}\t{}", image.display(), report.barcode);
                if verbose {
                    match &report.region {
                        Some(region) => println!(
                            "  threshold={} region={}x{}@({}, {}) bars={} time={:?}",
                            report.threshold,
                            region.width,
                            region.height,
                            region.x,
                            region.y,
                            region.bars.len(),
                            start.elapsed()
                        ),
                        None => println!(
                            "  threshold={} no region time={:?}",
                            report.threshold,
                            start.elapsed()
                        ),
                    }
                }
            }
            Err(err) => {
                failures += 1;
                eprintln!("{err}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} images could not be read", images.len());
    }
    Ok(())
}

fn regress_cmd(config: &ScanConfig, manifest: &Path, debug_dir: Option<PathBuf>) -> Result<()> {
    let manifest = if manifest.is_dir() {
        manifest.join(MANIFEST_NAME)
    } else {
        manifest.to_path_buf()
    };
    let entries = parse_manifest(&manifest)
        .with_context(|| format!("loading corpus {}", manifest.display()))?;

    println!("Running tests...");
    let scanner = match debug_dir {
        Some(dir) => Scanner::new(*config).with_debug_sink(DirSink::new(dir)),
        None => Scanner::new(*config),
    };
    let start = Instant::now();
    let report = run_corpus(&scanner, &entries);
    println!("{report}");
    log::info!("corpus finished in {:?}", start.elapsed());

    if !report.all_passed() {
        bail!("{} regressions", report.total() - report.passed());
    }
    Ok(())
}
