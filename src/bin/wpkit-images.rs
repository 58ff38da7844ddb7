//! PNG batch optimizer binary

use clap::Parser;
use std::{env, panic, path::PathBuf, process};
use wpkit::defaults::{
    ARCHIVE_PREVIEW_ENTRIES, DEFAULT_IMAGE_ARCHIVE, DEFAULT_IMAGE_OUTPUT_DIR,
    DEFAULT_IMAGE_SOURCE_DIR, DEFAULT_PROGRESS_INTERVAL,
};
use wpkit::exit_codes::*;
use wpkit::images::Progress;
use wpkit::utils::{bytes_to_mb, is_env_true};
use wpkit::{ImageOptimizerConfig, OptimizeReport, optimize_images};

const VERSION: &str = wpkit::version::VERSION;
const RULE_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Optimize PNG product images and bundle them into a zip")]
struct Args {
    /// Directory containing the source PNGs
    #[arg(long, default_value = DEFAULT_IMAGE_SOURCE_DIR)]
    source_dir: PathBuf,

    /// Directory receiving the optimized PNGs
    #[arg(long, default_value = DEFAULT_IMAGE_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Zip archive written from the output directory
    #[arg(long, default_value = DEFAULT_IMAGE_ARCHIVE)]
    archive: PathBuf,

    /// Print progress every N images
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: usize,

    /// Keep PNGs left in the output directory by earlier runs (also WPKIT_KEEP_STALE=1)
    #[arg(long)]
    keep_stale: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error, json[:level])
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in image optimizer");
            process::exit(EXIT_PANIC);
        }
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn run() -> i32 {
    // Handle --version before clap
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("wpkit-images {}", wpkit::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                EXIT_INVALID_ARGS
            } else {
                EXIT_SUCCESS
            };
        }
    };

    wpkit::logger::JsonLogger::init(args.log_level.as_deref());

    let mut config = ImageOptimizerConfig::default()
        .with_source_dir(args.source_dir)
        .with_output_dir(args.output_dir)
        .with_archive_path(args.archive)
        .with_progress_interval(args.progress_interval);
    if args.keep_stale || is_env_true("WPKIT_KEEP_STALE") {
        config = config.keep_stale_output();
    }

    let quiet = args.json;
    let report = optimize_images(&config, |progress| match progress {
        _ if quiet => {}
        Progress::Found { total } => println!("Found {} images to optimize\n", total),
        Progress::Processed { processed, total } => {
            println!("Processed {}/{} images...", processed, total)
        }
    });

    match report {
        Ok(report) if args.json => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                EXIT_ERROR
            }
        },
        Ok(report) => {
            print_summary(&report);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            e.exit_code()
        }
    }
}

fn print_summary(report: &OptimizeReport) {
    let totals = &report.totals;
    let saved_mb = totals.saved_bytes() as f64 / (1024.0 * 1024.0);
    let percent = totals
        .percent_saved()
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| "n/a".to_string());

    println!("\n{}", rule());
    if report.stale_removed > 0 {
        println!("Removed stale:   {} images", report.stale_removed);
    }
    println!("Original total:  {:.2} MB", bytes_to_mb(totals.original_bytes));
    println!("Optimized total: {:.2} MB", bytes_to_mb(totals.optimized_bytes));
    println!("Savings:         {:.2} MB ({})", saved_mb, percent);

    println!("\nCreating {}...", report.archive_path.display());
    println!("ZIP created: {:.2} MB", bytes_to_mb(report.archive.size_bytes));
    println!("ZIP contains {} files", report.archive.len());
    for name in report.archive.preview(ARCHIVE_PREVIEW_ENTRIES) {
        println!("  - {}", name);
    }
    if report.archive.len() > ARCHIVE_PREVIEW_ENTRIES {
        println!("  ...");
    }
    for name in report.archive.backslash_entries() {
        println!("  WARNING: Backslash found in {}", name);
    }

    println!("\n{}", rule());
    println!("SUCCESS!");
    println!("  Optimized images: {}/", report.output_dir.display());
    println!("  ZIP file: {}", report.archive_path.display());
    println!("{}", rule());
}
