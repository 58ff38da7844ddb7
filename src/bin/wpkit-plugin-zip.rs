//! WordPress plugin release packager binary

use clap::Parser;
use std::{env, panic, path::PathBuf, process};
use wpkit::defaults::DEFAULT_PLUGIN_NAME;
use wpkit::exit_codes::*;
use wpkit::{PackageReport, PluginPackagerConfig, package_plugin};

const VERSION: &str = wpkit::version::VERSION;
const RULE_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Build WordPress plugin release zips")]
struct Args {
    /// Plugin slug, used as the folder name inside the zip
    #[arg(long, default_value = DEFAULT_PLUGIN_NAME)]
    plugin_name: String,

    /// Plugin source file (defaults to <plugin-name>.php)
    #[arg(long)]
    plugin_file: Option<String>,

    /// Directory containing the plugin source file
    #[arg(long, default_value = ".")]
    source_dir: PathBuf,

    /// Release directory (defaults to <source-dir>/releases)
    #[arg(long)]
    release_dir: Option<PathBuf>,

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
            eprintln!("Fatal: Unhandled panic in plugin packager");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("wpkit-plugin-zip {}", wpkit::version::full_version());
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

    let mut config = PluginPackagerConfig::new(args.plugin_name, &args.source_dir);
    if let Some(file) = args.plugin_file {
        config = config.with_plugin_file(file);
    }
    if let Some(dir) = args.release_dir {
        config = config.with_release_dir(dir);
    }

    match package_plugin(&config) {
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

fn print_summary(report: &PackageReport) {
    let rule = "=".repeat(RULE_WIDTH);

    println!("Plugin: {}", report.plugin_name);
    println!("Version: {}", report.version);

    println!("\nCreated: {}", report.base_archive.display());
    println!("  Added: {}", report.entry_name);

    println!("\nVerifying zip structure:");
    for name in &report.listing.entry_names {
        println!("  {}", name);
        if name.contains('\\') {
            println!("  WARNING: Backslash found!");
        }
    }

    println!("\nCopied to: {}", report.versioned_archive.display());
    println!("  {}", report.checksum);

    println!("\n{}", rule);
    println!("SUCCESS!");
    println!("  Main zip: {}", report.base_archive.display());
    println!("  Versioned: {}", report.versioned_archive.display());
    println!("{}", rule);
}
