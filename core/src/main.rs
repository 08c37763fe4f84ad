use clap::Parser;
use dicomcheck_core::cli::{Cli, OutputFormat};
use dicomcheck_core::{
    compare_sessions, load_directory, Collection, SessionComparison, SidecarRecord, TextReport,
};
use log::{error, info};
use std::io::IsTerminal;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    for dir in [&cli.reference, &cli.new] {
        if !dir.is_dir() {
            eprintln!("Error: {} is not a directory", dir.display());
            process::exit(1);
        }
    }

    let reference = load_or_exit(&cli.reference);
    let new = load_or_exit(&cli.new);

    if cli.tree {
        println!("Reference: {}", cli.reference.display());
        println!("{}", reference);
        println!("New: {}", cli.new.display());
        println!("{}", new);
    }

    if let Some(path) = &cli.identify {
        identify_sidecar(&new, path);
    }

    let config = cli.compare_config();
    info!("Comparing with {:?}", config);
    let comparison = compare_sessions(&reference, &new, &config);

    output_comparison(&comparison, &cli);
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_or_exit(dir: &Path) -> Collection {
    match load_directory(dir) {
        Ok(collection) => collection,
        Err(e) => {
            error!("Failed to load {}: {}", dir.display(), e);
            eprintln!("Error: Failed to load {}: {}", dir.display(), e);
            process::exit(1);
        }
    }
}

fn identify_sidecar(collection: &Collection, path: &Path) {
    let sidecar = match SidecarRecord::from_file(path) {
        Ok(sidecar) => sidecar,
        Err(e) => {
            eprintln!("Error: Failed to read {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    match collection.identify(&sidecar) {
        Ok(entry) => {
            println!("{} belongs to:", path.display());
            println!("  {}", entry.patient);
            println!("  {}", entry.study);
            println!("  {} ({} files)", entry.series, entry.files.len());
        }
        Err(e) if e.is_not_found() => println!("{}: {}", path.display(), e),
        Err(e) => {
            eprintln!("Error: {}: {}", path.display(), e);
            process::exit(1);
        }
    }
    println!();
}

fn output_comparison(comparison: &SessionComparison, cli: &Cli) {
    match cli.format {
        OutputFormat::Text => {
            let color = cli.color.enabled(std::io::stdout().is_terminal());
            println!("{}", TextReport::new(comparison).with_color(color));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(comparison) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = comparison;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
