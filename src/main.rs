// Thu Feb 5 2026 - Alex

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reflection_sdkgen::{
    config::{AncestorFieldLocation, GeneratorConfig},
    diag::{Diagnostics, FacadeNotifier, FacadeSink},
    Generator,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "SDK generator for reflected object graphs", long_about = None)]
struct Args {
    /// Reflection table snapshot (JSON).
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Directory the generated headers are written to.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum alignment; gaps below this are accepted as slop.
    #[arg(long, default_value = "4")]
    alignment: u32,

    /// Round aggregate sizes up to a multiple of this stride.
    #[arg(long)]
    stride: Option<u32>,

    /// Root kind carrying the ancestor-field member: container | typed-field.
    #[arg(long, default_value = "typed-field")]
    ancestor_field: String,

    /// Prefix enum values with the enum name instead of scoping them.
    #[arg(long)]
    unscoped_enums: bool,

    /// Resolved dispatch callback address, hex (e.g. 0x141A2B3C0).
    #[arg(long)]
    callback: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_progress: bool,
}

fn parse_callback(text: &str) -> Option<u64> {
    let trimmed = text.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(trimmed, 16).ok()
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    println!("{}", "Reflection SDK Generator".cyan().bold());
    println!("{}", "=".repeat(50).cyan());
    println!();

    let start_time = Instant::now();

    let ancestor_field = match args.ancestor_field.as_str() {
        "container" => AncestorFieldLocation::Container,
        "typed-field" => AncestorFieldLocation::TypedField,
        other => {
            eprintln!("{} Unknown ancestor-field location: {}", "[!]".red(), other);
            std::process::exit(1);
        }
    };

    let mut config = GeneratorConfig::default()
        .with_min_alignment(args.alignment)
        .with_ancestor_field_location(ancestor_field)
        .with_scoped_enums(!args.unscoped_enums);
    config.output_dir = args.output;
    config.verbose = args.verbose;
    if let Some(stride) = args.stride {
        config = config.with_padding_stride(stride);
    }
    if let Some(text) = &args.callback {
        match parse_callback(text) {
            Some(address) => config = config.with_dispatch_callback(address),
            None => {
                eprintln!("{} Invalid callback address: {}", "[!]".red(), text);
                std::process::exit(1);
            }
        }
    }

    println!(
        "{} Loading snapshot: {}",
        "[*]".blue(),
        args.snapshot.display()
    );

    let generator = match Generator::from_snapshot_file(&args.snapshot, config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{} Failed to load snapshot: {}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    println!(
        "{} Snapshot loaded: {} objects",
        "[+]".green(),
        generator.graph().len()
    );
    println!();

    let progress = if !args.no_progress {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Bucketing objects...");
        pb.set_position(10);
        Some(pb)
    } else {
        None
    };

    println!("{} Starting generation...", "[*]".blue());

    if let Some(ref pb) = progress {
        pb.set_message("Emitting declarations...");
        pb.set_position(30);
    }

    let diag = Diagnostics::new(Box::new(FacadeSink), Box::new(FacadeNotifier));
    let summary = match generator.run(diag) {
        Ok(s) => s,
        Err(e) => {
            if let Some(ref pb) = progress {
                pb.abandon();
            }
            eprintln!("{} Generation failed: {}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    if let Some(ref pb) = progress {
        pb.set_message("Done");
        pb.set_position(100);
        pb.finish();
    }

    println!();
    println!("{} Generation complete: {}", "[+]".green(), summary);
    if summary.skipped_declarations > 0 {
        println!(
            "{} {} declaration(s) skipped; see log for details",
            "[!]".yellow(),
            summary.skipped_declarations
        );
    }
    println!(
        "{} Finished in {:.2}s",
        "[+]".green(),
        start_time.elapsed().as_secs_f64()
    );
}
