// ABOUTME: Main entry point for the slidesmith program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

use slidesmith::{bootstrap, restore, split, times, utils, wrap, Config};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove time allocations such as "(45분)" from decks
    StripTimes(StripTimesArgs),

    /// Split slides that are longer than the line limit
    Split(SplitArgs),

    /// Wrap long lines inside two-column layouts
    Wrap(WrapArgs),

    /// Refill fenced code blocks from a reference deck
    RestoreCode(RestoreCodeArgs),

    /// Generate the course index.html from the slides directory
    Bootstrap(BootstrapArgs),
}

#[derive(Args)]
struct StripTimesArgs {
    /// Markdown decks to rewrite (default: src/slides/*/slides.md)
    files: Vec<PathBuf>,
}

#[derive(Args)]
struct SplitArgs {
    /// Markdown decks to rewrite
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum number of lines per slide
    #[arg(long)]
    max_lines: Option<usize>,

    /// Lines to look back for a blank line or heading to split at
    #[arg(long)]
    lookback: Option<usize>,
}

#[derive(Args)]
struct WrapArgs {
    /// Markdown decks to rewrite
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum line width in characters
    #[arg(long)]
    max_width: Option<usize>,
}

#[derive(Args)]
struct RestoreCodeArgs {
    /// Deck holding the intact code blocks
    #[arg(short, long)]
    reference: PathBuf,

    /// Deck whose code blocks get refilled
    #[arg(short, long)]
    target: PathBuf,

    /// Language tag of the fences to restore
    #[arg(long, default_value = "css")]
    lang: String,

    /// Also write the result to this path
    #[arg(long)]
    copy_to: Option<PathBuf>,
}

#[derive(Args)]
struct BootstrapArgs {
    /// Directory holding the weekNN folders
    #[arg(long)]
    slides_dir: Option<PathBuf>,

    /// Path of the generated index.html
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Run `op` on every file, reporting failures without stopping
fn for_each_file<F>(files: &[PathBuf], mut op: F) -> anyhow::Result<()>
where
    F: FnMut(&PathBuf) -> slidesmith::Result<()>,
{
    let mut failed = 0;
    for file in files {
        if let Err(e) = op(file) {
            debug!("{:?}: {:?}", file, e);
            eprintln!("Error processing {}: {}", file.display(), e);
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}

fn strip_times(args: &StripTimesArgs) -> anyhow::Result<()> {
    let files = if args.files.is_empty() {
        utils::find_files(times::DEFAULT_PATTERN)?
    } else {
        args.files.clone()
    };

    let mut updated = 0;
    for_each_file(&files, |file| {
        if times::process_file(file)? {
            println!("Updated: {}", file.display());
            updated += 1;
        } else {
            println!("No changes: {}", file.display());
        }
        Ok(())
    })?;

    println!("\nTotal files updated: {}", updated);
    Ok(())
}

fn split_files(args: &SplitArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(max_lines) = args.max_lines {
        config.max_lines = max_lines;
    }
    if let Some(lookback) = args.lookback {
        config.lookback = lookback;
    }
    config.validate()?;
    let options = config.split_options();

    for_each_file(&args.files, |file| {
        let result = split::process_file(file, &options)?;
        println!("Processed {}", file.display());
        for report in &result.reports {
            println!("  - {}", report);
        }
        println!("Total modifications: {}", result.split_count());
        Ok(())
    })
}

fn wrap_files(args: &WrapArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(max_width) = args.max_width {
        config.max_width = max_width;
    }
    config.validate()?;
    let options = config.wrap_options();

    for_each_file(&args.files, |file| {
        let changed = wrap::process_file(file, &options)?;
        if changed {
            println!("Processed: {}", file.display());
        } else {
            println!("No changes: {}", file.display());
        }
        Ok(())
    })
}

fn restore_code(args: &RestoreCodeArgs) -> anyhow::Result<()> {
    let result = restore::process_files(
        &args.reference,
        &args.target,
        &args.lang,
        args.copy_to.as_deref(),
    )?;

    println!(
        "Found {} {} code blocks in {}",
        result.available,
        args.lang,
        args.reference.display()
    );
    println!(
        "Restored {} {} blocks with line numbers in {}",
        result.restored,
        args.lang,
        args.target.display()
    );
    if let Some(dest) = &args.copy_to {
        println!("Copied to: {}", dest.display());
    }
    Ok(())
}

fn bootstrap_index(args: &BootstrapArgs, config: Config) -> anyhow::Result<()> {
    let slides_dir = args.slides_dir.clone().unwrap_or(config.slides_dir.clone());
    let output = args.output.clone().unwrap_or(config.index_output.clone());

    println!("Scanning weeks in: {}", slides_dir.display());
    let weeks = bootstrap::generate_index(&slides_dir, &output, &config.bootstrap_options())?;

    if weeks.is_empty() {
        println!("No weeks found in slides directory!");
        return Ok(());
    }

    println!("Found {} weeks:", weeks.len());
    for week in &weeks {
        println!("   Week {}: {} {}", week.number, week.title, week.status_marks());
    }
    println!("Successfully generated: {}", output.display());

    println!("\nSummary:");
    println!("   - Total weeks: {}", weeks.len());
    println!(
        "   - Weeks with slides: {}",
        weeks.iter().filter(|w| w.has_slides).count()
    );
    println!(
        "   - Weeks with code: {}",
        weeks.iter().filter(|w| w.has_code).count()
    );
    println!(
        "   - Weeks with images: {}",
        weeks.iter().filter(|w| w.has_images).count()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::from_env();

    let result = match &cli.command {
        Some(Commands::StripTimes(args)) => strip_times(args),
        Some(Commands::Split(args)) => split_files(args, config),
        Some(Commands::Wrap(args)) => wrap_files(args, config),
        Some(Commands::RestoreCode(args)) => restore_code(args),
        Some(Commands::Bootstrap(args)) => bootstrap_index(args, config),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
