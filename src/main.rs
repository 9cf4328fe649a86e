use batch_resizer::batch::{self, BatchRequest, RunOptions};
use batch_resizer::config::{self, ResizerConfig};
use batch_resizer::imaging::Filter;
use batch_resizer::naming::CollisionPolicy;
use batch_resizer::scale::{Preset, ScaleFactor, ScalePolicy};
use batch_resizer::types::{BatchSummary, ImageRef};
use batch_resizer::{output, scan};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "batch-resizer")]
#[command(about = "Resize a batch of images by a percentage")]
#[command(long_about = "\
Resize a batch of images by a percentage

Each image is scaled by the same percentage on both axes (aspect ratio is
kept, every side is at least 1px) and written into the output directory under
its own filename with a prefix:

  images/dawn.jpg  →  resized_images/resized_dawn.jpg

Images are selected either explicitly ('resize <FILES>...') or by scanning a
directory for .jpg .jpeg .png .gif .bmp and .webp files ('scan'). A file that
cannot be read or written is reported and skipped; the rest of the batch still
runs.

Settings come from resizer.toml in the working directory (if present), then
from the flags below. Run 'batch-resizer gen-config' to generate a documented
resizer.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./resizer.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Scale percentage, 1-100 (e.g. 50 or 50%). Applied after --preset
    #[arg(long, global = true)]
    scale: Option<ScaleFactor>,

    /// Scale preset: small = 30%, medium = 50%, large = 75%
    #[arg(long, value_enum, global = true)]
    preset: Option<Preset>,

    /// Prefix for output filenames ("" keeps names unchanged)
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// How to handle two inputs with the same filename
    #[arg(long, value_enum, global = true)]
    collisions: Option<CollisionPolicy>,

    /// Resampling filter
    #[arg(long, value_enum, global = true)]
    filter: Option<Filter>,

    /// Print the batch summary as JSON instead of progress lines
    #[arg(long, global = true)]
    json: bool,

    /// Exit with an error if any image failed
    #[arg(long, global = true)]
    strict: bool,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize the given files
    Resize {
        /// Image files, processed in the order given
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Resize every supported image found in the input directory
    Scan {
        /// Input directory (default: input_dir from config)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Include subdirectories
        #[arg(long)]
        recursive: bool,
        /// List the images that would be resized and stop
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a stock resizer.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (config, files) = match &cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Resize { files } => {
            let config = resolve_settings(cli)?;
            (config, files.clone())
        }
        Command::Scan {
            input,
            recursive,
            dry_run,
        } => {
            let mut config = resolve_settings(cli)?;
            if let Some(input) = input {
                config.input_dir = input.clone();
            }
            if *recursive {
                config.scan.recursive = true;
            }
            // Output directory first, even if nothing turns out to be eligible.
            if !*dry_run {
                batch::ensure_output_dir(&config.output_dir)?;
            }
            let found = scan::discover(&config.input_dir, config.scan_options())?;
            if found.is_empty() || *dry_run {
                output::print_discovered(&config.input_dir, &found);
                return Ok(());
            }
            (config, found)
        }
    };

    let request = BatchRequest::new(
        files.into_iter().map(ImageRef::from),
        &config.output_dir,
        config.scale,
    )
    .with_namer(config.namer())
    .with_filter(config.resample.filter);

    let summary = if cli.json {
        let summary = batch::run(&request, RunOptions::default())?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        summary
    } else {
        let summary = run_with_progress(&request)?;
        output::print_summary(&summary);
        summary
    };

    if cli.strict && summary.failed() > 0 {
        return Err(format!("{} image(s) failed", summary.failed()).into());
    }
    Ok(())
}

/// Run a batch, printing progress lines from a separate thread.
fn run_with_progress(request: &BatchRequest) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_batch_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = batch::run(
        request,
        RunOptions {
            events: Some(tx),
            ..Default::default()
        },
    );
    printer.join().map_err(|_| "progress printer panicked")?;
    Ok(result?)
}

/// Load the config file, then apply command-line overrides on top.
fn resolve_settings(cli: &Cli) -> Result<ResizerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&std::env::current_dir()?)?,
    };

    let mut policy = ScalePolicy::new();
    policy.set_scale(i64::from(config.scale.percent()))?;
    if let Some(preset) = cli.preset {
        policy.set_preset(preset);
    }
    if let Some(scale) = cli.scale {
        policy.set_scale(i64::from(scale.percent()))?;
    }
    config.scale = policy.scale();

    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.naming.prefix = prefix.clone();
    }
    if let Some(collisions) = cli.collisions {
        config.naming.collisions = collisions;
    }
    if let Some(filter) = cli.filter {
        config.resample.filter = filter;
    }
    config.validate()?;
    tracing::debug!(?config, "resolved settings");
    Ok(config)
}

/// Diagnostics go to stderr so stdout stays clean for `--json`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
