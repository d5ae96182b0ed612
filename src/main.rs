//! Instafilter CLI - apply a filter to a photo and save it to the album.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossbeam::channel;
use instafilter::platform::UnavailableAuthenticator;
use instafilter::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

/// Longest the CLI waits for an asynchronous collaborator to reply.
const COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Parser)]
#[command(name = "instafilter", version, about = "Apply photo filters from the command line")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all available filters
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the parameters a filter accepts
    Info {
        /// Filter id or name, e.g. "sepia_tone" or "Sepia Tone"
        filter: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Filter a photo and save the result
    Apply(ApplyArgs),
}

#[derive(clap::Args)]
struct ApplyArgs {
    /// Photo to filter
    input: PathBuf,
    /// Filter id or name (defaults to the configured filter)
    #[arg(short, long)]
    filter: Option<String>,
    /// Intensity, 0 to 1
    #[arg(long)]
    intensity: Option<f64>,
    /// Scale, 0 to 100
    #[arg(long)]
    scale: Option<f64>,
    /// Radius, 0 to 1000
    #[arg(long)]
    radius: Option<f64>,
    /// Album directory (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// png or jpeg (overrides config)
    #[arg(long)]
    format: Option<ImageFormat>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::List { json } => list_filters(json),
        Command::Info { filter, json } => filter_info(&filter, json),
        Command::Apply(args) => apply(args, config),
    }
}

fn list_filters(json: bool) -> Result<()> {
    let catalog = FilterCatalog::builtin();

    if json {
        let all: Vec<_> = catalog.entries().map(|e| &e.metadata).collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    println!("Available filters ({} total):", catalog.len());
    println!();
    for (category, filters) in catalog.grouped_by_category() {
        println!("  {}", category.display_name());
        for metadata in filters {
            println!("      • {} - {}", metadata.id, metadata.description);
        }
        println!();
    }
    Ok(())
}

fn filter_info(name: &str, json: bool) -> Result<()> {
    let kind: FilterKind = name.parse().map_err(anyhow::Error::msg)?;
    let catalog = FilterCatalog::builtin();
    let metadata = catalog.metadata(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(metadata)?);
        return Ok(());
    }

    println!("Filter: {}", metadata.name);
    println!("ID: {}", metadata.id);
    println!("Category: {}", metadata.category.display_name());
    println!();
    println!("Description:");
    println!("  {}", metadata.description);
    println!();

    if metadata.parameters.is_empty() {
        println!("Parameters: none");
    } else {
        println!("Parameters:");
        for kind in &metadata.parameters {
            let def = kind.definition();
            println!("  • {} [{} to {}] = {}", kind, def.min, def.max, def.default_value);
            println!("    {}", def.description);
        }
    }
    Ok(())
}

fn apply(args: ApplyArgs, mut config: AppConfig) -> Result<()> {
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(format) = args.format {
        config.output_format = format;
    }
    let filter = match &args.filter {
        Some(name) => name.parse().map_err(anyhow::Error::msg)?,
        None => config.default_filter,
    };

    unlock(&config)?;

    let photo = ImageValue::open(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let requested = [
        (ParameterKind::Intensity, args.intensity),
        (ParameterKind::Scale, args.scale),
        (ParameterKind::Radius, args.radius),
    ];
    let mut session = prepare_session(filter, &requested, photo)?;

    let Some(image) = session.take_derived_image() else {
        bail!("{} produced no image for {}", filter, args.input.display());
    };
    if let Some(duration) = session.stats().last_duration {
        log::info!("Applied {} with {} in {:?}", filter, session.parameters(), duration);
    }

    let library = DirectoryPhotoLibrary::new(&config.output_dir, config.output_format);
    let (tx, rx) = channel::bounded(1);
    let err_tx = tx.clone();
    library.write_to_photo_album(
        image,
        ImageSaver::new()
            .on_success(move |saved| {
                let _ = tx.send(Ok(saved));
            })
            .on_error(move |e| {
                let _ = err_tx.send(Err(e));
            }),
    );

    let saved = rx
        .recv_timeout(COLLABORATOR_TIMEOUT)
        .context("Photo library did not respond")??;
    println!("Saved {}", saved.path.display());
    Ok(())
}

/// Build a session for `filter` with the requested parameters applied.
///
/// Parameters are set before the photo so the executor only runs once, on
/// the final parameters.
fn prepare_session(
    filter: FilterKind,
    requested: &[(ParameterKind, Option<f64>)],
    photo: ImageValue,
) -> Result<FilterSession> {
    let mut session = FilterSession::with_initial_filter(BuiltinExecutor::new(), filter);

    for &(kind, value) in requested {
        let Some(value) = value else { continue };
        if let Err(e) = session.set_parameter(kind, value) {
            let hint = e.suggested_fix().unwrap_or_default();
            bail!("{}\n  → {}", e, hint);
        }
    }

    if let Err(e) = session.set_source_image(photo) {
        log::warn!("{}", e);
    }
    Ok(session)
}

/// Block until the access gate is open, authenticating if required.
fn unlock(config: &AppConfig) -> Result<()> {
    let gate = AccessGate::new(config.require_unlock);
    if gate.is_unlocked() {
        return Ok(());
    }

    let (tx, rx) = channel::bounded(1);
    gate.authenticate(&UnavailableAuthenticator, move |result| {
        let _ = tx.send(result);
    });
    rx.recv_timeout(COLLABORATOR_TIMEOUT)
        .context("Authenticator did not respond")?
        .context("Unlock required by configuration")?;

    if !gate.is_unlocked() {
        bail!("Access gate is still locked");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn photo() -> ImageValue {
        let img = RgbaImage::from_fn(64, 48, |x, y| Rgba([(x * 4) as u8, (y * 5) as u8, 60, 255]));
        ImageValue::new(DynamicImage::ImageRgba8(img))
    }

    #[test]
    fn test_prepare_runs_filter_once() {
        let requested = [
            (ParameterKind::Intensity, None),
            (ParameterKind::Scale, None),
            (ParameterKind::Radius, Some(10.0)),
        ];
        let session = prepare_session(FilterKind::GaussianBlur, &requested, photo()).unwrap();

        assert_eq!(session.stats().recomputes, 1);
        assert_eq!(session.parameter(ParameterKind::Radius), Some(10.0));
        assert!(session.current_derived_image().is_some());
    }

    #[test]
    fn test_prepare_rejects_invalid_parameter() {
        let requested = [(ParameterKind::Scale, Some(20.0))];
        let err = prepare_session(FilterKind::SepiaTone, &requested, photo()).unwrap_err();
        assert!(err.to_string().contains("scale"));
    }
}
