//! CLI binary for assetprep.
//!
//! A thin shim over the library crate that maps CLI flags to [`BatchConfig`]
//! and the PDF extraction entry points, and prints results.

use anyhow::{bail, Context, Result};
use assetprep::{
    extract_pages, inspect, parse_page_number, process_images, suggested_filename,
    BatchConfig, BatchProgressCallback, ProgressCallback,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar at the bottom, a log line per image.
/// The batch is sequential, so a single slot suffices for per-item timing.
struct CliProgressCallback {
    bar: ProgressBar,
    item_started: Mutex<Option<Instant>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} images  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            item_started: Mutex::new(None),
        })
    }

    fn elapsed_secs(&self) -> f64 {
        self.item_started
            .lock()
            .unwrap()
            .take()
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_items: usize) {
        self.bar.set_length(total_items as u64);
    }

    fn on_item_start(&self, _item_num: usize, _total: usize, source: &Path) {
        *self.item_started.lock().unwrap() = Some(Instant::now());
        self.bar
            .set_message(source.file_name().unwrap_or_default().to_string_lossy().into_owned());
    }

    fn on_item_complete(&self, item_num: usize, total: usize, source: &Path) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            green("✓"),
            item_num,
            total,
            source.file_name().unwrap_or_default().to_string_lossy(),
            dim(&format!("{:.1}s", self.elapsed_secs())),
        ));
        self.bar.inc(1);
    }

    fn on_item_error(&self, item_num: usize, total: usize, source: &Path, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            format!("{}\u{2026}", &error[..79])
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            item_num,
            total,
            source.file_name().unwrap_or_default().to_string_lossy(),
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_items: usize, success_count: usize) {
        let failed = total_items.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} images processed successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} images processed  ({} failed)",
                if failed == total_items {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_items,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Two WebP variants per image, names normalised from each file stem
  assetprep images photo1.jpg "Müller Café.png" -o out/assets

  # Same, but every output named from one prefix (later files overwrite!)
  assetprep images *.jpg -o out/assets --prefix spring-sale

  # Extract pages 2-4; destination name is suggested from the source
  assetprep pdf "Bericht März.pdf" --from 2 --to 4

  # Extract to an explicit path (stem is normalised, extension forced to .pdf)
  assetprep pdf report.pdf --from 1 --to 10 -o "Quarterly Report.pdf"

  # Page count only, no write
  assetprep pdf report.pdf --inspect-only

  # Structured report for scripting
  assetprep images photo.jpg -o out --json

OUTPUT NAMING:
  Filenames are lowercased, diacritics are transliterated (ä→a, ß→ss, …),
  and anything outside [a-z0-9_-] becomes a single dash:
    "Bericht März.pdf" + pages 2-4  →  bericht-marz-pages-2-to-4.pdf
    "Müller Café.png"               →  muller-cafe_thumb.webp + muller-cafe.webp
"#;

/// Prepare web image assets and extract PDF page ranges.
#[derive(Parser, Debug)]
#[command(
    name = "assetprep",
    version,
    about = "Batch-prepare web image assets (crop + resize to WebP) and extract PDF page ranges",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output a structured JSON report instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize and crop images into the two fixed WebP variants.
    Images {
        /// Source images (JPEG/PNG/GIF/BMP/WebP).
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory the derived files are written into.
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Name every output from this prefix instead of each file's stem.
        /// All images then share one pair of output names; later images
        /// overwrite earlier ones.
        #[arg(short, long)]
        prefix: Option<String>,

        /// Lossy WebP quality (0–100].
        #[arg(long, default_value_t = 85.0)]
        quality: f32,
    },

    /// Extract an inclusive page range from a PDF into a new file.
    Pdf {
        /// Source PDF.
        source: PathBuf,

        /// First page to keep (1-based).
        #[arg(long)]
        from: Option<String>,

        /// Last page to keep (1-based, inclusive).
        #[arg(long)]
        to: Option<String>,

        /// Destination path. Stem is normalised and the extension forced to
        /// .pdf. Defaults to `<normalised stem>-pages-<from>-to-<to>.pdf`
        /// next to the source.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the page count and PDF version, write nothing.
        #[arg(long)]
        inspect_only: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Images {
            ref files,
            ref output_dir,
            ref prefix,
            quality,
        } => run_images(&cli, files, output_dir, prefix.as_deref(), quality),
        Command::Pdf {
            ref source,
            ref from,
            ref to,
            ref output,
            inspect_only,
        } => run_pdf(
            &cli,
            source,
            from.as_deref(),
            to.as_deref(),
            output.as_deref(),
            inspect_only,
        ),
    }
}

fn run_images(
    cli: &Cli,
    files: &[PathBuf],
    output_dir: &Path,
    prefix: Option<&str>,
    quality: f32,
) -> Result<()> {
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;

    let mut builder = BatchConfig::builder(output_dir).webp_quality(quality);
    if let Some(p) = prefix {
        builder = builder.prefix(p);
    }
    if show_progress {
        let cb = CliProgressCallback::new();
        builder = builder.progress_callback(cb as ProgressCallback);
    }
    let config = builder.build().context("Invalid configuration")?;

    let batch = process_images(files, &config).context("Image batch failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&batch).context("Failed to serialise batch report")?
        );
    } else if !cli.quiet && !show_progress {
        // The progress callback already printed the summary otherwise.
        eprintln!(
            "Processed {}/{} images into {} ({}ms)",
            batch.stats.processed_items,
            batch.stats.total_items,
            output_dir.display(),
            batch.stats.total_duration_ms
        );
        for failure in batch.failures() {
            if let Some(ref e) = failure.error {
                eprintln!("  failed: {e}");
            }
        }
    }

    if batch.stats.processed_items == 0 && batch.stats.total_items > 0 {
        bail!("all {} images failed", batch.stats.total_items);
    }
    Ok(())
}

fn run_pdf(
    cli: &Cli,
    source: &Path,
    from: Option<&str>,
    to: Option<&str>,
    output: Option<&Path>,
    inspect_only: bool,
) -> Result<()> {
    if inspect_only {
        let info = inspect(source)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("File:         {}", source.display());
            println!("Pages:        {}", info.page_count);
            println!("PDF Version:  {}", info.version);
        }
        return Ok(());
    }

    let (Some(from), Some(to)) = (from, to) else {
        bail!("--from and --to are required unless --inspect-only is set");
    };
    let start = parse_page_number(from)?;
    let end = parse_page_number(to)?;

    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let name = suggested_filename(source, start, end);
            match source.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
                _ => PathBuf::from(name),
            }
        }
    };

    let report = extract_pages(source, start, end, &destination)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        eprintln!(
            "{} Extracted pages {}–{} ({} of {} pages) → {}",
            green("✔"),
            start,
            end,
            report.pages_written,
            report.source_pages,
            bold(&report.destination.display().to_string()),
        );
    }
    Ok(())
}
