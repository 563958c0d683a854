use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use review_dashboard::config::AppConfig;
use review_dashboard::file_writer::{write_view, write_view_json};
use review_dashboard::logging::{init_logging, OperationTimer};
use review_dashboard::models::{OutputFormat, Theme};
use review_dashboard::pipeline::{load_reviews, run_bounded, LoadReport, ReviewPipeline};
use review_dashboard::service::{CountryOrder, DashboardService, ServiceOptions};
use review_dashboard::validation::InputValidator;
use review_dashboard::{SentimentScorer, TextNormalizer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reviews CSV file (overrides configuration)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the countries available to the selector
    Countries,
    /// Compute the dashboard charts for one country
    View {
        /// Country to filter on (defaults to the first option)
        #[arg(short, long)]
        country: Option<String>,

        /// Chart theme (light or dark)
        #[arg(short, long)]
        theme: Option<Theme>,

        /// Number of words per frequency list
        #[arg(long)]
        top_words: Option<usize>,

        /// Write the view to this directory instead of stdout
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format when writing files (json or csv)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Show load statistics for the review table
    Summary,
    /// Clean and score a single piece of text
    Analyze {
        /// Text to analyze
        #[arg(short, long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let log_file = config.logging.file_path.as_deref().map(Path::new);
    let _log_guard = init_logging(
        cli.log_level.as_deref(),
        &config.logging.level,
        &config.logging.format,
        log_file,
    )?;

    info!("Starting review-dashboard");
    let source = config.source_path(cli.source.as_deref());

    match &cli.command {
        Commands::Countries => {
            let service = build_service(&config, &source, None).await?.0;
            emit_json(&service.country_options())?;
        }
        Commands::View {
            country,
            theme,
            top_words,
            output_dir,
            format,
        } => {
            let service = build_service(&config, &source, *top_words).await?.0;
            show_view(&config, &service, country.as_deref(), *theme, output_dir.as_deref(), format)?;
        }
        Commands::Summary => {
            let (service, report) = build_service(&config, &source, None).await?;
            emit_json(&serde_json::json!({
                "source": source,
                "skipped_rows": report.skipped_rows,
                "sentiment_fallbacks": report.sentiment_fallbacks,
                "enrichment_ms": report.duration.as_millis(),
                "table": service.summary(),
                "countries": service.country_options(),
            }))?;
        }
        Commands::Analyze { text } => analyze_text(&config, text)?,
    }

    Ok(())
}

/// Build the scoring pipeline described by the configuration
fn build_pipeline(config: &AppConfig) -> Result<ReviewPipeline> {
    let normalizer = TextNormalizer::new().context("Failed to create text normalizer")?;
    let scorer = SentimentScorer::lexicon().enabled(config.nlp.enable_sentiment);
    Ok(ReviewPipeline::new(normalizer, scorer))
}

/// Load, enrich and wrap the review table; any failure here is fatal
async fn build_service(
    config: &AppConfig,
    source: &Path,
    top_words: Option<usize>,
) -> Result<(DashboardService, LoadReport)> {
    InputValidator::validate_source_path(source)?;

    let top_words = top_words.unwrap_or(config.dashboard.top_words);
    InputValidator::validate_top_words(top_words)?;

    let country_order: CountryOrder = config
        .dashboard
        .country_order
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let timer = OperationTimer::new("load_reviews");
    let batch = load_reviews(source, config.delimiter_byte()?)
        .with_context(|| format!("Failed to load reviews from {}", source.display()))?;

    let limit = Duration::from_secs(config.nlp.processing_timeout_secs);
    let mut report = run_bounded(build_pipeline(config)?, batch, limit)
        .await
        .context("Failed to enrich reviews")?;
    timer.finish();

    if report.skipped_rows > 0 {
        warn!("{} corrupt rows were skipped", report.skipped_rows);
    }
    info!("Loaded {} reviews", report.table.len());

    let options = ServiceOptions {
        top_words,
        country_order,
    };
    let service = DashboardService::new(std::mem::take(&mut report.table), options);
    Ok((service, report))
}

/// Compute one view and print or export it
fn show_view(
    config: &AppConfig, service: &DashboardService, country: Option<&str>, theme: Option<Theme>, output_dir: Option<&Path>,
    format: &str,
) -> Result<()> {
    let country = match country {
        Some(country) => {
            InputValidator::validate_country(country)?;
            country.to_string()
        }
        None => service
            .default_country()
            .context("No countries found in the review table")?
            .to_string(),
    };

    if !service.country_options().iter().any(|c| *c == country) {
        warn!("Country {} has no reviews; charts will be empty", country);
    }

    let theme = match theme {
        Some(theme) => theme,
        None => config
            .dashboard
            .default_theme
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?,
    };

    let view = service.view(&country, theme);

    let Some(output_dir) = output_dir else {
        write_view_json(&view, std::io::stdout().lock())?;
        writeln!(std::io::stdout())?;
        return Ok(());
    };

    InputValidator::validate_output_dir(output_dir)?;
    let output_format = match format.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        _ => {
            warn!("Invalid format: {}. Using json as default.", format);
            OutputFormat::Json
        }
    };

    let files = write_view(&view, output_format, output_dir)?;
    for file in &files {
        info!("Wrote {}", file.display());
    }
    Ok(())
}

/// Normalize and score one string without loading the table
fn analyze_text(config: &AppConfig, text: &str) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let text = InputValidator::sanitize_text(text);
    let cleaned = pipeline.normalizer().normalize(&text);
    let sentiment = pipeline.scorer().score(&cleaned);

    emit_json(&serde_json::json!({
        "text": text,
        "cleaned_text": cleaned,
        "sentiment": sentiment,
    }))
}

/// Write a JSON document to stdout
fn emit_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
