use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_sentiment::types::config::DEFAULT_MODEL;
use feed_sentiment::{
    write_report, HttpFeedSource, HuggingFaceOracle, InferenceCredentials, InputMode, Label,
    Pipeline, PipelineConfig, RunOutcome,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    News,
    Sample,
}

impl From<SourceArg> for InputMode {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::News => InputMode::News,
            SourceArg::Sample => InputMode::Sample,
        }
    }
}

/// Sentiment analysis over news feeds
#[derive(Debug, Parser)]
#[command(name = "feed-sentiment", version)]
struct Args {
    /// Analyse live feeds or the built-in sample
    #[arg(long, value_enum, default_value = "news")]
    source: SourceArg,

    /// Maximum number of items after deduplication
    #[arg(long, default_value_t = 60)]
    limit: usize,

    /// Feed URLs, comma separated
    #[arg(long, value_delimiter = ',')]
    feeds: Vec<String>,

    /// Keywords for a Google News search feed, comma separated
    #[arg(long, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Language for the keyword search feed
    #[arg(long, default_value = "de")]
    lang: String,

    /// Classification model
    #[arg(long, env = "SENTIMENT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Output directory (default: out-YYYYMMDD-HHMMSS)
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Items per label in the top lists
    #[arg(long, default_value_t = 10)]
    top_k: usize,

    /// Per-source timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Texts per inference request
    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Only use the feeds given with --feeds/--keywords
    #[arg(long)]
    no_default_feeds: bool,
}

impl Args {
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::new()
            .with_input(self.source.into())
            .with_max_items(self.limit)
            .with_feeds(self.feeds)
            .with_keywords(self.keywords)
            .with_lang(self.lang)
            .with_model(self.model)
            .with_top_k(self.top_k)
            .with_source_timeout(Duration::from_secs(self.timeout));

        if let Some(dir) = self.outdir {
            config = config.with_output_dir(dir);
        }
        if self.no_default_feeds {
            config = config.without_default_feeds();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feed_sentiment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let args = Args::parse();
    let batch_size = args.batch_size;
    let config = args.into_config();
    let credentials = InferenceCredentials::from_env();
    if credentials.api_token.is_none() {
        tracing::warn!("HF_API_TOKEN not set; using anonymous inference access");
    }

    let oracle = HuggingFaceOracle::from_config(&config, &credentials)
        .context("Failed to build inference oracle")?
        .with_batch_size(batch_size);
    let source = HttpFeedSource::with_timeout(config.source_timeout())
        .context("Failed to build feed HTTP client")?;
    let output_dir = config.output_dir.clone();
    let pipeline = Pipeline::new(config, source, oracle);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; cancelling run");
            on_signal.cancel();
        }
    });

    let report = match pipeline.run(&cancel).await.context("Pipeline run failed")? {
        RunOutcome::Analyzed(report) => report,
        RunOutcome::NothingToAnalyze => {
            println!("No texts to analyze.");
            return Ok(());
        }
    };

    println!("\n--- Summary ---");
    for label in Label::ALL {
        println!(
            "{}: {} ({:.1}%)",
            label,
            report.summary.count(label),
            report.summary.percentage(label)
        );
    }

    for label in [Label::Positive, Label::Negative] {
        if let Some(ranking) = report.ranking(label).filter(|r| !r.is_empty()) {
            println!("\nTop {} {}:", ranking.len(), label);
            for item in &ranking.items {
                println!("  {:.3}  {}", item.score, item.text);
            }
        }
    }

    write_report(&report, &output_dir)
        .with_context(|| format!("Failed to write report to {}", output_dir.display()))?;
    println!("\nSaved to: {}", output_dir.display());

    Ok(())
}
