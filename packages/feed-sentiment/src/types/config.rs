//! Pipeline configuration and source specifications.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default classification model (multilingual, three-way).
pub const DEFAULT_MODEL: &str = "cardiffnlp/twitter-xlm-roberta-base-sentiment";

/// Model tried when the configured one cannot be loaded.
pub const DEFAULT_FALLBACK_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Feeds appended unless a configured source already points at their host.
///
/// Pairs of (host marker, feed URL).
pub const DEFAULT_FEEDS: [(&str, &str); 2] = [
    ("rss.dw.com", "https://rss.dw.com/rdf/rss-en-all"),
    ("tagesschau.de", "https://www.tagesschau.de/xml/rss2"),
];

/// Texts analysed with `--source sample`, and substituted when every live
/// source comes back empty.
pub const SAMPLE_TEXTS: [&str; 4] = [
    "Oktoberfest opening day is buzzing with excitement and sunshine!",
    "Long lines at the Wiesn today, but the beer tents are worth it.",
    "Prices feel higher this year at Oktoberfest, not thrilled.",
    "Fantastic live music and great crowd energy at the festival!",
];

/// Where the pipeline takes its texts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Pull from feeds, falling back to the sample when all are empty
    #[default]
    News,
    /// Analyse the static sample only
    Sample,
}

/// One pull endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    /// An explicit feed URL
    Feed { url: String },
    /// A keyword search, synthesized into one news-search feed
    Keywords { terms: Vec<String>, lang: String },
}

impl SourceSpec {
    pub fn feed(url: impl Into<String>) -> Self {
        SourceSpec::Feed { url: url.into() }
    }

    pub fn keywords(
        terms: impl IntoIterator<Item = impl Into<String>>,
        lang: impl Into<String>,
    ) -> Self {
        SourceSpec::Keywords {
            terms: terms.into_iter().map(Into::into).collect(),
            lang: lang.into(),
        }
    }

    /// The URL this source is pulled from.
    pub fn url(&self) -> String {
        match self {
            SourceSpec::Feed { url } => url.clone(),
            SourceSpec::Keywords { terms, lang } => keyword_feed_url(terms, lang),
        }
    }
}

/// Build a Google News search feed URL OR-ing all terms.
fn keyword_feed_url(terms: &[String], lang: &str) -> String {
    let query = terms
        .iter()
        .map(|term| {
            term.split_whitespace()
                .map(|word| url::form_urlencoded::byte_serialize(word.as_bytes()).collect::<String>())
                .collect::<Vec<_>>()
                .join("+")
        })
        .filter(|term| !term.is_empty())
        .collect::<Vec<_>>()
        .join("+OR+");
    let region = lang.to_uppercase();
    format!(
        "https://news.google.com/rss/search?q={}&hl={}&gl={}&ceid={}:{}",
        query, lang, region, region, lang
    )
}

/// Configuration for one pipeline run.
///
/// Built once at the entry point and passed in; the pipeline reads no
/// process-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Live feeds or the static sample.
    pub input: InputMode,

    /// Explicit feed URLs, fetched in this order.
    #[serde(default)]
    pub feeds: Vec<String>,

    /// Search keywords, synthesized into one feed after the explicit ones.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Language/region code for keyword searches.
    pub lang: String,

    /// Append [`DEFAULT_FEEDS`] not already covered by `feeds`.
    ///
    /// Default: true.
    pub include_default_feeds: bool,

    /// Upper bound on fetched and normalized items.
    ///
    /// Default: 60.
    pub max_items: usize,

    /// Time budget per source fetch, in milliseconds.
    ///
    /// Default: 15000.
    pub source_timeout_ms: u64,

    /// Sources fetched at once.
    ///
    /// Default: 4.
    pub fetch_concurrency: usize,

    /// Length of each per-label ranking.
    ///
    /// Default: 10.
    pub top_k: usize,

    /// Sample texts for [`InputMode::Sample`] and the empty-fetch fallback.
    pub sample: Vec<String>,

    /// Classification model identifier.
    pub model: String,

    /// Model tried when `model` fails to load.
    pub fallback_model: Option<String>,

    /// Directory the export collaborator writes to.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: InputMode::News,
            feeds: Vec::new(),
            keywords: Vec::new(),
            lang: "de".to_string(),
            include_default_feeds: true,
            max_items: 60,
            source_timeout_ms: 15_000,
            fetch_concurrency: 4,
            top_k: 10,
            sample: SAMPLE_TEXTS.iter().map(|s| s.to_string()).collect(),
            model: DEFAULT_MODEL.to_string(),
            fallback_model: Some(DEFAULT_FALLBACK_MODEL.to_string()),
            output_dir: Self::timestamped_output_dir(),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// `out-YYYYMMDD-HHMMSS` for the current local time.
    pub fn timestamped_output_dir() -> PathBuf {
        PathBuf::from(format!(
            "out-{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    }

    /// Set the input mode.
    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }

    /// Set explicit feeds.
    pub fn with_feeds(mut self, feeds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.feeds = feeds.into_iter().map(Into::into).collect();
        self
    }

    /// Set search keywords.
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the keyword-search language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Disable the built-in default feeds.
    pub fn without_default_feeds(mut self) -> Self {
        self.include_default_feeds = false;
        self
    }

    /// Set the item cap.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Set the per-source timeout.
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    /// Set fetch concurrency.
    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = concurrency;
        self
    }

    /// Set the ranking length.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Replace the sample texts.
    pub fn with_sample(mut self, sample: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sample = sample.into_iter().map(Into::into).collect();
        self
    }

    /// Set the classification model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set or clear the fallback model.
    pub fn with_fallback_model(mut self, model: Option<String>) -> Self {
        self.fallback_model = model;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Per-source timeout as a duration.
    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    /// Sources in fetch order: explicit feeds, then the keyword search, then
    /// any default feed whose host is not already configured.
    pub fn source_specs(&self) -> Vec<SourceSpec> {
        let mut specs: Vec<SourceSpec> = self.feeds.iter().map(SourceSpec::feed).collect();

        if self.keywords.iter().any(|k| !k.trim().is_empty()) {
            specs.push(SourceSpec::keywords(self.keywords.clone(), self.lang.clone()));
        }

        if self.include_default_feeds {
            for (marker, url) in DEFAULT_FEEDS {
                if !self.feeds.iter().any(|f| f.contains(marker)) {
                    specs.push(SourceSpec::feed(url));
                }
            }
        }

        specs
    }
}
