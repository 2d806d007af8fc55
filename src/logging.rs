//! Logging setup for service-locator
//!
//! The container emits `tracing` events under the `service_locator` target:
//! registrations, eager construction and clears at DEBUG, lookups and cache
//! hits at TRACE. This module installs a `tracing-subscriber` pipeline to
//! print them.
//!
//! # Features
//!
//! - `logging` - emit events (default)
//! - `logging-json` - JSON structured output (recommended for production)
//! - `logging-pretty` - colorful multi-line output (recommended for development)
//!
//! Without either subscriber feature the `init*` functions do nothing.
//!
//! # Example
//!
//! ```rust,ignore
//! use service_locator::logging::{self, LogFormat};
//!
//! // JSON if logging-json, pretty if only logging-pretty
//! logging::init();
//!
//! // Or configure explicitly
//! logging::builder()
//!     .trace()
//!     .locator_only()
//!     .format(LogFormat::Compact)
//!     .with_threads()
//!     .try_init()
//!     .expect("subscriber already installed");
//! ```

use tracing::Level;

/// Target used by every event this crate emits
pub const TARGET: &str = "service_locator";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Multi-line, colored
    Pretty,
    /// One line per event
    Compact,
}

/// Extra context printed with each event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decorations {
    /// Source file and line of the call site
    pub source_location: bool,
    /// Numeric id of the emitting thread
    pub thread_ids: bool,
    /// Name of the emitting thread, if set
    pub thread_names: bool,
}

/// Builder for the subscriber pipeline
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    level: Level,
    format: LogFormat,
    target: Option<&'static str>,
    from_env: bool,
    decorations: Decorations,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::default(),
            target: None,
            from_env: true,
            decorations: Decorations::default(),
        }
    }
}

impl LoggingBuilder {
    /// DEBUG, JSON, every target, `RUST_LOG` honored
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum level
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Lookups and cache hits included
    pub fn trace(self) -> Self {
        self.level(Level::TRACE)
    }

    /// Registrations, construction and clears
    pub fn debug(self) -> Self {
        self.level(Level::DEBUG)
    }

    /// Only show events from `target`
    pub fn filter_target(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    /// Only show service-locator events
    pub fn locator_only(self) -> Self {
        self.filter_target(TARGET)
    }

    /// Ignore `RUST_LOG` and use the configured level and target only.
    ///
    /// By default a valid `RUST_LOG` takes precedence.
    pub fn ignore_env(mut self) -> Self {
        self.from_env = false;
        self
    }

    /// Choose the output format
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace all decorations at once
    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    /// Print file and line of each event
    pub fn with_source_location(mut self) -> Self {
        self.decorations.source_location = true;
        self
    }

    /// Print thread id and name; useful when resolving from worker pools
    pub fn with_threads(mut self) -> Self {
        self.decorations.thread_ids = true;
        self.decorations.thread_names = true;
        self
    }

    /// The `EnvFilter` directive built from level and target
    pub fn directive(&self) -> String {
        match self.target {
            Some(target) => format!("{target}={}", self.level),
            None => self.level.to_string(),
        }
    }

    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        use tracing_subscriber::EnvFilter;

        if self.from_env {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return filter;
            }
        }
        EnvFilter::new(self.directive())
    }

    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    fn decorate<S, N, L, T, W>(
        &self,
        layer: tracing_subscriber::fmt::Layer<S, N, tracing_subscriber::fmt::format::Format<L, T>, W>,
    ) -> tracing_subscriber::fmt::Layer<S, N, tracing_subscriber::fmt::format::Format<L, T>, W>
    where
        N: for<'writer> tracing_subscriber::fmt::FormatFields<'writer> + 'static,
    {
        let Decorations {
            source_location,
            thread_ids,
            thread_names,
        } = self.decorations;

        layer
            .with_file(source_location)
            .with_line_number(source_location)
            .with_thread_ids(thread_ids)
            .with_thread_names(thread_names)
            .with_target(true)
    }

    /// Install the subscriber as the global default.
    ///
    /// Fails if another global subscriber is already installed.
    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    pub fn try_init(self) -> Result<(), tracing_subscriber::util::TryInitError> {
        use tracing_subscriber::{fmt, prelude::*};

        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            #[cfg(feature = "logging-json")]
            LogFormat::Json => registry.with(self.decorate(fmt::layer().json())).try_init(),
            // Falls back to the default text layer without logging-json
            #[cfg(not(feature = "logging-json"))]
            LogFormat::Json => registry.with(self.decorate(fmt::layer())).try_init(),
            LogFormat::Pretty => registry.with(self.decorate(fmt::layer().pretty())).try_init(),
            LogFormat::Compact => registry.with(self.decorate(fmt::layer().compact())).try_init(),
        }
    }

    /// Install the subscriber, keeping any subscriber already installed.
    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// No-op without a subscriber feature
    #[cfg(not(any(feature = "logging-json", feature = "logging-pretty")))]
    pub fn init(self) {}
}

/// Start configuring a subscriber
pub fn builder() -> LoggingBuilder {
    LoggingBuilder::new()
}

/// JSON when `logging-json` is enabled, otherwise pretty.
pub fn init() {
    #[cfg(feature = "logging-json")]
    init_json();

    #[cfg(not(feature = "logging-json"))]
    init_pretty();
}

/// JSON events at DEBUG
///
/// ```json
/// {"timestamp":"2026-01-01T00:00:00.000Z","level":"DEBUG","fields":{"message":"Registering binding","service":"app::Database","name":"","lifetime":"singleton","timing":"lazy"},"target":"service_locator"}
/// ```
pub fn init_json() {
    builder().format(LogFormat::Json).debug().init();
}

/// Human-readable events at DEBUG
///
/// ```text
///   2026-01-01T00:00:00.000Z DEBUG service_locator: Constructing singleton, service: "app::Database", name: ""
/// ```
pub fn init_pretty() {
    builder().format(LogFormat::Pretty).debug().init();
}

/// Service-locator events only, everything else filtered out
pub fn init_locator_only() {
    builder().locator_only().debug().init();
}
