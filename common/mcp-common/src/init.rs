//! Server initialization utilities
//!
//! Tracing is configured from an explicit [`LogSettings`] value built by the
//! binary's `main`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging settings resolved by the server binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Crate target that receives the configured level (e.g. "n8n_mcp")
    pub crate_name: String,
    /// Level directive for the crate target: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl LogSettings {
    pub fn new(crate_name: impl Into<String>) -> Self {
        Self {
            crate_name: crate_name.into(),
            level: "info".to_string(),
            json: false,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// The `EnvFilter` directive for this crate, e.g. `n8n_mcp=debug`
    pub fn directive(&self) -> String {
        format!("{}={}", self.crate_name, self.level.to_ascii_lowercase())
    }
}

/// Initialize tracing/logging for an MCP server
///
/// Logs always go to stderr; stdout is reserved for the MCP protocol.
/// `RUST_LOG` directives are honored in addition to the crate directive.
pub fn init_tracing(settings: &LogSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(settings.directive().parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    if settings.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
