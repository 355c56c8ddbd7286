//! Annotation configuration.
//!
//! Configuration is written in TOML. Every field has a default, so an empty
//! document is a valid configuration:
//!
//! ```toml
//! max_expansion_depth = 10
//!
//! [classes]
//! base = "env-highlight"
//! found = "bg-accentDark"
//! not_found = "bg-red-500"
//!
//! [tooltip]
//! hover_delay_ms = 1
//! above = true
//! arrow = true
//! class = "tooltip-theme"
//! unknown_source_label = "choose an environment"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use envlens_mapping::{DEFAULT_MAX_DEPTH, DEFAULT_UNKNOWN_LABEL};
use serde::Deserialize;
use thiserror::Error;

use crate::decoration::HighlightStyle;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unknown/mistyped field.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// CSS classes attached to highlight spans.
///
/// Both states share `base` so they differ only in colour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightClasses {
	pub base: String,
	pub found: String,
	pub not_found: String,
}

impl Default for HighlightClasses {
	fn default() -> Self {
		Self {
			base: "cursor-help transition rounded px-1 focus:outline-none mx-0.5 env-highlight".into(),
			found: "bg-accentDark text-accentContrast hover:bg-accent".into(),
			not_found: "bg-red-500 text-accentContrast hover:bg-red-600".into(),
		}
	}
}

impl HighlightClasses {
	/// Returns the full class string for a highlight state.
	pub fn class_for(&self, style: HighlightStyle) -> String {
		let state = match style {
			HighlightStyle::Found => &self.found,
			HighlightStyle::NotFound => &self.not_found,
		};
		format!("{} {state}", self.base)
	}
}

/// Tooltip display policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipOptions {
	/// Hover activation delay in milliseconds.
	pub hover_delay_ms: u64,
	pub above: bool,
	pub arrow: bool,
	pub class: String,
	/// Label shown for environment references with no known source.
	pub unknown_source_label: String,
}

impl Default for TooltipOptions {
	fn default() -> Self {
		Self {
			hover_delay_ms: 1,
			above: true,
			arrow: true,
			class: "tooltip-theme".into(),
			unknown_source_label: DEFAULT_UNKNOWN_LABEL.into(),
		}
	}
}

impl TooltipOptions {
	pub fn hover_delay(&self) -> Duration {
		Duration::from_millis(self.hover_delay_ms)
	}
}

/// Top-level annotation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotateConfig {
	pub classes: HighlightClasses,
	pub tooltip: TooltipOptions,
	/// Nesting limit for recursive placeholder expansion in tooltips.
	pub max_expansion_depth: usize,
}

impl Default for AnnotateConfig {
	fn default() -> Self {
		Self {
			classes: HighlightClasses::default(),
			tooltip: TooltipOptions::default(),
			max_expansion_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl AnnotateConfig {
	/// Parses configuration from a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Loads configuration from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&input)?;
		tracing::debug!(path = %path.display(), "Loaded annotation config");
		Ok(config)
	}
}
