//! Error types for the shell core.
//!
//! Visit failures are not represented here: they are data routed to the
//! failing slot. These variants cover setup and plumbing problems only.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or driving the shell.
#[derive(Debug, Error)]
pub enum ShellError {
	#[error("Invalid configuration: {0}")]
	Config(String),

	#[error("Failed to read {path}: {source}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid URL: {0}")]
	Url(#[from] url::ParseError),

	#[error("Shell event loop has shut down")]
	ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ShellError>;
