use std::path::PathBuf;

use droptune::ShellError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
	#[error(transparent)]
	Shell(#[from] ShellError),

	#[error("Failed to read script {path}: {source}")]
	Script {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Line {line}: invalid message: {source}")]
	Message {
		line: usize,
		#[source]
		source: serde_json::Error,
	},

	#[error("Shell task failed: {0}")]
	Task(#[from] tokio::task::JoinError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReplayError>;
