//! Shell configuration and the web view configuration derived from it.
//!
//! [`ShellConfig`] is the on-disk/user-facing surface. It is turned into a
//! [`WebViewConfiguration`] exactly once at startup; that value, together with
//! the single [`ProcessPool`], is shared by the main session and every auth
//! flow.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, ShellError};

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| Url::parse("https://dwlocal.ngrok.io").expect("DEFAULT_BASE_URL should parse"));
static DEFAULT_AUTH_SUCCESS_URL: LazyLock<Url> =
	LazyLock::new(|| Url::parse("https://dwlocal.ngrok.io/").expect("DEFAULT_AUTH_SUCCESS_URL should parse"));
const DEFAULT_AUTH_PATHS: [&str; 2] = ["/users/auth/twitter", "/users/auth/spotify"];
const DEFAULT_APP_NAME: &str = "Droptune";
const DEFAULT_AUTH_TITLE: &str = "Sign in";
const UNKNOWN_VERSION: &str = "Unknown";

/// User-facing shell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
	/// Root page loaded when the shell starts.
	pub base_url: Url,
	/// Exact URL paths that start an auth flow instead of a visit.
	pub auth_paths: Vec<String>,
	/// URL that marks a finished auth handshake.
	pub auth_success_url: Url,
	/// Name used in the user agent and as the alert title.
	pub app_name: String,
	/// Marketing version, rendered as `Unknown` when absent.
	pub version: Option<String>,
	/// Build number, rendered as `Unknown` when absent.
	pub build: Option<String>,
	/// Name page content posts script messages under.
	pub message_handler_name: String,
	/// Title shown above the auth flow.
	pub auth_title: String,
}

impl Default for ShellConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.clone(),
			auth_paths: DEFAULT_AUTH_PATHS.iter().map(|p| (*p).to_string()).collect(),
			auth_success_url: DEFAULT_AUTH_SUCCESS_URL.clone(),
			app_name: DEFAULT_APP_NAME.to_string(),
			version: None,
			build: None,
			message_handler_name: DEFAULT_APP_NAME.to_string(),
			auth_title: DEFAULT_AUTH_TITLE.to_string(),
		}
	}
}

impl ShellConfig {
	/// Loads and validates a JSON configuration file.
	pub fn from_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|source| ShellError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;
		let config: Self = serde_json::from_str(&content)?;
		config.validate()?;
		debug!(target = "droptune", path = %path.display(), base_url = %config.base_url, "loaded shell config");
		Ok(config)
	}

	/// Rejects auth paths that could never equal a URL path.
	pub fn validate(&self) -> Result<()> {
		for path in &self.auth_paths {
			if path.is_empty() {
				return Err(ShellError::Config("auth path must not be empty".into()));
			}
			if !path.starts_with('/') {
				return Err(ShellError::Config(format!("auth path {path:?} must start with '/'")));
			}
		}
		Ok(())
	}

	/// Sets the version/build pair reported in the user agent.
	pub fn with_version(mut self, version: impl Into<String>, build: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self.build = Some(build.into());
		self
	}

	/// User agent suffix composed from the app name, version and build.
	pub fn user_agent(&self) -> String {
		format!(
			"{} - MobileApp iOS - version::{} Build({})",
			self.app_name,
			self.version.as_deref().unwrap_or(UNKNOWN_VERSION),
			self.build.as_deref().unwrap_or(UNKNOWN_VERSION),
		)
	}

	/// Whether `url` should be handled by an auth flow.
	pub fn is_auth_path(&self, url: &Url) -> bool {
		self.auth_paths.iter().any(|path| path == url.path())
	}
}

static PROCESS_POOL: LazyLock<Arc<ProcessPool>> = LazyLock::new(|| {
	debug!(target = "droptune", "creating web view process pool");
	Arc::new(ProcessPool { _private: () })
});

/// Rendering resource shared by every web view in the process.
///
/// Holding one pool keeps cookie and storage contexts common to the main
/// session and auth flows. There is exactly one per process.
#[derive(Debug)]
pub struct ProcessPool {
	_private: (),
}

impl ProcessPool {
	/// Returns the process-wide pool, creating it on first use.
	pub fn shared() -> Arc<Self> {
		Arc::clone(&PROCESS_POOL)
	}
}

/// Web view settings captured once at startup.
#[derive(Debug, Clone)]
pub struct WebViewConfiguration {
	pub user_agent: String,
	pub message_handler_name: String,
	pub process_pool: Arc<ProcessPool>,
}

impl WebViewConfiguration {
	pub fn new(config: &ShellConfig, process_pool: Arc<ProcessPool>) -> Self {
		Self {
			user_agent: config.user_agent(),
			message_handler_name: config.message_handler_name.clone(),
			process_pool,
		}
	}
}
