//! Modal authentication flow.
//!
//! An [`AuthFlow`] loads an identity provider page in its own web view and
//! watches every navigation that view attempts. Reaching the configured
//! success URL cancels that navigation and notifies the owner once; the flow
//! is spent afterwards.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::config::WebViewConfiguration;
use crate::presenter::PageLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(pub u64);

impl fmt::Display for FlowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "auth#{}", self.0)
	}
}

/// Answer to a navigation attempted inside the flow's web view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
	Allow,
	Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlowState {
	Created,
	Loading,
	Completed,
	Dismissed,
}

/// Receives the single completion signal of a flow.
pub trait AuthDelegate: Send + Sync {
	fn did_authenticate(&self, flow: FlowId);
}

pub struct AuthFlow {
	id: FlowId,
	target_url: Url,
	success_url: Url,
	title: String,
	configuration: Arc<WebViewConfiguration>,
	delegate: Arc<dyn AuthDelegate>,
	state: AuthFlowState,
}

impl fmt::Debug for AuthFlow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthFlow")
			.field("id", &self.id)
			.field("target_url", &self.target_url.as_str())
			.field("success_url", &self.success_url.as_str())
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

impl AuthFlow {
	pub fn new(
		id: FlowId,
		target_url: Url,
		success_url: Url,
		title: impl Into<String>,
		configuration: Arc<WebViewConfiguration>,
		delegate: Arc<dyn AuthDelegate>,
	) -> Self {
		Self {
			id,
			target_url,
			success_url,
			title: title.into(),
			configuration,
			delegate,
			state: AuthFlowState::Created,
		}
	}

	pub fn id(&self) -> FlowId {
		self.id
	}

	pub fn target_url(&self) -> &Url {
		&self.target_url
	}

	pub fn success_url(&self) -> &Url {
		&self.success_url
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn state(&self) -> AuthFlowState {
		self.state
	}

	/// True until the flow completes or is dismissed.
	pub fn is_live(&self) -> bool {
		matches!(self.state, AuthFlowState::Created | AuthFlowState::Loading)
	}

	/// Loads the target URL. Only the first call has an effect.
	pub fn enter(&mut self, loader: &mut dyn PageLoader) {
		if self.state != AuthFlowState::Created {
			return;
		}
		debug!(target = "droptune.auth", flow = %self.id, url = %self.target_url, "loading auth page");
		self.state = AuthFlowState::Loading;
		loader.load(self.id, &self.target_url, &self.configuration);
	}

	/// Decides whether the flow's web view may navigate to `url`.
	///
	/// The exact success URL is cancelled and completes the flow. A spent
	/// flow cancels everything and never signals again.
	pub fn decide_policy(&mut self, url: &Url) -> NavigationPolicy {
		if !self.is_live() {
			debug!(target = "droptune.auth", flow = %self.id, %url, state = ?self.state, "navigation in spent auth flow");
			return NavigationPolicy::Cancel;
		}

		if *url == self.success_url {
			info!(target = "droptune.auth", flow = %self.id, "auth flow reached success URL");
			self.state = AuthFlowState::Completed;
			self.delegate.did_authenticate(self.id);
			return NavigationPolicy::Cancel;
		}

		NavigationPolicy::Allow
	}

	/// Closes the flow without completing it.
	pub fn dismiss(&mut self) -> bool {
		if !self.is_live() {
			return false;
		}
		self.state = AuthFlowState::Dismissed;
		true
	}
}
