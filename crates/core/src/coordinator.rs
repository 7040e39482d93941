//! Navigation coordinator.
//!
//! The coordinator is the only component that mutates the navigation stack.
//! It receives every visit proposal and every visit outcome from the session,
//! decides what each one means, and tells the presenter what to show.
//!
//! # Routing
//!
//! 1. A proposed visit whose URL path is one of the configured auth paths
//!    opens an [`AuthFlow`] modally; the stack is untouched.
//! 2. Any other proposal pushes (`advance`) or swaps the top of (`replace`)
//!    the stack, then asks the session to fetch the new slot.
//! 3. Failures are mapped through [`ErrorCatalog`] and shown on the failing
//!    slot only. Unrecognized failures are ignored.
//!
//! All methods take `&mut self`; calls are serialized by the owner, usually
//! [`Shell`](crate::shell::Shell).

use std::sync::Arc;

use droptune_protocol::{ScriptMessageName, VisitAction, VisitFailure};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{AuthDelegate, AuthFlow, AuthFlowState, FlowId, NavigationPolicy};
use crate::bridge::ScriptEvent;
use crate::catalog::ErrorCatalog;
use crate::config::{ShellConfig, WebViewConfiguration};
use crate::presenter::{Alert, PageLoader, Presenter};
use crate::session::{Renderer, Session};
use crate::slot::{NavigationStack, RenderState, SlotId};

/// How a proposed visit is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitClass {
	Auth,
	Standard,
}

/// Native-side collaborators injected into the coordinator.
pub struct HostParts {
	pub renderer: Box<dyn Renderer>,
	pub presenter: Box<dyn Presenter>,
	pub auth_loader: Box<dyn PageLoader>,
}

pub struct NavigationCoordinator {
	config: ShellConfig,
	session: Session,
	stack: NavigationStack,
	presenter: Box<dyn Presenter>,
	auth_loader: Box<dyn PageLoader>,
	auth_delegate: Arc<dyn AuthDelegate>,
	auth_flow: Option<AuthFlow>,
	next_flow_id: u64,
}

impl NavigationCoordinator {
	pub fn new(config: ShellConfig, configuration: Arc<WebViewConfiguration>, parts: HostParts, auth_delegate: Arc<dyn AuthDelegate>) -> Self {
		Self {
			config,
			session: Session::new(parts.renderer, configuration),
			stack: NavigationStack::new(),
			presenter: parts.presenter,
			auth_loader: parts.auth_loader,
			auth_delegate,
			auth_flow: None,
			next_flow_id: 0,
		}
	}

	pub fn config(&self) -> &ShellConfig {
		&self.config
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn stack(&self) -> &NavigationStack {
		&self.stack
	}

	/// The auth flow currently presented, if any.
	pub fn auth_flow(&self) -> Option<&AuthFlow> {
		self.auth_flow.as_ref()
	}

	pub fn classify(&self, url: &Url) -> VisitClass {
		if self.config.is_auth_path(url) {
			VisitClass::Auth
		} else {
			VisitClass::Standard
		}
	}

	/// Routes a visit proposed by the rendering engine.
	pub fn propose_visit(&mut self, url: Url, action: VisitAction) -> VisitClass {
		info!(target = "droptune", url = %url, %action, "attempted visit");

		let class = self.classify(&url);
		match class {
			VisitClass::Auth => self.present_auth_flow(url),
			VisitClass::Standard => self.present_visitable(url, action),
		}
		class
	}

	fn present_visitable(&mut self, url: Url, action: VisitAction) {
		let slot = match action {
			VisitAction::Advance => {
				let slot = self.stack.push(url);
				self.presenter.push_slot(slot, true);
				slot
			}
			VisitAction::Replace => {
				let (removed, slot) = self.stack.replace_top(url);
				if let Some(removed) = removed {
					debug!(target = "droptune", slot = %removed.id(), "replaced slot");
					self.presenter.pop_slot(removed.id(), false);
					if self.session.request_finished(removed.id()) {
						self.presenter.activity_changed(false);
					}
				}
				self.presenter.push_slot(slot, false);
				slot
			}
		};
		self.session.visit(slot);
	}

	fn present_auth_flow(&mut self, url: Url) {
		if let Some(mut previous) = self.auth_flow.take() {
			if previous.dismiss() {
				debug!(target = "droptune.auth", flow = %previous.id(), "superseding auth flow");
				self.presenter.dismiss_auth(previous.id());
			}
		}

		self.next_flow_id += 1;
		let mut flow = AuthFlow::new(
			FlowId(self.next_flow_id),
			url,
			self.config.auth_success_url.clone(),
			self.config.auth_title.clone(),
			Arc::clone(self.session.configuration()),
			Arc::clone(&self.auth_delegate),
		);
		self.presenter.present_auth(&flow);
		flow.enter(&mut *self.auth_loader);
		self.auth_flow = Some(flow);
	}

	pub fn visit_started(&mut self, slot: SlotId) {
		if self.stack.get(slot).is_none() {
			debug!(target = "droptune.session", %slot, "ignoring start for slot no longer on the stack");
			return;
		}
		debug!(target = "droptune.session", %slot, "visit started");
		if self.session.request_started(slot) {
			self.presenter.activity_changed(true);
		}
	}

	pub fn visit_finished(&mut self, slot: SlotId) {
		debug!(target = "droptune.session", %slot, "visit finished");
		self.settle(slot);
		if let Some(slot) = self.stack.get_mut(slot) {
			slot.finish();
		}
	}

	/// Removes `slot` from the in-flight set, finished or abandoned.
	fn settle(&mut self, slot: SlotId) {
		if self.session.request_finished(slot) {
			self.presenter.activity_changed(false);
		}
	}

	/// Installs error content on the failing slot.
	///
	/// Returns `true` when an overlay was shown.
	pub fn visit_failed(&mut self, slot: SlotId, failure: &VisitFailure) -> bool {
		warn!(target = "droptune.session", %slot, code = failure.code, status = ?failure.status_code, "visit failed");

		let Some(content) = ErrorCatalog::lookup(failure) else {
			debug!(target = "droptune.session", %slot, code = failure.code, "ignoring unrecognized failure");
			return false;
		};
		let Some(target) = self.stack.get_mut(slot) else {
			debug!(target = "droptune.session", %slot, "failed slot is no longer on the stack");
			return false;
		};

		target.present_error(content);
		if let Some(content) = target.error() {
			self.presenter.show_error(slot, content);
		}
		true
	}

	/// Clears the overlay of an errored slot and fetches its URL again.
	pub fn retry(&mut self, slot: SlotId) -> bool {
		let Some(target) = self.stack.get_mut(slot) else {
			debug!(target = "droptune", %slot, "retry for slot no longer on the stack");
			return false;
		};
		if !target.retry() {
			return false;
		}
		info!(target = "droptune", %slot, url = %target.url(), "retrying visit");
		self.presenter.hide_error(slot);
		self.session.visit(target);
		true
	}

	/// Forgets a slot the container popped through back navigation.
	pub fn slot_popped(&mut self, slot: SlotId) -> bool {
		match self.stack.pop_top(slot) {
			Some(_) => {
				debug!(target = "droptune", %slot, depth = self.stack.depth(), "slot popped");
				self.settle(slot);
				true
			}
			None => {
				debug!(target = "droptune", %slot, "ignoring pop of slot that is not a removable top");
				false
			}
		}
	}

	pub fn external_url_requested(&mut self, url: &Url) {
		info!(target = "droptune", %url, "opening external URL");
		self.presenter.present_external(url);
	}

	/// Parses and handles a script message body. Malformed bodies are dropped.
	pub fn script_message(&mut self, body: &Value) {
		if let Some(event) = ScriptEvent::parse(body) {
			self.script_event(&event);
		}
	}

	pub fn script_event(&mut self, event: &ScriptEvent) {
		match event.name {
			ScriptMessageName::ErrorRaised => {
				let error = event.string("error").unwrap_or("<unknown error>");
				warn!(target = "droptune.bridge", %error, "JavaScript error");

				if let Some(message) = event.string("alert").filter(|alert| !alert.is_empty()) {
					let alert = Alert::new(self.config.app_name.clone(), message);
					self.presenter.present_alert(&alert);
				}
			}
		}
	}

	/// Answers a navigation attempted inside the auth flow `flow`.
	pub fn auth_navigation(&mut self, flow: FlowId, url: &Url) -> NavigationPolicy {
		match self.auth_flow.as_mut().filter(|active| active.id() == flow) {
			Some(active) => active.decide_policy(url),
			None => {
				debug!(target = "droptune.auth", %flow, %url, "navigation for inactive auth flow");
				NavigationPolicy::Cancel
			}
		}
	}

	/// Closes a completed auth flow and reloads the current page.
	pub fn auth_completed(&mut self, flow: FlowId) -> bool {
		let completed = self
			.auth_flow
			.as_ref()
			.is_some_and(|active| active.id() == flow && active.state() == AuthFlowState::Completed);
		if !completed {
			debug!(target = "droptune.auth", %flow, "ignoring completion of inactive auth flow");
			return false;
		}

		self.auth_flow = None;
		info!(target = "droptune.auth", %flow, "authenticated; reloading session");
		if let Some(top) = self.stack.top_mut() {
			let errored = top.state() == RenderState::Errored;
			top.reload();
			if errored {
				self.presenter.hide_error(top.id());
			}
		}
		self.session.reload();
		self.presenter.dismiss_auth(flow);
		true
	}

	/// Records that the container closed the auth flow without completing it.
	pub fn auth_dismissed(&mut self, flow: FlowId) -> bool {
		let Some(active) = self.auth_flow.as_mut().filter(|active| active.id() == flow) else {
			return false;
		};
		if !active.dismiss() {
			return false;
		}
		debug!(target = "droptune.auth", %flow, "auth flow dismissed");
		self.auth_flow = None;
		true
	}
}
