//! Serialized event loop around the coordinator.
//!
//! Inbound calls from the rendering engine, page content and the native
//! container are queued as [`ShellEvent`]s through a [`ShellHandle`] and
//! handled one at a time by [`Shell`]. Auth completion signals travel through
//! the same queue, so they are handled after the intercept decision that
//! produced them rather than re-entrantly.

use std::sync::Arc;

use droptune_protocol::{InboundMessage, VisitAction, VisitFailure};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace};
use url::Url;

use crate::auth::{AuthDelegate, FlowId, NavigationPolicy};
use crate::config::{ProcessPool, ShellConfig, WebViewConfiguration};
use crate::coordinator::{HostParts, NavigationCoordinator};
use crate::error::{Result, ShellError};
use crate::slot::SlotId;

/// Reply channel for an auth navigation decision.
pub type PolicyReply = oneshot::Receiver<NavigationPolicy>;

/// One inbound call, queued for the coordinator.
#[derive(Debug)]
pub enum ShellEvent {
	ProposeVisit { url: Url, action: VisitAction },
	VisitStarted(SlotId),
	VisitFinished(SlotId),
	VisitFailed { slot: SlotId, failure: VisitFailure },
	ExternalUrlRequested(Url),
	ScriptMessage(Value),
	Retry(SlotId),
	SlotPopped(SlotId),
	AuthNavigation {
		flow: FlowId,
		url: Url,
		reply: oneshot::Sender<NavigationPolicy>,
	},
	AuthCompleted(FlowId),
	AuthDismissed(FlowId),
}

/// Cloneable inbound interface of a running [`Shell`].
#[derive(Debug, Clone)]
pub struct ShellHandle {
	tx: mpsc::UnboundedSender<ShellEvent>,
}

impl ShellHandle {
	pub fn send(&self, event: ShellEvent) -> Result<()> {
		self.tx.send(event).map_err(|_| ShellError::ChannelClosed)
	}

	pub fn propose_visit(&self, url: Url, action: VisitAction) -> Result<()> {
		self.send(ShellEvent::ProposeVisit { url, action })
	}

	pub fn visit_started(&self, slot: SlotId) -> Result<()> {
		self.send(ShellEvent::VisitStarted(slot))
	}

	pub fn visit_finished(&self, slot: SlotId) -> Result<()> {
		self.send(ShellEvent::VisitFinished(slot))
	}

	pub fn visit_failed(&self, slot: SlotId, failure: VisitFailure) -> Result<()> {
		self.send(ShellEvent::VisitFailed { slot, failure })
	}

	pub fn external_url_requested(&self, url: Url) -> Result<()> {
		self.send(ShellEvent::ExternalUrlRequested(url))
	}

	pub fn script_message(&self, body: Value) -> Result<()> {
		self.send(ShellEvent::ScriptMessage(body))
	}

	pub fn retry(&self, slot: SlotId) -> Result<()> {
		self.send(ShellEvent::Retry(slot))
	}

	pub fn slot_popped(&self, slot: SlotId) -> Result<()> {
		self.send(ShellEvent::SlotPopped(slot))
	}

	pub fn auth_dismissed(&self, flow: FlowId) -> Result<()> {
		self.send(ShellEvent::AuthDismissed(flow))
	}

	/// Queues an auth navigation and returns the channel its decision arrives on.
	pub fn request_auth_navigation(&self, flow: FlowId, url: Url) -> Result<PolicyReply> {
		let (reply, rx) = oneshot::channel();
		self.send(ShellEvent::AuthNavigation { flow, url, reply })?;
		Ok(rx)
	}

	/// Asks whether the auth flow's web view may navigate to `url`.
	pub async fn auth_navigation(&self, flow: FlowId, url: Url) -> Result<NavigationPolicy> {
		let rx = self.request_auth_navigation(flow, url)?;
		rx.await.map_err(|_| ShellError::ChannelClosed)
	}

	/// Queues a wire-level message.
	///
	/// Returns the decision channel for `authNavigation` messages.
	pub fn dispatch(&self, message: InboundMessage) -> Result<Option<PolicyReply>> {
		let event = match message {
			InboundMessage::ProposeVisit { url, action } => ShellEvent::ProposeVisit {
				url: Url::parse(&url)?,
				action,
			},
			InboundMessage::VisitStarted { slot } => ShellEvent::VisitStarted(SlotId(slot)),
			InboundMessage::VisitFinished { slot } => ShellEvent::VisitFinished(SlotId(slot)),
			InboundMessage::VisitFailed { slot, error } => ShellEvent::VisitFailed {
				slot: SlotId(slot),
				failure: error,
			},
			InboundMessage::ExternalUrlRequested { url } => ShellEvent::ExternalUrlRequested(Url::parse(&url)?),
			InboundMessage::ScriptMessage { body } => ShellEvent::ScriptMessage(body),
			InboundMessage::Retry { slot } => ShellEvent::Retry(SlotId(slot)),
			InboundMessage::SlotPopped { slot } => ShellEvent::SlotPopped(SlotId(slot)),
			InboundMessage::AuthNavigation { flow, url } => {
				return self.request_auth_navigation(FlowId(flow), Url::parse(&url)?).map(Some);
			}
			InboundMessage::AuthDismissed { flow } => ShellEvent::AuthDismissed(FlowId(flow)),
		};
		self.send(event)?;
		Ok(None)
	}
}

/// Feeds auth completion back into the shell's own queue.
///
/// Holds a weak sender so a live flow does not keep the loop running after
/// every [`ShellHandle`] is gone.
struct QueuedAuthDelegate {
	tx: mpsc::WeakUnboundedSender<ShellEvent>,
}

impl AuthDelegate for QueuedAuthDelegate {
	fn did_authenticate(&self, flow: FlowId) {
		let delivered = self.tx.upgrade().is_some_and(|tx| tx.send(ShellEvent::AuthCompleted(flow)).is_ok());
		if !delivered {
			debug!(target = "droptune.auth", %flow, "shell stopped before auth completion was delivered");
		}
	}
}

/// Owns the coordinator and drains its inbound queue.
pub struct Shell {
	coordinator: NavigationCoordinator,
	inbox: mpsc::UnboundedReceiver<ShellEvent>,
}

impl Shell {
	/// Builds a shell for one navigation container.
	///
	/// The web view configuration is captured here, once, and shared with
	/// every auth flow along with the process-wide [`ProcessPool`].
	pub fn new(config: ShellConfig, parts: HostParts) -> Result<(Self, ShellHandle)> {
		config.validate()?;

		let configuration = Arc::new(WebViewConfiguration::new(&config, ProcessPool::shared()));
		debug!(target = "droptune", user_agent = %configuration.user_agent, "web view configuration ready");

		let (tx, inbox) = mpsc::unbounded_channel();
		let delegate = Arc::new(QueuedAuthDelegate { tx: tx.downgrade() });
		let coordinator = NavigationCoordinator::new(config, configuration, parts, delegate);

		Ok((Self { coordinator, inbox }, ShellHandle { tx }))
	}

	pub fn coordinator(&self) -> &NavigationCoordinator {
		&self.coordinator
	}

	/// Visits the configured base URL as the root slot.
	pub fn start(&mut self) {
		let url = self.coordinator.config().base_url.clone();
		self.coordinator.propose_visit(url, VisitAction::Advance);
	}

	/// Handles every queued event without waiting for more.
	pub fn pump(&mut self) -> usize {
		let mut handled = 0;
		while let Ok(event) = self.inbox.try_recv() {
			self.handle(event);
			handled += 1;
		}
		handled
	}

	/// Handles events until every [`ShellHandle`] has been dropped.
	pub async fn run(mut self) -> NavigationCoordinator {
		while let Some(event) = self.inbox.recv().await {
			self.handle(event);
		}
		info!(target = "droptune", depth = self.coordinator.stack().depth(), "shell event loop stopped");
		self.coordinator
	}

	fn handle(&mut self, event: ShellEvent) {
		trace!(target = "droptune", ?event, "handling shell event");
		let coordinator = &mut self.coordinator;
		match event {
			ShellEvent::ProposeVisit { url, action } => {
				coordinator.propose_visit(url, action);
			}
			ShellEvent::VisitStarted(slot) => coordinator.visit_started(slot),
			ShellEvent::VisitFinished(slot) => coordinator.visit_finished(slot),
			ShellEvent::VisitFailed { slot, failure } => {
				coordinator.visit_failed(slot, &failure);
			}
			ShellEvent::ExternalUrlRequested(url) => coordinator.external_url_requested(&url),
			ShellEvent::ScriptMessage(body) => coordinator.script_message(&body),
			ShellEvent::Retry(slot) => {
				coordinator.retry(slot);
			}
			ShellEvent::SlotPopped(slot) => {
				coordinator.slot_popped(slot);
			}
			ShellEvent::AuthNavigation { flow, url, reply } => {
				let policy = coordinator.auth_navigation(flow, &url);
				if reply.send(policy).is_err() {
					debug!(target = "droptune.auth", %flow, "auth navigation decision dropped by caller");
				}
			}
			ShellEvent::AuthCompleted(flow) => {
				coordinator.auth_completed(flow);
			}
			ShellEvent::AuthDismissed(flow) => {
				coordinator.auth_dismissed(flow);
			}
		}
	}
}
