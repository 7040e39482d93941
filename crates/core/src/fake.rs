//! In-memory host for exercising the shell without a native container.
//!
//! Records every outbound call the coordinator makes.
//!
//! # Example
//!
//! ```ignore
//! let (parts, host) = RecordingHost::new().build();
//! let (mut shell, handle) = Shell::new(ShellConfig::default(), parts)?;
//! shell.start();
//! assert!(matches!(host.actions()[0], HostAction::PushSlot { .. }));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use url::Url;

use crate::auth::{AuthFlow, FlowId};
use crate::catalog::ErrorContent;
use crate::config::WebViewConfiguration;
use crate::coordinator::HostParts;
use crate::presenter::{Alert, PageLoader, Presenter};
use crate::session::Renderer;
use crate::slot::{SlotId, VisitableSlot};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostAction {
	Visit { slot: u64, url: String },
	Reload,
	PushSlot { slot: u64, url: String, animated: bool },
	PopSlot { slot: u64, animated: bool },
	ShowError { slot: u64, title: String, message: String },
	HideError { slot: u64 },
	PresentAuth { flow: u64, url: String, title: String },
	DismissAuth { flow: u64 },
	#[serde(rename_all = "camelCase")]
	LoadAuthPage { flow: u64, url: String, user_agent: String },
	PresentExternal { url: String },
	PresentAlert { title: String, message: String },
	Activity { active: bool },
}

type Log = Arc<Mutex<Vec<HostAction>>>;

/// Builder for a recording host.
#[derive(Debug, Default)]
pub struct RecordingHost;

impl RecordingHost {
	pub fn new() -> Self {
		Self
	}

	/// Returns [`HostParts`] for the shell and a controller reading the log.
	pub fn build(self) -> (HostParts, HostController) {
		let log: Log = Arc::new(Mutex::new(Vec::new()));
		let parts = HostParts {
			renderer: Box::new(RecordingRenderer { log: Arc::clone(&log) }),
			presenter: Box::new(RecordingPresenter { log: Arc::clone(&log) }),
			auth_loader: Box::new(RecordingLoader { log: Arc::clone(&log) }),
		};
		(parts, HostController { log })
	}
}

/// Read side of a [`RecordingHost`].
#[derive(Debug, Clone)]
pub struct HostController {
	log: Log,
}

impl HostController {
	/// Snapshot of every action so far.
	pub fn actions(&self) -> Vec<HostAction> {
		self.log.lock().clone()
	}

	/// Take all recorded actions, clearing the log.
	pub fn take(&self) -> Vec<HostAction> {
		std::mem::take(&mut *self.log.lock())
	}

	/// Number of visits issued for `slot`.
	pub fn visits_for(&self, slot: SlotId) -> usize {
		self.log
			.lock()
			.iter()
			.filter(|action| matches!(action, HostAction::Visit { slot: s, .. } if *s == slot.0))
			.count()
	}
}

struct RecordingRenderer {
	log: Log,
}

impl Renderer for RecordingRenderer {
	fn visit(&mut self, slot: SlotId, url: &Url) {
		self.log.lock().push(HostAction::Visit {
			slot: slot.0,
			url: url.to_string(),
		});
	}

	fn reload(&mut self) {
		self.log.lock().push(HostAction::Reload);
	}
}

struct RecordingPresenter {
	log: Log,
}

impl Presenter for RecordingPresenter {
	fn push_slot(&mut self, slot: &VisitableSlot, animated: bool) {
		self.log.lock().push(HostAction::PushSlot {
			slot: slot.id().0,
			url: slot.url().to_string(),
			animated,
		});
	}

	fn pop_slot(&mut self, slot: SlotId, animated: bool) {
		self.log.lock().push(HostAction::PopSlot { slot: slot.0, animated });
	}

	fn show_error(&mut self, slot: SlotId, content: &ErrorContent) {
		self.log.lock().push(HostAction::ShowError {
			slot: slot.0,
			title: content.title.to_string(),
			message: content.message.to_string(),
		});
	}

	fn hide_error(&mut self, slot: SlotId) {
		self.log.lock().push(HostAction::HideError { slot: slot.0 });
	}

	fn present_auth(&mut self, flow: &AuthFlow) {
		self.log.lock().push(HostAction::PresentAuth {
			flow: flow.id().0,
			url: flow.target_url().to_string(),
			title: flow.title().to_string(),
		});
	}

	fn dismiss_auth(&mut self, flow: FlowId) {
		self.log.lock().push(HostAction::DismissAuth { flow: flow.0 });
	}

	fn present_external(&mut self, url: &Url) {
		self.log.lock().push(HostAction::PresentExternal { url: url.to_string() });
	}

	fn present_alert(&mut self, alert: &Alert) {
		self.log.lock().push(HostAction::PresentAlert {
			title: alert.title.clone(),
			message: alert.message.clone(),
		});
	}

	fn activity_changed(&mut self, active: bool) {
		self.log.lock().push(HostAction::Activity { active });
	}
}

struct RecordingLoader {
	log: Log,
}

impl PageLoader for RecordingLoader {
	fn load(&mut self, flow: FlowId, url: &Url, configuration: &WebViewConfiguration) {
		self.log.lock().push(HostAction::LoadAuthPage {
			flow: flow.0,
			url: url.to_string(),
			user_agent: configuration.user_agent.clone(),
		});
	}
}
