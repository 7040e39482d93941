//! Capabilities the native container provides to the coordinator.

use url::Url;

use crate::auth::{AuthFlow, FlowId};
use crate::catalog::ErrorContent;
use crate::config::WebViewConfiguration;
use crate::slot::{SlotId, VisitableSlot};

/// Dismissible notice shown over everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
	pub title: String,
	pub message: String,
	pub dismiss_label: &'static str,
}

impl Alert {
	pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			message: message.into(),
			dismiss_label: "OK",
		}
	}
}

/// View-hierarchy operations. The coordinator decides; the presenter draws.
pub trait Presenter: Send {
	/// Shows a freshly created slot on top of the stack.
	fn push_slot(&mut self, slot: &VisitableSlot, animated: bool);

	/// Removes a slot's view from the top of the stack.
	fn pop_slot(&mut self, slot: SlotId, animated: bool);

	/// Installs or replaces the error overlay of `slot`.
	fn show_error(&mut self, slot: SlotId, content: &ErrorContent);

	fn hide_error(&mut self, slot: SlotId);

	/// Presents a flow modally above the current stack.
	fn present_auth(&mut self, flow: &AuthFlow);

	fn dismiss_auth(&mut self, flow: FlowId);

	/// Opens `url` in an isolated browser above the current stack.
	fn present_external(&mut self, url: &Url);

	fn present_alert(&mut self, alert: &Alert);

	/// Network activity indication. Called when requests go from zero to
	/// some, or back to zero.
	fn activity_changed(&mut self, _active: bool) {}
}

/// Loads a page into an auth flow's web view.
pub trait PageLoader: Send {
	fn load(&mut self, flow: FlowId, url: &Url, configuration: &WebViewConfiguration);
}
