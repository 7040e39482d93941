//! Session: the single owner of the rendering engine.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::config::WebViewConfiguration;
use crate::slot::{SlotId, VisitableSlot};

/// Outbound calls into the rendering engine.
pub trait Renderer: Send {
	/// Issues (or reissues) a fetch of `url` into `slot`.
	fn visit(&mut self, slot: SlotId, url: &Url);

	/// Reloads whatever the engine currently shows.
	fn reload(&mut self);
}

/// Wraps the engine together with the configuration it was created with.
pub struct Session {
	renderer: Box<dyn Renderer>,
	configuration: Arc<WebViewConfiguration>,
	in_flight: HashSet<SlotId>,
}

impl Session {
	pub fn new(renderer: Box<dyn Renderer>, configuration: Arc<WebViewConfiguration>) -> Self {
		Self {
			renderer,
			configuration,
			in_flight: HashSet::new(),
		}
	}

	pub fn configuration(&self) -> &Arc<WebViewConfiguration> {
		&self.configuration
	}

	pub fn visit(&mut self, slot: &VisitableSlot) {
		debug!(target = "droptune.session", slot = %slot.id(), url = %slot.url(), "visit");
		self.renderer.visit(slot.id(), slot.url());
	}

	pub fn reload(&mut self) {
		debug!(target = "droptune.session", "reload");
		self.renderer.reload();
	}

	/// Marks `slot` as fetching; returns `true` on the transition from idle.
	pub(crate) fn request_started(&mut self, slot: SlotId) -> bool {
		let was_idle = self.in_flight.is_empty();
		self.in_flight.insert(slot) && was_idle
	}

	/// Settles the fetch of `slot`, whether it finished or was abandoned.
	///
	/// Returns `true` on the transition to idle.
	pub(crate) fn request_finished(&mut self, slot: SlotId) -> bool {
		self.in_flight.remove(&slot) && self.in_flight.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{ProcessPool, ShellConfig};

	struct NullRenderer;

	impl Renderer for NullRenderer {
		fn visit(&mut self, _slot: SlotId, _url: &Url) {}
		fn reload(&mut self) {}
	}

	#[test]
	fn activity_transitions_only_at_idle_boundaries() {
		let configuration = Arc::new(WebViewConfiguration::new(&ShellConfig::default(), ProcessPool::shared()));
		let mut session = Session::new(Box::new(NullRenderer), configuration);

		assert!(session.request_started(SlotId(1)));
		assert!(!session.request_started(SlotId(2)));
		assert!(!session.request_finished(SlotId(1)));
		assert!(session.request_finished(SlotId(2)));
		// Unbalanced finish stays idle.
		assert!(!session.request_finished(SlotId(2)));
	}

	#[test]
	fn restarting_a_slot_counts_once() {
		let configuration = Arc::new(WebViewConfiguration::new(&ShellConfig::default(), ProcessPool::shared()));
		let mut session = Session::new(Box::new(NullRenderer), configuration);

		assert!(session.request_started(SlotId(1)));
		assert!(!session.request_started(SlotId(1)));
		assert!(session.request_finished(SlotId(1)));
	}
}
