//! Visitable slots and the navigation stack that owns them.

use std::fmt;

use url::Url;

use crate::catalog::ErrorContent;

/// Stable identifier of one slot for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "slot#{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
	Loading,
	Rendered,
	Errored,
}

/// One navigation-stack entry rendering a single URL.
#[derive(Debug, Clone)]
pub struct VisitableSlot {
	id: SlotId,
	url: Url,
	state: RenderState,
	error: Option<ErrorContent>,
}

impl VisitableSlot {
	fn new(id: SlotId, url: Url) -> Self {
		Self {
			id,
			url,
			state: RenderState::Loading,
			error: None,
		}
	}

	pub fn id(&self) -> SlotId {
		self.id
	}

	/// URL this slot was created for. Never changes.
	pub fn url(&self) -> &Url {
		&self.url
	}

	pub fn state(&self) -> RenderState {
		self.state
	}

	/// Content of the visible error overlay, if any.
	pub fn error(&self) -> Option<&ErrorContent> {
		self.error.as_ref()
	}

	/// Shows `content` on the overlay, replacing whatever it showed before.
	pub fn present_error(&mut self, content: ErrorContent) {
		self.error = Some(content);
		self.state = RenderState::Errored;
	}

	/// Clears the overlay and returns to `Loading`.
	///
	/// Returns `false` when the slot was not errored; nothing changes then.
	pub fn retry(&mut self) -> bool {
		if self.state != RenderState::Errored {
			return false;
		}
		self.error = None;
		self.state = RenderState::Loading;
		true
	}

	/// Starts a fresh fetch regardless of the current state.
	pub(crate) fn reload(&mut self) {
		self.error = None;
		self.state = RenderState::Loading;
	}

	/// Marks a successful fetch. An errored slot stays errored.
	pub(crate) fn finish(&mut self) {
		if self.state == RenderState::Loading {
			self.state = RenderState::Rendered;
		}
	}
}

/// Ordered slots, bottom first.
#[derive(Debug, Default)]
pub struct NavigationStack {
	slots: Vec<VisitableSlot>,
	next_id: u64,
}

impl NavigationStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn depth(&self) -> usize {
		self.slots.len()
	}

	pub fn top(&self) -> Option<&VisitableSlot> {
		self.slots.last()
	}

	pub fn get(&self, id: SlotId) -> Option<&VisitableSlot> {
		self.slots.iter().find(|slot| slot.id == id)
	}

	pub fn get_mut(&mut self, id: SlotId) -> Option<&mut VisitableSlot> {
		self.slots.iter_mut().find(|slot| slot.id == id)
	}

	pub(crate) fn top_mut(&mut self) -> Option<&mut VisitableSlot> {
		self.slots.last_mut()
	}

	pub fn iter(&self) -> impl Iterator<Item = &VisitableSlot> {
		self.slots.iter()
	}

	/// Pushes a new slot bound to `url`.
	pub(crate) fn push(&mut self, url: Url) -> &VisitableSlot {
		let id = self.allocate_id();
		self.slots.push(VisitableSlot::new(id, url));
		&self.slots[self.slots.len() - 1]
	}

	/// Swaps the top slot for a new one bound to `url`.
	///
	/// On an empty stack this behaves like [`push`](Self::push) and nothing is
	/// removed.
	pub(crate) fn replace_top(&mut self, url: Url) -> (Option<VisitableSlot>, &VisitableSlot) {
		let removed = self.slots.pop();
		let id = self.allocate_id();
		self.slots.push(VisitableSlot::new(id, url));
		(removed, &self.slots[self.slots.len() - 1])
	}

	/// Removes the top slot if it is `id` and is not the root.
	pub(crate) fn pop_top(&mut self, id: SlotId) -> Option<VisitableSlot> {
		if self.slots.len() < 2 || self.top().map(VisitableSlot::id) != Some(id) {
			return None;
		}
		self.slots.pop()
	}

	fn allocate_id(&mut self) -> SlotId {
		self.next_id += 1;
		SlotId(self.next_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::ErrorCatalog;

	fn url(path: &str) -> Url {
		Url::parse("https://droptune.test").unwrap().join(path).unwrap()
	}

	#[test]
	fn present_error_twice_keeps_latest_content() {
		let mut stack = NavigationStack::new();
		let id = stack.push(url("/songs")).id();
		let slot = stack.get_mut(id).unwrap();

		slot.present_error(ErrorCatalog::NETWORK);
		slot.present_error(ErrorCatalog::NOT_FOUND);

		assert_eq!(slot.state(), RenderState::Errored);
		assert_eq!(slot.error(), Some(&ErrorCatalog::NOT_FOUND));
	}

	#[test]
	fn retry_restores_loading_and_keeps_url() {
		let mut stack = NavigationStack::new();
		let id = stack.push(url("/songs/4")).id();
		let slot = stack.get_mut(id).unwrap();
		slot.present_error(ErrorCatalog::http_status(502));

		assert!(slot.retry());
		assert_eq!(slot.state(), RenderState::Loading);
		assert_eq!(slot.error(), None);
		assert_eq!(slot.url().as_str(), "https://droptune.test/songs/4");
	}

	#[test]
	fn retry_without_error_is_a_no_op() {
		let mut stack = NavigationStack::new();
		let id = stack.push(url("/")).id();
		let slot = stack.get_mut(id).unwrap();
		slot.finish();

		assert!(!slot.retry());
		assert_eq!(slot.state(), RenderState::Rendered);
	}

	#[test]
	fn finish_leaves_errored_slot_errored() {
		let mut stack = NavigationStack::new();
		let id = stack.push(url("/")).id();
		let slot = stack.get_mut(id).unwrap();
		slot.present_error(ErrorCatalog::NETWORK);
		slot.finish();
		assert_eq!(slot.state(), RenderState::Errored);
	}

	#[test]
	fn replace_top_keeps_depth_and_lower_slots() {
		let mut stack = NavigationStack::new();
		let root = stack.push(url("/")).id();
		let old_top = stack.push(url("/a")).id();

		let (removed, new_top) = stack.replace_top(url("/b"));
		let new_top = new_top.id();

		assert_eq!(removed.map(|s| s.id()), Some(old_top));
		assert_eq!(stack.depth(), 2);
		assert_eq!(stack.top().map(VisitableSlot::id), Some(new_top));
		assert_eq!(stack.iter().next().map(VisitableSlot::id), Some(root));
		assert!(stack.get(old_top).is_none());
	}

	#[test]
	fn pop_top_only_removes_non_root_top() {
		let mut stack = NavigationStack::new();
		let root = stack.push(url("/")).id();
		assert!(stack.pop_top(root).is_none());

		let child = stack.push(url("/a")).id();
		assert!(stack.pop_top(root).is_none());
		assert_eq!(stack.pop_top(child).map(|s| s.id()), Some(child));
		assert_eq!(stack.depth(), 1);
	}

	#[test]
	fn ids_are_never_reused() {
		let mut stack = NavigationStack::new();
		let first = stack.push(url("/")).id();
		let (_, second) = stack.replace_top(url("/"));
		assert_ne!(first, second.id());
	}
}
