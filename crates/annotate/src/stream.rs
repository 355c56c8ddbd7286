//! Push-style mapping sources.
//!
//! The mapping store publishes full entry lists, never deltas. [`MappingStream`]
//! is the seam a store implements; [`MappingBus`] is an in-process
//! implementation.

use std::sync::Arc;

use envlens_mapping::MappingEntry;
use parking_lot::Mutex;

/// Callback receiving the complete new entry list.
pub type MappingCallback = Arc<dyn Fn(Vec<MappingEntry>) + Send + Sync>;

/// Handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A source that pushes whole mapping lists to subscribers.
pub trait MappingStream {
	/// Returns the latest published list.
	fn current(&self) -> Vec<MappingEntry>;

	/// Registers `callback` for every future publication.
	fn subscribe(&self, callback: MappingCallback) -> SubscriptionId;

	/// Removes a subscription. Unknown ids are ignored.
	fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Default)]
struct BusState {
	current: Vec<MappingEntry>,
	subscribers: Vec<(SubscriptionId, MappingCallback)>,
	next_id: u64,
}

/// In-process broadcast of mapping lists.
///
/// Callbacks run on the publishing thread, in subscription order, after the
/// internal lock is released, so a callback may publish again.
#[derive(Default)]
pub struct MappingBus {
	state: Mutex<BusState>,
}

impl MappingBus {
	pub fn new(initial: Vec<MappingEntry>) -> Self {
		Self {
			state: Mutex::new(BusState {
				current: initial,
				..BusState::default()
			}),
		}
	}

	/// Replaces the current list and notifies every subscriber.
	pub fn publish(&self, entries: Vec<MappingEntry>) {
		let subscribers: Vec<MappingCallback> = {
			let mut state = self.state.lock();
			state.current = entries.clone();
			state.subscribers.iter().map(|(_, cb)| cb.clone()).collect()
		};
		tracing::trace!(entries = entries.len(), subscribers = subscribers.len(), "Publishing mapping");
		for callback in subscribers {
			callback(entries.clone());
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.state.lock().subscribers.len()
	}
}

impl MappingStream for MappingBus {
	fn current(&self) -> Vec<MappingEntry> {
		self.state.lock().current.clone()
	}

	fn subscribe(&self, callback: MappingCallback) -> SubscriptionId {
		let mut state = self.state.lock();
		let id = SubscriptionId(state.next_id);
		state.next_id += 1;
		state.subscribers.push((id, callback));
		id
	}

	fn unsubscribe(&self, id: SubscriptionId) {
		self.state.lock().subscribers.retain(|(sub, _)| *sub != id);
	}
}
