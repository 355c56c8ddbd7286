//! Controllers binding a mapping source to the active extension.
//!
//! # Role
//!
//! A [`BindingController`] owns the single "current extension" slot. Each
//! time its mapping source changes it builds a fresh [`Extension`] from the
//! new snapshot, publishes it with one atomic store, and reconfigures the
//! attached view.
//!
//! Three sources are supported:
//!
//! - [`BindingController::subscribe`]: a push [`MappingStream`]; the initial
//!   snapshot is read at construction and the view is left alone until the
//!   first publication.
//! - [`BindingController::watch_environments`] and
//!   [`BindingController::watch_variables`]: a `watch` channel; the view is
//!   reconfigured immediately at construction and on every change.
//!
//! # Invariants
//!
//! - Generations increase by one per installed snapshot, and installs are
//!   serialized: the slot and the view see them in generation order.
//! - Readers of [`BindingController::extension`] see either the previous or
//!   the new extension, never a partially built one.
//! - A watched value is installed once, whether it is picked up by
//!   [`BindingController::sync`] or by [`BindingController::run`].
//! - A missing view is a normal lifecycle state and is skipped silently.
//! - Dropping a stream-bound controller unsubscribes it.

use std::sync::Arc;

use arc_swap::ArcSwap;
use envlens_mapping::{MappingEntry, MappingKind, Snapshot};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::AnnotateConfig;
use crate::extension::Extension;
use crate::stream::{MappingStream, SubscriptionId};
use crate::view::{EditorView, ViewHandle};

type SharedStream = Arc<dyn MappingStream + Send + Sync>;

pub struct BindingController<V: EditorView> {
	kind: MappingKind,
	slot: ArcSwap<Extension>,
	view: ViewHandle<V>,
	config: Arc<AnnotateConfig>,
	/// Generation of the last installed extension; held for the whole install.
	installed: Mutex<u64>,
	source: Mutex<Option<watch::Receiver<Vec<MappingEntry>>>>,
	subscription: Option<(SharedStream, SubscriptionId)>,
}

impl<V: EditorView> BindingController<V> {
	fn with_initial(kind: MappingKind, initial: Vec<MappingEntry>, view: ViewHandle<V>, config: Arc<AnnotateConfig>) -> Self {
		let extension = Extension::new(0, Arc::new(Snapshot::new(kind, initial)), config.clone());
		Self {
			kind,
			slot: ArcSwap::from_pointee(extension),
			view,
			config,
			installed: Mutex::new(0),
			source: Mutex::new(None),
			subscription: None,
		}
	}

	/// Binds to a push stream of aggregated environments.
	///
	/// The initial extension is built from `stream.current()`. The callback
	/// holds only a weak reference, and the subscription is removed when the
	/// controller is dropped.
	pub fn subscribe<S>(stream: Arc<S>, view: ViewHandle<V>, config: Arc<AnnotateConfig>) -> Arc<Self>
	where
		S: MappingStream + Send + Sync + 'static,
		V: 'static,
	{
		let initial = stream.current();
		Arc::new_cyclic(|weak: &std::sync::Weak<Self>| {
			let weak = weak.clone();
			let id = stream.subscribe(Arc::new(move |entries: Vec<MappingEntry>| {
				if let Some(this) = weak.upgrade() {
					this.update(entries);
				}
			}));
			let mut this = Self::with_initial(MappingKind::Environment, initial, view, config);
			this.subscription = Some((stream as SharedStream, id));
			this
		})
	}

	/// Binds to a reactive environment source, firing immediately.
	pub fn watch_environments(
		rx: watch::Receiver<Vec<MappingEntry>>,
		view: ViewHandle<V>,
		config: Arc<AnnotateConfig>,
	) -> Arc<Self> {
		Self::watch(MappingKind::Environment, rx, view, config)
	}

	/// Binds to a reactive variable source, firing immediately.
	pub fn watch_variables(
		rx: watch::Receiver<Vec<MappingEntry>>,
		view: ViewHandle<V>,
		config: Arc<AnnotateConfig>,
	) -> Arc<Self> {
		Self::watch(MappingKind::Variable, rx, view, config)
	}

	fn watch(
		kind: MappingKind,
		mut rx: watch::Receiver<Vec<MappingEntry>>,
		view: ViewHandle<V>,
		config: Arc<AnnotateConfig>,
	) -> Arc<Self> {
		let initial = rx.borrow_and_update().clone();
		let this = Self::with_initial(kind, initial, view, config);
		*this.source.lock() = Some(rx);
		this.dispatch(this.extension());
		Arc::new(this)
	}

	/// Returns the current extension.
	pub fn extension(&self) -> Arc<Extension> {
		self.slot.load_full()
	}

	pub fn kind(&self) -> MappingKind {
		self.kind
	}

	/// Subscription id registered with the push stream, if any.
	pub fn subscription(&self) -> Option<SubscriptionId> {
		self.subscription.as_ref().map(|(_, id)| *id)
	}

	/// Installs a new entry list: builds, publishes and dispatches the extension.
	///
	/// Concurrent calls are serialized. The view must not call back into the
	/// controller from [`EditorView::reconfigure`].
	pub fn update(&self, entries: Vec<MappingEntry>) {
		let snapshot = Arc::new(Snapshot::new(self.kind, entries));
		let mut installed = self.installed.lock();
		*installed += 1;
		let generation = *installed;
		let extension = Arc::new(Extension::new(generation, snapshot, self.config.clone()));
		self.slot.store(extension.clone());
		tracing::debug!(generation, kind = ?self.kind, entries = extension.snapshot().len(), "Mapping snapshot installed");
		self.dispatch(extension);
	}

	/// Applies a pending change from the watched source, if there is one.
	///
	/// Returns true if a new snapshot was installed. Always false for
	/// stream-bound controllers.
	pub fn sync(&self) -> bool {
		let mut source = self.source.lock();
		let Some(rx) = source.as_mut() else {
			return false;
		};
		let entries = {
			let current = rx.borrow_and_update();
			if !current.has_changed() {
				return false;
			}
			current.clone()
		};
		self.update(entries);
		true
	}

	/// Follows the watched source until its sender is dropped.
	///
	/// Each wake-up goes through [`BindingController::sync`], so calling
	/// `sync` while this runs never installs a value twice. Returns
	/// immediately for stream-bound controllers.
	pub async fn run(self: Arc<Self>) {
		let Some(mut wake) = self.source.lock().clone() else {
			return;
		};
		while wake.changed().await.is_ok() {
			self.sync();
		}
		tracing::debug!(kind = ?self.kind, "Mapping source closed");
	}

	fn dispatch(&self, extension: Arc<Extension>) {
		match self.view.load_full() {
			Some(view) => view.reconfigure(extension),
			None => tracing::trace!(generation = extension.generation(), "No view attached; skipping reconfigure"),
		}
	}
}

impl<V: EditorView> Drop for BindingController<V> {
	fn drop(&mut self) {
		if let Some((stream, id)) = self.subscription.take() {
			stream.unsubscribe(id);
			tracing::trace!(kind = ?self.kind, "Mapping subscription removed");
		}
	}
}
