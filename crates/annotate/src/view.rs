//! Host view seam.
//!
//! The host editor owns the document and paints decorations; this crate only
//! needs to replace the whole annotation configuration of a live view. A view
//! may not exist yet (not mounted) or any more (unmounted), so controllers
//! hold it through a [`ViewHandle`] that can be empty.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use envlens_primitives::{Change, ChangeError, CharIdx, Rope};
use parking_lot::Mutex;

use crate::decoration::{Decoration, DecorationMaintainer};
use crate::extension::Extension;
use crate::tooltip::{Side, Tooltip};

/// A live editor view that can be reconfigured.
pub trait EditorView: Send + Sync {
	/// Replaces the view's annotation configuration.
	///
	/// Implementations must rebuild their decorations from `extension` with
	/// a full rescan and answer subsequent hovers from the same extension.
	fn reconfigure(&self, extension: Arc<Extension>);
}

/// Slot holding the currently attached view, if any.
pub type ViewHandle<V> = Arc<ArcSwapOption<V>>;

struct ViewState {
	doc: Rope,
	extension: Arc<Extension>,
	decorations: DecorationMaintainer,
}

/// Rope-backed view applying edits, decorations and hovers in one place.
pub struct AnnotatedView {
	state: Mutex<ViewState>,
}

impl AnnotatedView {
	pub fn new(text: &str, extension: Arc<Extension>) -> Self {
		let doc = Rope::from(text);
		let decorations = extension.decorations(doc.slice(..));
		Self {
			state: Mutex::new(ViewState {
				doc,
				extension,
				decorations,
			}),
		}
	}

	/// Applies a document change and updates decorations incrementally.
	pub fn edit(&self, change: &Change) -> Result<(), ChangeError> {
		let mut state = self.state.lock();
		let ViewState { doc, decorations, .. } = &mut *state;
		change.apply(doc)?;
		decorations.apply_change(doc.slice(..), change);
		Ok(())
	}

	pub fn text(&self) -> String {
		self.state.lock().doc.to_string()
	}

	pub fn decorations(&self) -> Vec<Decoration> {
		self.state.lock().decorations.decorations().to_vec()
	}

	pub fn hover(&self, pos: CharIdx, side: Side) -> Option<Tooltip> {
		let state = self.state.lock();
		state.extension.hover(state.doc.slice(..), pos, side)
	}

	/// Generation of the active extension.
	pub fn generation(&self) -> u64 {
		self.state.lock().extension.generation()
	}

	/// Generation the decorations were built from. Always equal to
	/// [`AnnotatedView::generation`].
	pub fn decoration_generation(&self) -> u64 {
		self.state.lock().decorations.generation()
	}
}

impl EditorView for AnnotatedView {
	fn reconfigure(&self, extension: Arc<Extension>) {
		let mut state = self.state.lock();
		let ViewState {
			doc,
			extension: active,
			decorations,
		} = &mut *state;
		extension.rebind(decorations, doc.slice(..));
		*active = extension;
		tracing::debug!(generation = active.generation(), spans = decorations.len(), "View reconfigured");
	}
}
