//! Live placeholder annotation for an editor buffer.
//!
//! The crate turns a mapping [`Snapshot`](envlens_mapping::Snapshot) into an
//! [`Extension`]: the immutable bundle from which a host view derives its
//! highlight spans ([`DecorationMaintainer`]) and hover tooltips
//! ([`TooltipProvider`]). A [`BindingController`] follows the external
//! mapping source and swaps the whole extension atomically whenever it
//! changes, so spans and tooltips always describe the same snapshot.
//!
//! The host editor is reached only through [`EditorView`]. [`AnnotatedView`]
//! is a rope-backed implementation for embedders without a view layer.

/// Controllers binding mapping sources to the active extension.
pub mod binding;
/// Styling and resolution configuration.
pub mod config;
/// Incrementally maintained highlight spans.
pub mod decoration;
/// The swappable decoration/tooltip bundle.
pub mod extension;
/// Push-style mapping sources.
pub mod stream;
/// Hover tooltip resolution.
pub mod tooltip;
/// Host view seam and the rope-backed reference view.
pub mod view;

pub use binding::BindingController;
pub use config::{AnnotateConfig, ConfigError, HighlightClasses, TooltipOptions};
pub use decoration::{Decoration, DecorationMaintainer, HighlightStyle};
pub use extension::Extension;
pub use stream::{MappingBus, MappingCallback, MappingStream, SubscriptionId};
pub use tooltip::{Side, Tooltip, TooltipContent, TooltipProvider};
pub use view::{AnnotatedView, EditorView, ViewHandle};
