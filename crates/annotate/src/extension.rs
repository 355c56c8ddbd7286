//! The swappable annotation bundle.
//!
//! An [`Extension`] is built once per snapshot and never mutated. Hosts derive
//! both their decoration state and their hover answers from the same
//! `Arc<Extension>`, which is what keeps the two in step: a span set built
//! from one generation can never be paired with tooltips from another.

use std::sync::Arc;

use envlens_mapping::{MappingKind, Resolver, Snapshot};
use envlens_primitives::{CharIdx, RopeSlice};

use crate::config::AnnotateConfig;
use crate::decoration::DecorationMaintainer;
use crate::tooltip::{Side, Tooltip, TooltipProvider};

#[derive(Debug)]
pub struct Extension {
	generation: u64,
	resolver: Resolver,
	tooltip: TooltipProvider,
	config: Arc<AnnotateConfig>,
}

impl Extension {
	/// Builds the extension for `snapshot`, stamped with `generation`.
	pub fn new(generation: u64, snapshot: Arc<Snapshot>, config: Arc<AnnotateConfig>) -> Self {
		let resolver = Resolver::new(snapshot)
			.with_max_depth(config.max_expansion_depth)
			.with_unknown_label(config.tooltip.unknown_source_label.as_str());
		let tooltip = TooltipProvider::new(resolver.clone(), config.tooltip.clone());
		Self {
			generation,
			resolver,
			tooltip,
			config,
		}
	}

	/// Monotonic stamp identifying the snapshot this extension was built from.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn snapshot(&self) -> &Arc<Snapshot> {
		self.resolver.snapshot()
	}

	pub fn kind(&self) -> MappingKind {
		self.snapshot().kind()
	}

	pub fn config(&self) -> &AnnotateConfig {
		&self.config
	}

	pub fn resolver(&self) -> &Resolver {
		&self.resolver
	}

	pub fn tooltip(&self) -> &TooltipProvider {
		&self.tooltip
	}

	/// Builds a decoration maintainer for `doc` with a full scan.
	pub fn decorations(&self, doc: RopeSlice) -> DecorationMaintainer {
		DecorationMaintainer::new(self.resolver.clone(), &self.config.classes, doc).with_generation(self.generation)
	}

	/// Moves an existing maintainer onto this extension with a full rescan of `doc`.
	pub fn rebind(&self, maintainer: &mut DecorationMaintainer, doc: RopeSlice) {
		maintainer.rebind(self.resolver.clone(), &self.config.classes, doc);
		maintainer.set_generation(self.generation);
	}

	/// Answers a hover query.
	pub fn hover(&self, doc: RopeSlice, pos: CharIdx, side: Side) -> Option<Tooltip> {
		self.tooltip.query(doc, pos, side)
	}
}
