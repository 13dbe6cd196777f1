//! Member descriptors.
//!
//! # Purpose
//!
//! A [`MemberDescriptor`] names one member and exposes a single deduplicated view
//! of the tags layered onto it, rebuilt lazily whenever the tags are replaced or
//! the metadata epoch moves.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints |
//! |---|---|---|
//! | [`MemberDescriptor`] | Identity + cached merged tags | Name non-empty, fixed for life |
//! | [`MemberKind`] | Concrete descriptor variant | Descriptors of different kinds never compare equal |
//!
//! # Lifecycle
//!
//! 1. Construct with [`MemberDescriptor::new`], [`MemberDescriptor::from_descriptor`],
//!    [`MemberDescriptor::layered`] or [`MemberDescriptor::layered_keep_display_name`].
//! 2. Optionally attach suppliers and collaborators with the `with_*` setters.
//! 3. The first derived read merges and publishes a view; later reads reuse it
//!    until [`MemberDescriptor::set_raw_tags`] or an epoch change makes it stale.
//!
//! # Concurrency & ordering
//!
//! * Reads of a fresh view are lock-free.
//! * Rebuilds, raw tag replacement and publication serialize on one mutex per
//!   descriptor. A reader finding a stale view re-checks under the lock before
//!   merging, so concurrent readers of a stale descriptor merge once.
//! * Tag suppliers run under that mutex and must not read the descriptor they
//!   are attached to.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use strata_tags::{
	Browsable, ContainerBuilder, DesignTimeOnly, DisplayName, IndexedBuilder, ReadOnly, Tag, TagRef,
	TagSet,
};

use crate::config::DescriptorConfig;
use crate::epoch::{EpochSource, GlobalEpoch};
use crate::error::{DescriptorError, Result};
use crate::merge::{self, TagSupplier};

mod cache;
mod identity;

pub use identity::name_hash;

use cache::Resolved;


/// Concrete descriptor variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
	Property,
	Event,
	Method,
	Custom(&'static str),
}

/// Tags declared on the member itself plus the layers stacked after them.
struct RawState {
	declared: Arc<[TagRef]>,
	suppliers: Vec<Arc<dyn TagSupplier>>,
}

pub struct MemberDescriptor {
	kind: MemberKind,
	name: Arc<str>,
	display_name: Arc<str>,
	name_hash: u64,
	epoch: Arc<dyn EpochSource>,
	builder: Arc<dyn ContainerBuilder>,
	config: DescriptorConfig,
	state: Mutex<RawState>,
	resolved: ArcSwapOption<Resolved>,
}

fn validate_name(name: &str) -> Result<()> {
	if name.is_empty() {
		return Err(DescriptorError::InvalidArgument("member name required"));
	}
	Ok(())
}

impl MemberDescriptor {
	fn with_identity(kind: MemberKind, name: Arc<str>, display_name: Arc<str>, declared: Arc<[TagRef]>) -> Self {
		Self {
			kind,
			name_hash: name_hash(&name),
			name,
			display_name,
			epoch: Arc::new(GlobalEpoch),
			builder: Arc::new(IndexedBuilder),
			config: DescriptorConfig::default(),
			state: Mutex::new(RawState {
				declared,
				suppliers: Vec::new(),
			}),
			resolved: ArcSwapOption::empty(),
		}
	}

	/// Shares the predecessor's epoch source, container builder and config.
	fn inherit_context(mut self, from: &Self) -> Self {
		self.epoch = from.epoch.clone();
		self.builder = from.builder.clone();
		self.config = from.config.clone();
		self
	}

	/// Creates a descriptor with `tags` as its declared tags.
	pub fn new(kind: MemberKind, name: &str, tags: impl IntoIterator<Item = TagRef>) -> Result<Self> {
		validate_name(name)?;
		let name: Arc<str> = Arc::from(name);
		Ok(Self::with_identity(kind, name.clone(), name, tags.into_iter().collect()))
	}

	/// Copies `other`'s merged tags into a new descriptor of the same kind and name.
	///
	/// The copy does not inherit `other`'s suppliers; it declares the merged
	/// result directly, so its own merge is a fixpoint.
	pub fn from_descriptor(other: &Self) -> Result<Self> {
		// Inherited names were validated when the predecessor was built.
		validate_name(&other.name)?;
		let merged = other.tags().to_shared();
		Ok(Self::with_identity(other.kind, other.name.clone(), other.name.clone(), merged).inherit_context(other))
	}

	/// Stacks `tags` on top of `prev`'s pre-merge tags.
	///
	/// Later tags override earlier ones of the same kind, so `tags` win over
	/// anything `prev` declared or collected.
	pub fn layered(prev: &Self, tags: impl IntoIterator<Item = TagRef>) -> Result<Self> {
		// Inherited names were validated when the predecessor was built.
		validate_name(&prev.name)?;
		let declared = Self::stack(prev, tags);
		Ok(Self::with_identity(prev.kind, prev.name.clone(), prev.name.clone(), declared).inherit_context(prev))
	}

	/// Like [`layered`](Self::layered), but starts from `prev`'s resolved display name.
	pub fn layered_keep_display_name(prev: &Self, tags: impl IntoIterator<Item = TagRef>) -> Result<Self> {
		// Inherited names were validated when the predecessor was built.
		validate_name(&prev.name)?;
		let display_name = prev.display_name();
		let declared = Self::stack(prev, tags);
		Ok(Self::with_identity(prev.kind, prev.name.clone(), display_name, declared).inherit_context(prev))
	}

	fn stack(prev: &Self, tags: impl IntoIterator<Item = TagRef>) -> Arc<[TagRef]> {
		let mut stacked = prev.raw_tags();
		stacked.extend(tags);
		stacked.into()
	}

	/// Appends a supplier layer after the declared tags and any earlier suppliers.
	pub fn with_supplier(mut self, supplier: Arc<dyn TagSupplier>) -> Self {
		self.state.get_mut().suppliers.push(supplier);
		self.resolved.store(None);
		self
	}

	pub fn with_epoch_source(mut self, epoch: Arc<dyn EpochSource>) -> Self {
		self.epoch = epoch;
		self.resolved.store(None);
		self
	}

	pub fn with_container_builder(mut self, builder: Arc<dyn ContainerBuilder>) -> Self {
		self.builder = builder;
		self.resolved.store(None);
		self
	}

	pub fn with_config(mut self, config: DescriptorConfig) -> Self {
		self.config = config;
		self
	}

	pub fn kind(&self) -> MemberKind {
		self.kind
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Hash of the name, fixed at construction. Also the descriptor's `Hash`.
	pub fn name_hash(&self) -> u64 {
		self.name_hash
	}

	/// Merged tags as of the current epoch.
	pub fn tags(&self) -> TagSet {
		self.view().tags.clone()
	}

	/// Clones the merged tag of type `T`, if declared.
	pub fn find<T: Tag + Clone>(&self) -> Option<T> {
		self.view().tags.get_as::<T>().cloned()
	}

	pub fn category(&self) -> Arc<str> {
		self.view().category()
	}

	pub fn description(&self) -> Arc<str> {
		self.view().description()
	}

	/// The [`DisplayName`] tag when it carries a value, otherwise the name this
	/// descriptor was constructed with.
	pub fn display_name(&self) -> Arc<str> {
		match self.view().tags.get_as::<DisplayName>() {
			Some(tag) if !tag.is_default() => Arc::from(tag.as_str()),
			_ => self.display_name.clone(),
		}
	}

	pub fn is_browsable(&self) -> bool {
		self.view().tags.get_or_default::<Browsable>().get()
	}

	pub fn is_design_time_only(&self) -> bool {
		self.view().tags.get_or_default::<DesignTimeOnly>().get()
	}

	pub fn is_read_only(&self) -> bool {
		self.view().tags.get_or_default::<ReadOnly>().get()
	}

	/// Pre-merge tags: declared tags followed by every supplier's output.
	pub fn raw_tags(&self) -> Vec<TagRef> {
		let state = self.state.lock();
		let collected = merge::collect_layers(&state.declared, &state.suppliers);
		if let Some(failure) = &collected.failure {
			self.report_supply_failure(failure);
		}
		collected.tags
	}

	/// Replaces the declared tags and drops every cached derived value.
	pub fn set_raw_tags(&self, tags: impl IntoIterator<Item = TagRef>) {
		let declared: Arc<[TagRef]> = tags.into_iter().collect();
		let mut state = self.state.lock();
		state.declared = declared;
		self.resolved.store(None);
	}

	/// Returns true if the published view matches the current epoch.
	pub fn is_fresh(&self) -> bool {
		let published = self.resolved.load();
		match &*published {
			Some(view) => view.epoch == self.epoch.current_epoch(),
			None => false,
		}
	}

	/// Returns true if the current view was built from a truncated collection.
	pub fn is_partial(&self) -> bool {
		self.view().partial
	}
}

impl fmt::Debug for MemberDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberDescriptor")
			.field("kind", &self.kind)
			.field("name", &self.name)
			.field("display_name", &self.display_name)
			.field("fresh", &self.is_fresh())
			.finish()
	}
}
