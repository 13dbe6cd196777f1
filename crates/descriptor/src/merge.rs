//! Layer collection and override merge.
//!
//! # Mental model
//!
//! * A member's tags come from ordered layers: the declared tags first, then
//!   each [`TagSupplier`] in registration order (base to derived).
//! * [`dedup`] folds the combined sequence by [`TagKind`]; the last tag of a
//!   kind wins, so a derived layer overrides a base layer.
//! * Survivors keep the position where their kind was first seen. Equal input
//!   sequences therefore always produce equal output sequences.
//!
//! # Failure modes & recovery
//!
//! * A supplier error stops collection at that point. Tags gathered before the
//!   failure (including any the failing supplier pushed) are kept and merged;
//!   the error travels in [`MergeOutcome::failure`] for diagnostics only.

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use strata_tags::{TagKind, TagRef};

use crate::error::SupplyError;


/// A source of tags layered on top of a member's declared tags.
pub trait TagSupplier: Send + Sync {
	/// Label used in diagnostics.
	fn name(&self) -> Cow<'static, str> {
		Cow::Borrowed(std::any::type_name::<Self>())
	}

	/// Appends this layer's tags to `into`.
	fn collect_tags(&self, into: &mut Vec<TagRef>) -> Result<(), SupplyError>;
}

/// Closure-backed [`TagSupplier`]. See [`supplier_fn`].
pub struct FnSupplier<F> {
	name: &'static str,
	f: F,
}

/// Wraps a closure as a named [`TagSupplier`].
pub fn supplier_fn<F>(name: &'static str, f: F) -> FnSupplier<F>
where
	F: Fn(&mut Vec<TagRef>) -> Result<(), SupplyError> + Send + Sync,
{
	FnSupplier { name, f }
}

impl<F> TagSupplier for FnSupplier<F>
where
	F: Fn(&mut Vec<TagRef>) -> Result<(), SupplyError> + Send + Sync,
{
	fn name(&self) -> Cow<'static, str> {
		Cow::Borrowed(self.name)
	}

	fn collect_tags(&self, into: &mut Vec<TagRef>) -> Result<(), SupplyError> {
		(self.f)(into)
	}
}

/// Pre-merge tags, possibly truncated by a supplier failure.
#[derive(Debug)]
pub struct Collected {
	pub tags: Vec<TagRef>,
	pub failure: Option<SupplyError>,
}

/// Concatenates all layers in order, stopping at the first failing supplier.
pub fn collect_layers(declared: &[TagRef], suppliers: &[Arc<dyn TagSupplier>]) -> Collected {
	let mut tags = declared.to_vec();
	for supplier in suppliers {
		if let Err(failure) = supplier.collect_tags(&mut tags) {
			return Collected {
				tags,
				failure: Some(failure),
			};
		}
	}
	Collected {
		tags,
		failure: None,
	}
}

/// Collapses `tags` to one tag per kind, last occurrence winning.
pub fn dedup(tags: impl IntoIterator<Item = TagRef>) -> Arc<[TagRef]> {
	let mut by_kind: IndexMap<TagKind, TagRef, FxBuildHasher> = IndexMap::default();
	for tag in tags {
		by_kind.insert(tag.kind(), tag);
	}
	by_kind.into_values().collect()
}

#[derive(Debug)]
pub struct MergeOutcome {
	pub tags: Arc<[TagRef]>,
	/// Number of tags collected before dedup.
	pub collected: usize,
	pub failure: Option<SupplyError>,
}

/// Collects every layer and deduplicates the result.
pub fn merge(declared: &[TagRef], suppliers: &[Arc<dyn TagSupplier>]) -> MergeOutcome {
	let Collected { tags, failure } = collect_layers(declared, suppliers);
	let collected = tags.len();
	MergeOutcome {
		tags: dedup(tags),
		collected,
		failure,
	}
}
