//! Epoch-gated view publication.
//!
//! A descriptor is `Fresh` when a [`Resolved`] view is published and its epoch
//! equals the source's current epoch, `Stale` otherwise. Replacing raw tags
//! unpublishes the view; an epoch change is detected on the next read.

use std::sync::{Arc, OnceLock};

use strata_tags::{Category, Description, TagSet};

use super::{MemberDescriptor, RawState};
use crate::config::FailurePolicy;
use crate::error::SupplyError;
use crate::merge;

/// Immutable merge result published to readers.
pub(super) struct Resolved {
	pub(super) epoch: u64,
	pub(super) tags: TagSet,
	pub(super) partial: bool,
	category: OnceLock<Arc<str>>,
	description: OnceLock<Arc<str>>,
}

impl Resolved {
	fn new(epoch: u64, tags: TagSet, partial: bool) -> Self {
		Self {
			epoch,
			tags,
			partial,
			category: OnceLock::new(),
			description: OnceLock::new(),
		}
	}

	pub(super) fn category(&self) -> Arc<str> {
		self.category
			.get_or_init(|| Arc::from(self.tags.get_or_default::<Category>().as_str()))
			.clone()
	}

	pub(super) fn description(&self) -> Arc<str> {
		self.description
			.get_or_init(|| Arc::from(self.tags.get_or_default::<Description>().as_str()))
			.clone()
	}
}

impl MemberDescriptor {
	/// Returns the published view, rebuilding it first if stale.
	pub(super) fn view(&self) -> Arc<Resolved> {
		if let Some(view) = self.published_at(self.epoch.current_epoch()) {
			return view;
		}

		let state = self.state.lock();
		// Re-read under the lock: another reader may have rebuilt while we waited.
		let epoch = self.epoch.current_epoch();
		if let Some(view) = self.published_at(epoch) {
			return view;
		}

		let view = Arc::new(self.rebuild(&state, epoch));
		self.resolved.store(Some(view.clone()));
		view
	}

	fn published_at(&self, epoch: u64) -> Option<Arc<Resolved>> {
		self.resolved.load_full().filter(|view| view.epoch == epoch)
	}

	fn rebuild(&self, state: &RawState, epoch: u64) -> Resolved {
		let outcome = merge::merge(&state.declared, &state.suppliers);
		if let Some(failure) = &outcome.failure {
			self.report_supply_failure(failure);
		}
		if self.config.trace_rebuilds {
			tracing::debug!(
				member = %self.name,
				epoch,
				collected = outcome.collected,
				merged = outcome.tags.len(),
				"rebuilt member tags",
			);
		}
		Resolved::new(epoch, self.builder.build(outcome.tags), outcome.failure.is_some())
	}

	pub(super) fn report_supply_failure(&self, failure: &SupplyError) {
		tracing::warn!(
			member = %self.name,
			supplier = %failure.supplier,
			reason = %failure.reason,
			"tag collection failed; continuing with partial tags",
		);
		if self.config.on_supply_failure == FailurePolicy::Assert && cfg!(debug_assertions) {
			panic!("{}>>{failure}", self.name);
		}
	}
}
