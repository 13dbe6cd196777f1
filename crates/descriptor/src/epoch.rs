//! Metadata epochs.
//!
//! An epoch is a monotonic counter meaning "metadata may have changed since you
//! last looked". Descriptors record the epoch their cached view was built at
//! and rebuild lazily once the source reports a different value. Only the
//! owner of an epoch advances it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Read-only view of an epoch counter.
pub trait EpochSource: Send + Sync {
	fn current_epoch(&self) -> u64;
}

/// Atomic monotonic epoch counter.
#[derive(Debug, Default)]
pub struct MetadataEpoch {
	value: AtomicU64,
}

impl MetadataEpoch {
	pub const fn new() -> Self {
		Self {
			value: AtomicU64::new(0),
		}
	}

	/// Process-wide counter used by descriptors that were not given a source.
	pub fn global() -> &'static MetadataEpoch {
		static GLOBAL: MetadataEpoch = MetadataEpoch::new();
		&GLOBAL
	}

	/// Advances the epoch and returns the new value.
	pub fn advance(&self) -> u64 {
		self.value.fetch_add(1, Ordering::AcqRel) + 1
	}
}

impl EpochSource for MetadataEpoch {
	fn current_epoch(&self) -> u64 {
		self.value.load(Ordering::Acquire)
	}
}

/// Handle onto [`MetadataEpoch::global`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalEpoch;

impl EpochSource for GlobalEpoch {
	fn current_epoch(&self) -> u64 {
		MetadataEpoch::global().current_epoch()
	}
}

/// Owner of an epoch; the only party allowed to advance it.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
	epoch: Arc<MetadataEpoch>,
}

impl MetadataRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read-only handle for descriptors.
	pub fn epoch_source(&self) -> Arc<dyn EpochSource> {
		self.epoch.clone()
	}

	pub fn current_epoch(&self) -> u64 {
		self.epoch.current_epoch()
	}

	/// Signals that metadata changed. Every descriptor reading this registry's
	/// epoch rebuilds on its next access.
	pub fn refresh(&self, reason: &str) -> u64 {
		let epoch = self.epoch.advance();
		tracing::debug!(epoch, reason, "metadata refreshed");
		epoch
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advance_is_monotonic() {
		let epoch = MetadataEpoch::new();
		assert_eq!(epoch.current_epoch(), 0);
		assert_eq!(epoch.advance(), 1);
		assert_eq!(epoch.advance(), 2);
		assert_eq!(epoch.current_epoch(), 2);
	}

	#[test]
	fn registry_handles_observe_refresh() {
		let registry = MetadataRegistry::new();
		let source = registry.epoch_source();
		let before = source.current_epoch();

		let after = registry.refresh("type added");

		assert_eq!(after, before + 1);
		assert_eq!(source.current_epoch(), after);
	}

	#[test]
	fn global_handle_reads_global_counter() {
		let before = GlobalEpoch.current_epoch();
		MetadataEpoch::global().advance();
		assert!(GlobalEpoch.current_epoch() > before);
	}
}
