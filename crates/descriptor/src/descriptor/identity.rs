//! Equality and hashing.
//!
//! Two descriptors are equal when they share a kind, a name, and a resolved
//! category and description, and their merged tags are pairwise equal in
//! order. Both sides are brought up to date before comparing. The hash is the
//! name hash, so equal descriptors always hash alike.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::MemberDescriptor;

/// Stable hash of a member name.
pub fn name_hash(name: &str) -> u64 {
	let mut hasher = FxHasher::default();
	name.hash(&mut hasher);
	hasher.finish()
}

impl PartialEq for MemberDescriptor {
	fn eq(&self, other: &Self) -> bool {
		if std::ptr::eq(self, other) {
			return true;
		}
		if self.kind != other.kind || self.name_hash != other.name_hash || self.name != other.name {
			return false;
		}

		let (ours, theirs) = (self.view(), other.view());
		ours.category() == theirs.category()
			&& ours.description() == theirs.description()
			&& ours.tags == theirs.tags
	}
}

impl Eq for MemberDescriptor {}

impl Hash for MemberDescriptor {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.name_hash);
	}
}
