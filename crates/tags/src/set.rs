//! Finalized, keyed view over a deduplicated tag sequence.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{DefaultTag, Tag, TagKind, TagRef};

#[cfg(test)]
mod tests;

/// Builds the keyed container handed to consumers once a merge completes.
pub trait ContainerBuilder: Send + Sync {
	fn build(&self, tags: Arc<[TagRef]>) -> TagSet;
}

/// Default builder: hash index over the tag sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedBuilder;

impl ContainerBuilder for IndexedBuilder {
	fn build(&self, tags: Arc<[TagRef]>) -> TagSet {
		TagSet::from_tags(tags)
	}
}

/// Immutable tag container with O(1) lookup by [`TagKind`].
///
/// Cloning is cheap; all clones share one index. Iteration follows the order of
/// the sequence the set was built from.
#[derive(Clone)]
pub struct TagSet {
	inner: Arc<Inner>,
}

struct Inner {
	tags: Arc<[TagRef]>,
	index: FxHashMap<TagKind, usize>,
}

impl TagSet {
	pub fn empty() -> Self {
		Self::from_tags(Arc::from(Vec::new()))
	}

	/// Indexes `tags`. If two tags share a kind, lookups resolve to the later one.
	pub fn from_tags(tags: Arc<[TagRef]>) -> Self {
		let mut index = FxHashMap::with_capacity_and_hasher(tags.len(), Default::default());
		for (i, t) in tags.iter().enumerate() {
			index.insert(t.kind(), i);
		}
		Self {
			inner: Arc::new(Inner { tags, index }),
		}
	}

	pub fn get(&self, kind: TagKind) -> Option<&TagRef> {
		self.inner.index.get(&kind).map(|&i| &self.inner.tags[i])
	}

	/// Looks up the default-slot tag of type `T`.
	pub fn get_as<T: Tag>(&self) -> Option<&T> {
		self.get(TagKind::of::<T>())?.downcast_ref::<T>()
	}

	/// Looks up `T`, falling back to its default value on a miss.
	pub fn get_or_default<T: DefaultTag>(&self) -> &T {
		self.get_as::<T>().unwrap_or(T::default_ref())
	}

	pub fn contains(&self, kind: TagKind) -> bool {
		self.inner.index.contains_key(&kind)
	}

	/// Returns true if the set holds a tag equal to `tag`.
	pub fn matches(&self, tag: &dyn Tag) -> bool {
		self.get(tag.kind()).is_some_and(|held| held.tag_eq(tag))
	}

	pub fn len(&self) -> usize {
		self.inner.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.tags.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &TagRef> {
		self.inner.tags.iter()
	}

	pub fn as_slice(&self) -> &[TagRef] {
		&self.inner.tags
	}

	/// Shared handle to the underlying sequence.
	pub fn to_shared(&self) -> Arc<[TagRef]> {
		self.inner.tags.clone()
	}
}

impl Default for TagSet {
	fn default() -> Self {
		Self::empty()
	}
}

impl PartialEq for TagSet {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl fmt::Debug for TagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}
