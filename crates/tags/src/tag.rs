use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::TagKind;

/// Shared handle to an immutable tag.
pub type TagRef = Arc<dyn Tag>;

/// Value equality across type-erased tags.
///
/// Implemented for every `PartialEq + 'static` type; tag authors never
/// implement it by hand.
pub trait DynTagEq {
	fn as_any(&self) -> &dyn Any;
	fn dyn_eq(&self, other: &dyn Any) -> bool;
}

impl<T: Any + PartialEq> DynTagEq for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn dyn_eq(&self, other: &dyn Any) -> bool {
		other.downcast_ref::<T>().is_some_and(|other| self == other)
	}
}

/// A unit of declarative metadata attached to a member.
///
/// ```
/// use strata_tags::{Tag, TagKind};
///
/// #[derive(Debug, PartialEq)]
/// struct Unit(&'static str);
///
/// impl Tag for Unit {}
///
/// assert_eq!(Unit("ms").kind(), TagKind::of::<Unit>());
/// ```
pub trait Tag: DynTagEq + fmt::Debug + Send + Sync + 'static {
	/// Dedup identity. Tags sharing a kind override each other when layered.
	fn kind(&self) -> TagKind {
		TagKind::of::<Self>()
	}

	/// Returns true if this value is the kind's default, i.e. carries no
	/// information beyond the tag being absent.
	fn is_default(&self) -> bool {
		false
	}
}

impl dyn Tag {
	/// Downcasts to the concrete tag type.
	pub fn downcast_ref<T: Tag>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	/// Same kind and equal value.
	pub fn tag_eq(&self, other: &dyn Tag) -> bool {
		self.kind() == other.kind() && self.dyn_eq(other.as_any())
	}
}

impl PartialEq for dyn Tag {
	fn eq(&self, other: &Self) -> bool {
		self.tag_eq(other)
	}
}

/// Tag type with a well-defined value for lookups that miss.
pub trait DefaultTag: Tag + Sized {
	fn default_ref() -> &'static Self;
}

/// Wraps a tag value into a shared [`TagRef`].
pub fn tag<T: Tag>(value: T) -> TagRef {
	Arc::new(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, PartialEq)]
	struct Note(&'static str);
	impl Tag for Note {}

	#[derive(Debug, PartialEq)]
	struct Other(&'static str);
	impl Tag for Other {}

	#[derive(Debug, PartialEq)]
	struct PerTarget {
		target: u64,
		value: i32,
	}
	impl Tag for PerTarget {
		fn kind(&self) -> TagKind {
			TagKind::slotted::<Self>(self.target)
		}
	}

	#[test]
	fn equal_values_compare_equal_through_dyn() {
		let a = tag(Note("x"));
		let b = tag(Note("x"));
		let c = tag(Note("y"));
		assert!(a == b);
		assert!(a != c);
	}

	#[test]
	fn different_types_never_compare_equal() {
		let a = tag(Note("x"));
		let b = tag(Other("x"));
		assert!(a != b);
	}

	#[test]
	fn slotted_kinds_do_not_compare_equal_across_slots() {
		let a = tag(PerTarget { target: 1, value: 5 });
		let b = tag(PerTarget { target: 2, value: 5 });
		assert_ne!(a.kind(), b.kind());
		assert!(a != b);
	}

	#[test]
	fn downcast_recovers_concrete_value() {
		let t = tag(Note("hello"));
		assert_eq!(t.downcast_ref::<Note>(), Some(&Note("hello")));
		assert!(t.downcast_ref::<Other>().is_none());
	}
}
