use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Identity used to deduplicate tags.
///
/// By default every tag type has exactly one kind. A type may carve out several
/// coexisting kinds by assigning a `slot`, e.g. a tag that is allowed to appear
/// once per target name.
#[derive(Clone, Copy, Debug)]
pub struct TagKind {
	type_id: TypeId,
	type_name: &'static str,
	slot: u64,
}

impl TagKind {
	/// Returns the default kind for tag type `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: std::any::type_name::<T>(),
			slot: 0,
		}
	}

	/// Returns a kind for `T` distinguished by `slot`.
	pub fn slotted<T: ?Sized + 'static>(slot: u64) -> Self {
		Self {
			slot,
			..Self::of::<T>()
		}
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Rust type name of the tag, for diagnostics only.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn slot(&self) -> u64 {
		self.slot
	}

	/// Returns true if this kind belongs to tag type `T`, ignoring the slot.
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.type_id == TypeId::of::<T>()
	}
}

impl PartialEq for TagKind {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id && self.slot == other.slot
	}
}

impl Eq for TagKind {}

impl Hash for TagKind {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id.hash(state);
		self.slot.hash(state);
	}
}

impl std::fmt::Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let short = self.type_name.rsplit("::").next().unwrap_or(self.type_name);
		if self.slot == 0 {
			write!(f, "{short}")
		} else {
			write!(f, "{short}#{}", self.slot)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct A;
	struct B;

	#[test]
	fn kinds_of_distinct_types_differ() {
		assert_ne!(TagKind::of::<A>(), TagKind::of::<B>());
		assert_eq!(TagKind::of::<A>(), TagKind::of::<A>());
	}

	#[test]
	fn slots_split_one_type_into_several_kinds() {
		assert_ne!(TagKind::slotted::<A>(1), TagKind::slotted::<A>(2));
		assert_eq!(TagKind::slotted::<A>(0), TagKind::of::<A>());
		assert!(TagKind::slotted::<A>(7).is::<A>());
	}

	#[test]
	fn type_id_is_shared_across_slots() {
		assert_eq!(TagKind::of::<A>().type_id(), TypeId::of::<A>());
		assert_eq!(TagKind::slotted::<A>(4).type_id(), TagKind::of::<A>().type_id());
		assert_ne!(TagKind::of::<B>().type_id(), TypeId::of::<A>());
	}

	#[test]
	fn display_uses_short_type_name() {
		assert_eq!(TagKind::of::<A>().to_string(), "A");
		assert_eq!(TagKind::slotted::<B>(3).to_string(), "B#3");
	}
}
