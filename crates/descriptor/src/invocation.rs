//! Invocation target resolution.
//!
//! Members are normally invoked on the instance a caller hands in. When another
//! object has been associated with that instance, the association of the
//! requested type is the target instead.

use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::descriptor::MemberDescriptor;
use crate::error::{DescriptorError, Result};

/// Type-erased component instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Maps an instance to the object members of `ty` should be invoked on.
pub trait AssociationResolver: Send + Sync {
	fn association(&self, ty: TypeId, instance: &Instance) -> Instance;
}

/// Resolves every instance to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl AssociationResolver for IdentityResolver {
	fn association(&self, _ty: TypeId, instance: &Instance) -> Instance {
		instance.clone()
	}
}

type WeakInstance = Weak<dyn Any + Send + Sync>;

struct Associations {
	primary: WeakInstance,
	secondaries: Vec<WeakInstance>,
}

impl Associations {
	fn is_live_for(&self, primary: &Instance) -> bool {
		self.primary.upgrade().is_some_and(|live| Arc::ptr_eq(&live, primary))
	}
}

/// Explicit primary → secondary associations.
///
/// Both sides are held weakly. Entries whose primary has been dropped are
/// pruned on every [`associate`](Self::associate), and an entry is removed once
/// its last secondary is.
#[derive(Default)]
pub struct AssociationTable {
	entries: RwLock<FxHashMap<usize, Associations>>,
}

fn address(instance: &Instance) -> usize {
	Arc::as_ptr(instance) as *const () as usize
}

fn concrete_type(instance: &Instance) -> TypeId {
	let value: &(dyn Any + Send + Sync) = &**instance;
	value.type_id()
}

impl AssociationTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of primaries with at least one association recorded.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	pub fn associate(&self, primary: &Instance, secondary: &Instance) {
		let mut entries = self.entries.write();
		entries.retain(|_, entry| entry.primary.strong_count() > 0);
		for entry in entries.values_mut() {
			entry.secondaries.retain(|s| s.strong_count() > 0);
		}

		let entry = entries.entry(address(primary)).or_insert_with(|| Associations {
			primary: Arc::downgrade(primary),
			secondaries: Vec::new(),
		});
		if !entry.is_live_for(primary) {
			entry.primary = Arc::downgrade(primary);
			entry.secondaries.clear();
		}
		entry.secondaries.push(Arc::downgrade(secondary));
	}

	pub fn remove(&self, primary: &Instance, secondary: &Instance) {
		let mut entries = self.entries.write();
		let key = address(primary);
		let Some(entry) = entries.get_mut(&key) else {
			return;
		};
		entry
			.secondaries
			.retain(|s| s.upgrade().is_some_and(|live| !Arc::ptr_eq(&live, secondary)));
		if entry.secondaries.is_empty() {
			entries.remove(&key);
		}
	}
}

impl AssociationResolver for AssociationTable {
	fn association(&self, ty: TypeId, instance: &Instance) -> Instance {
		if concrete_type(instance) == ty {
			return instance.clone();
		}
		let entries = self.entries.read();
		entries
			.get(&address(instance))
			.filter(|entry| entry.is_live_for(instance))
			.and_then(|entry| {
				entry
					.secondaries
					.iter()
					.filter_map(Weak::upgrade)
					.find(|s| concrete_type(s) == ty)
			})
			.unwrap_or_else(|| instance.clone())
	}
}

impl MemberDescriptor {
	/// Returns the object this member should be invoked on for `instance`.
	pub fn invocation_target(
		&self,
		ty: Option<TypeId>,
		instance: Option<&Instance>,
		resolver: &dyn AssociationResolver,
	) -> Result<Instance> {
		let ty = ty.ok_or(DescriptorError::MissingArgument("type"))?;
		let instance = instance.ok_or(DescriptorError::MissingArgument("instance"))?;
		Ok(resolver.association(ty, instance))
	}
}
