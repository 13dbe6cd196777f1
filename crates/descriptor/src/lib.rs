//! Layered member descriptors.
//!
//! A [`MemberDescriptor`] names a member and resolves the tags layered onto it
//! (declared tags, then [`TagSupplier`] layers, base to derived) into a single
//! deduplicated [`TagSet`](strata_tags::TagSet) where the last tag of each kind
//! wins. The result is cached and rebuilt lazily when the tags are replaced or
//! the [`EpochSource`] it reads reports a new epoch.
//!
//! ```
//! use strata_descriptor::{MemberDescriptor, MemberKind, MetadataRegistry};
//! use strata_tags::{Category, tag};
//!
//! let registry = MetadataRegistry::new();
//! let base = MemberDescriptor::new(MemberKind::Property, "Width", [tag(Category::LAYOUT)])
//! 	.unwrap()
//! 	.with_epoch_source(registry.epoch_source());
//! let derived = MemberDescriptor::layered(&base, [tag(Category::APPEARANCE)]).unwrap();
//!
//! assert_eq!(&*base.category(), "Layout");
//! assert_eq!(&*derived.category(), "Appearance");
//! ```

pub mod config;
mod descriptor;
pub mod epoch;
mod error;
pub mod invocation;
pub mod merge;

pub use config::{DescriptorConfig, FailurePolicy};
pub use descriptor::{MemberDescriptor, MemberKind, name_hash};
pub use epoch::{EpochSource, GlobalEpoch, MetadataEpoch, MetadataRegistry};
pub use error::{DescriptorError, Result, SupplyError};
pub use invocation::{AssociationResolver, AssociationTable, IdentityResolver, Instance};
pub use merge::{TagSupplier, supplier_fn};
