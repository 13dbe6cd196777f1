//! Declarative metadata tags attached to members.
//!
//! A tag is an immutable value identified by its [`TagKind`]. Two tags of the
//! same kind collide when layered together; consumers look tags up by kind
//! through a [`TagSet`].
//!
//! # Key types
//!
//! | Type | Meaning |
//! |---|---|
//! | [`Tag`] | Object-safe tag trait, value-comparable across `dyn Tag` |
//! | [`TagKind`] | Dedup key distinguishing tag kinds |
//! | [`TagRef`] | Shared handle (`Arc<dyn Tag>`) |
//! | [`TagSet`] | Finalized keyed view built by a [`ContainerBuilder`] |
//! | [`DefaultTag`] | Tag type with a well-defined default for lookup misses |

mod kind;
mod set;
mod tag;
pub mod well_known;

pub use kind::TagKind;
pub use set::{ContainerBuilder, IndexedBuilder, TagSet};
pub use tag::{DefaultTag, DynTagEq, Tag, TagRef, tag};
pub use well_known::{Browsable, Category, Description, DesignTimeOnly, DisplayName, ReadOnly};
