use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Browsable, Category, Description, tag};

#[derive(Debug, PartialEq)]
struct Weight(u32);
impl Tag for Weight {}

fn set_of(tags: Vec<TagRef>) -> TagSet {
	IndexedBuilder.build(Arc::from(tags))
}

#[test]
fn lookup_by_kind_returns_stored_tag() {
	let set = set_of(vec![tag(Category::DATA), tag(Weight(3))]);

	assert_eq!(set.get_as::<Category>(), Some(&Category::DATA));
	assert_eq!(set.get_as::<Weight>(), Some(&Weight(3)));
	assert!(set.contains(TagKind::of::<Weight>()));
	assert!(!set.contains(TagKind::of::<Description>()));
}

#[test]
fn miss_resolves_to_kind_default() {
	let set = set_of(vec![tag(Weight(1))]);

	assert_eq!(set.get_or_default::<Category>().as_str(), "Misc");
	assert!(set.get_or_default::<Browsable>().get());
	assert!(set.get_as::<Category>().is_none());
}

#[test]
fn iteration_preserves_input_order() {
	let set = set_of(vec![tag(Weight(1)), tag(Category::LAYOUT), tag(Description::new("d"))]);
	let kinds: Vec<String> = set.iter().map(|t| t.kind().to_string()).collect();

	assert_eq!(kinds, vec!["Weight", "Category", "Description"]);
	assert_eq!(set.len(), 3);
}

#[test]
fn later_duplicate_shadows_earlier_on_lookup() {
	let set = set_of(vec![tag(Weight(1)), tag(Weight(2))]);
	assert_eq!(set.get_as::<Weight>(), Some(&Weight(2)));
}

#[test]
fn matches_requires_equal_value() {
	let set = set_of(vec![tag(Browsable::NO)]);

	assert!(set.matches(&Browsable::NO));
	assert!(!set.matches(&Browsable::YES));
	assert!(!set.matches(&Weight(0)));
}

#[test]
fn sets_compare_pairwise_in_order() {
	let a = set_of(vec![tag(Weight(1)), tag(Category::DATA)]);
	let b = set_of(vec![tag(Weight(1)), tag(Category::DATA)]);
	let swapped = set_of(vec![tag(Category::DATA), tag(Weight(1))]);

	assert!(a == b);
	assert!(a != swapped);
	assert!(TagSet::empty().is_empty());
}
