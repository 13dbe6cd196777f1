//! Cross-thread behavior of the descriptor cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use strata_descriptor::{MemberDescriptor, MemberKind, MetadataRegistry, SupplyError, TagSupplier};
use strata_tags::{Category, TagRef, tag};

const READERS: usize = 8;

struct Counting {
	calls: AtomicUsize,
}

impl TagSupplier for Counting {
	fn collect_tags(&self, into: &mut Vec<TagRef>) -> Result<(), SupplyError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		into.push(tag(Category::DATA));
		Ok(())
	}
}

#[test]
fn concurrent_readers_of_stale_descriptor_merge_once() {
	let registry = MetadataRegistry::new();
	let counting = Arc::new(Counting {
		calls: AtomicUsize::new(0),
	});
	let d = MemberDescriptor::new(MemberKind::Property, "Width", [])
		.unwrap()
		.with_epoch_source(registry.epoch_source())
		.with_supplier(counting.clone());

	thread::scope(|s| {
		for _ in 0..READERS {
			s.spawn(|| assert_eq!(&*d.category(), "Data"));
		}
	});
	assert_eq!(counting.calls.load(Ordering::SeqCst), 1);

	registry.refresh("reload");
	thread::scope(|s| {
		for _ in 0..READERS {
			s.spawn(|| assert_eq!(&*d.category(), "Data"));
		}
	});
	assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn readers_only_observe_complete_views() {
	let registry = MetadataRegistry::new();
	let d = MemberDescriptor::new(MemberKind::Property, "Width", [tag(Category::LAYOUT)])
		.unwrap()
		.with_epoch_source(registry.epoch_source());
	let layout = tag(Category::LAYOUT);
	let data = tag(Category::DATA);

	thread::scope(|s| {
		s.spawn(|| {
			for i in 0..200 {
				let next = if i % 2 == 0 { &data } else { &layout };
				d.set_raw_tags([next.clone()]);
			}
		});
		for _ in 0..READERS {
			s.spawn(|| {
				for _ in 0..200 {
					let tags = d.tags();
					assert_eq!(tags.len(), 1);
					let category = tags.get_as::<Category>().expect("category present");
					assert!(*category == Category::LAYOUT || *category == Category::DATA);
				}
			});
		}
	});

	d.set_raw_tags([tag(Category::ACTION)]);
	assert_eq!(&*d.category(), "Action");
}
