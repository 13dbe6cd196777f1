//! Tags every member understands.
//!
//! Each has a default value, so looking one up on a member that never declared
//! it resolves to the default instead of failing.

use std::borrow::Cow;

use crate::{DefaultTag, Tag};

macro_rules! text_tag {
	($(#[$meta:meta])* $name:ident, default = $default:literal) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash)]
		pub struct $name(Cow<'static, str>);

		impl $name {
			pub const DEFAULT: Self = Self(Cow::Borrowed($default));

			pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
				Self(value.into())
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl Tag for $name {
			fn is_default(&self) -> bool {
				*self == Self::DEFAULT
			}
		}

		impl DefaultTag for $name {
			fn default_ref() -> &'static Self {
				static DEFAULT: $name = $name::DEFAULT;
				&DEFAULT
			}
		}
	};
}

macro_rules! flag_tag {
	($(#[$meta:meta])* $name:ident, default = $default:literal) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub struct $name(pub bool);

		impl $name {
			pub const YES: Self = Self(true);
			pub const NO: Self = Self(false);
			pub const DEFAULT: Self = Self($default);

			pub fn get(self) -> bool {
				self.0
			}
		}

		impl Tag for $name {
			fn is_default(&self) -> bool {
				*self == Self::DEFAULT
			}
		}

		impl DefaultTag for $name {
			fn default_ref() -> &'static Self {
				static DEFAULT: $name = $name::DEFAULT;
				&DEFAULT
			}
		}
	};
}

text_tag!(
	/// Grouping shown alongside the member.
	Category,
	default = "Misc"
);

impl Category {
	pub const ACTION: Self = Self(Cow::Borrowed("Action"));
	pub const APPEARANCE: Self = Self(Cow::Borrowed("Appearance"));
	pub const BEHAVIOR: Self = Self(Cow::Borrowed("Behavior"));
	pub const DATA: Self = Self(Cow::Borrowed("Data"));
	pub const LAYOUT: Self = Self(Cow::Borrowed("Layout"));
}

text_tag!(
	/// Help text for the member.
	Description,
	default = ""
);

text_tag!(
	/// Overrides the member's display name. An empty value keeps the
	/// descriptor's own display name.
	DisplayName,
	default = ""
);

flag_tag!(
	/// Whether the member is listed when enumerating members.
	Browsable,
	default = true
);

flag_tag!(DesignTimeOnly, default = false);

flag_tag!(ReadOnly, default = false);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_report_is_default() {
		assert!(Category::DEFAULT.is_default());
		assert!(!Category::APPEARANCE.is_default());
		assert!(DisplayName::new("").is_default());
		assert!(!DisplayName::new("Width").is_default());
		assert!(Browsable::YES.is_default());
		assert!(!Browsable::NO.is_default());
	}

	#[test]
	fn default_ref_matches_const() {
		assert_eq!(Category::default_ref().as_str(), "Misc");
		assert_eq!(Description::default_ref().as_str(), "");
		assert!(Browsable::default_ref().get());
		assert!(!ReadOnly::default_ref().get());
	}

	#[test]
	fn owned_and_borrowed_values_compare_by_content() {
		assert_eq!(Category::new(String::from("Data")), Category::DATA);
	}
}
