//! Descriptor behavior knobs.
//!
//! ```toml
//! on_supply_failure = "assert"
//! trace_rebuilds = false
//! ```

use serde::Deserialize;

use crate::error::Result;

/// What a merge does when a tag supplier fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
	/// Log and continue with the tags collected so far.
	#[default]
	Absorb,
	/// Like `Absorb` in release builds; panics in debug builds.
	Assert,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescriptorConfig {
	pub on_supply_failure: FailurePolicy,
	/// Emit a debug event every time a descriptor rebuilds its tags.
	pub trace_rebuilds: bool,
}

impl Default for DescriptorConfig {
	fn default() -> Self {
		Self {
			on_supply_failure: FailurePolicy::Absorb,
			trace_rebuilds: true,
		}
	}
}

impl DescriptorConfig {
	pub fn from_toml_str(src: &str) -> Result<Self> {
		Ok(toml::from_str(src)?)
	}
}
