use std::borrow::Cow;

/// Hard errors surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
	/// A constructor or resolver received an argument it cannot accept.
	#[error("invalid argument: {0}")]
	InvalidArgument(&'static str),

	/// A required input was absent.
	#[error("missing argument: {0}")]
	MissingArgument(&'static str),

	#[error("invalid descriptor config: {0}")]
	Config(#[from] toml::de::Error),
}

pub type Result<T, E = DescriptorError> = std::result::Result<T, E>;

/// A tag collection step failed.
///
/// Never returned from descriptor accessors; the merge keeps whatever was
/// collected before the failure and reports this through `tracing`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tag supplier `{supplier}` failed: {reason}")]
pub struct SupplyError {
	pub supplier: Cow<'static, str>,
	pub reason: String,
}

impl SupplyError {
	pub fn new(supplier: impl Into<Cow<'static, str>>, reason: impl Into<String>) -> Self {
		Self {
			supplier: supplier.into(),
			reason: reason.into(),
		}
	}
}
