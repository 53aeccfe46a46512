//! Identity token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Opaque identity token issued by the provider and presented as a bearer credential.
///
/// The value is never inspected or verified here; the API gateway is the verifier.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdToken(String);
impl IdToken {
	/// Wraps a raw token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the `Authorization` header value for this token.
	pub fn bearer_header(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for IdToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for IdToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("IdToken").field(&"<redacted>").finish()
	}
}
impl Display for IdToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
