//! Nonce policy for authorization requests.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

const NONCE_LEN: usize = 32;

/// How the `nonce` query parameter is chosen for each login redirect.
///
/// The nonce is sent but never checked on the way back; callers that need replay protection
/// must verify it against the issued identity token themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoncePolicy {
	/// Fresh 32-character alphanumeric value per request.
	#[default]
	Random,
	/// Constant value, for providers or fixtures that expect a known nonce.
	Fixed(String),
}
impl NoncePolicy {
	/// Produces the nonce for a new authorization request.
	pub fn generate(&self) -> String {
		match self {
			NoncePolicy::Random => random_string(NONCE_LEN),
			NoncePolicy::Fixed(value) => value.clone(),
		}
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
