//! Implicit-flow authorization request construction.

// self
use crate::{_prelude::*, config::LoginConfig, error::ConfigError};

/// `response_type` requested from the provider: an identity token delivered directly in the
/// redirect, with no code exchange.
pub const RESPONSE_TYPE: &str = "id_token";

/// Authorization redirect metadata returned by [`LoginClient::login`](crate::session::LoginClient::login).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Callback URI on the host origin that receives the provider redirect.
	pub redirect_uri: Url,
	/// Nonce embedded in the request.
	pub nonce: String,
	/// Fully-formed authorize URL the page navigates to.
	pub authorize_url: Url,
}

/// Builds the authorize URL for a page currently at `location`.
///
/// The redirect URI is the ASCII origin of `location` followed by the configured callback path;
/// any path, query, or fragment of `location` is ignored.
pub fn build_authorization_request(
	config: &LoginConfig,
	location: &Url,
) -> Result<AuthorizationRequest> {
	let redirect_uri = redirect_uri_for(location, &config.callback_path)?;
	let nonce = config.nonce.generate();
	let mut authorize_url = config.authorization_endpoint.clone();
	let mut pairs = authorize_url.query_pairs_mut();

	pairs.append_pair("client_id", &config.client_id);
	pairs.append_pair("response_type", RESPONSE_TYPE);

	if !config.scope.is_empty() {
		pairs.append_pair("scope", &config.scope.joined());
	}

	pairs.append_pair("redirect_uri", redirect_uri.as_str());
	pairs.append_pair("nonce", &nonce);

	drop(pairs);

	Ok(AuthorizationRequest { redirect_uri, nonce, authorize_url })
}

fn redirect_uri_for(location: &Url, callback_path: &str) -> Result<Url> {
	let origin = location.origin();

	if !origin.is_tuple() {
		return Err(ConfigError::OpaqueOrigin.into());
	}

	Url::parse(&format!("{}{callback_path}", origin.ascii_serialization()))
		.map_err(|source| ConfigError::InvalidRedirect { source }.into())
}
