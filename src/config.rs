//! Client configuration: provider endpoint, API gateway, and the fixed request parameters.
//!
//! [`LoginConfig::default`] reproduces the deployment this client was written for. Every field
//! carries its own serde default so a JSON document only needs to name what it overrides.

// std
use std::sync::LazyLock;
// self
use crate::{
	_prelude::*,
	auth::{NoncePolicy, ScopeList},
	error::ConfigError,
};

/// OAuth client identifier registered with the provider.
pub const DEFAULT_CLIENT_ID: &str = "aje22riv1e41161ls8ch";
/// Provider authorization endpoint.
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "https://auth.yandex.cloud/oauth/authorize";
/// API gateway base URL serving the profile endpoint.
pub const DEFAULT_API_BASE: &str = "https://d5dbieh1fdvcu3dhdl1a.kf69zffa.apigw.yandexcloud.net";
/// Path on the host origin that captures the provider redirect.
pub const DEFAULT_CALLBACK_PATH: &str = "/callback.html";
/// Session store key holding the identity token.
pub const DEFAULT_STORAGE_KEY: &str = "id_token";
/// Scopes requested on every login.
pub const DEFAULT_SCOPES: [&str; 3] = ["openid", "email", "profile"];

static DEFAULT_AUTHORIZATION_URL: LazyLock<Url> = LazyLock::new(|| {
	Url::parse(DEFAULT_AUTHORIZATION_ENDPOINT).expect("Default authorization endpoint is a URL.")
});
static DEFAULT_API_BASE_URL: LazyLock<Url> =
	LazyLock::new(|| Url::parse(DEFAULT_API_BASE).expect("Default API base is a URL."));

const PROFILE_PATH: &str = "api/user";
const HEALTH_PATH: &str = "health";

/// Immutable settings consumed by [`LoginClient`](crate::session::LoginClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoginConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Provider authorization endpoint the browser is sent to.
	pub authorization_endpoint: Url,
	/// Base URL of the API gateway.
	pub api_base: Url,
	/// Path appended to the host origin to form the redirect URI.
	pub callback_path: String,
	/// Scopes requested in the authorize URL.
	pub scope: ScopeList,
	/// Nonce policy applied per login.
	pub nonce: NoncePolicy,
	/// Session store key for the identity token.
	pub storage_key: String,
}
impl LoginConfig {
	/// Parses a JSON configuration document, reporting the offending field path on failure.
	pub fn from_json_str(raw: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::Parse { source }.into())
	}

	/// Overrides the client identifier.
	pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = client_id.into();

		self
	}

	/// Overrides the authorization endpoint.
	pub fn with_authorization_endpoint(mut self, endpoint: Url) -> Self {
		self.authorization_endpoint = endpoint;

		self
	}

	/// Overrides the API gateway base URL.
	pub fn with_api_base(mut self, api_base: Url) -> Self {
		self.api_base = api_base;

		self
	}

	/// Overrides the callback path; a missing leading slash is added.
	pub fn with_callback_path(mut self, path: impl Into<String>) -> Self {
		let path = path.into();

		self.callback_path = if path.starts_with('/') { path } else { format!("/{path}") };

		self
	}

	/// Overrides the requested scopes.
	pub fn with_scope(mut self, scope: ScopeList) -> Self {
		self.scope = scope;

		self
	}

	/// Overrides the nonce policy.
	pub fn with_nonce(mut self, nonce: NoncePolicy) -> Self {
		self.nonce = nonce;

		self
	}

	/// Overrides the session store key.
	pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
		self.storage_key = key.into();

		self
	}

	/// Absolute URL of the profile endpoint (`{api_base}/api/user`).
	pub fn profile_endpoint(&self) -> Result<Url> {
		self.api_endpoint(PROFILE_PATH)
	}

	/// Absolute URL of the public health endpoint (`{api_base}/health`).
	pub fn health_endpoint(&self) -> Result<Url> {
		self.api_endpoint(HEALTH_PATH)
	}

	fn api_endpoint(&self, path: &str) -> Result<Url> {
		let raw = format!("{}/{path}", self.api_base.as_str().trim_end_matches('/'));

		Url::parse(&raw)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: raw, source }.into())
	}
}
impl Default for LoginConfig {
	fn default() -> Self {
		Self {
			client_id: DEFAULT_CLIENT_ID.into(),
			authorization_endpoint: DEFAULT_AUTHORIZATION_URL.clone(),
			api_base: DEFAULT_API_BASE_URL.clone(),
			callback_path: DEFAULT_CALLBACK_PATH.into(),
			scope: ScopeList::new(DEFAULT_SCOPES).unwrap_or_default(),
			nonce: NoncePolicy::default(),
			storage_key: DEFAULT_STORAGE_KEY.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_deployment_constants() {
		let config = LoginConfig::default();

		assert_eq!(config.client_id, "aje22riv1e41161ls8ch");
		assert_eq!(config.authorization_endpoint.as_str(), DEFAULT_AUTHORIZATION_ENDPOINT);
		assert_eq!(config.scope.joined(), "openid email profile");
		assert_eq!(config.storage_key, "id_token");
		assert_eq!(config.nonce, NoncePolicy::Random);
		assert_eq!(
			config.profile_endpoint().expect("Default profile endpoint should build.").as_str(),
			"https://d5dbieh1fdvcu3dhdl1a.kf69zffa.apigw.yandexcloud.net/api/user"
		);
	}

	#[test]
	fn built_in_endpoint_constants_parse() {
		for raw in [DEFAULT_AUTHORIZATION_ENDPOINT, DEFAULT_API_BASE] {
			assert!(Url::parse(raw).is_ok(), "{raw} should parse as a URL.");
		}

		assert_eq!(DEFAULT_AUTHORIZATION_URL.as_str(), DEFAULT_AUTHORIZATION_ENDPOINT);
		assert_eq!(
			DEFAULT_API_BASE_URL.host_str(),
			Some("d5dbieh1fdvcu3dhdl1a.kf69zffa.apigw.yandexcloud.net")
		);
	}

	#[test]
	fn endpoints_respect_base_path() {
		let config = LoginConfig::default().with_api_base(
			Url::parse("http://127.0.0.1:8080/gateway/")
				.expect("Base URL fixture should parse successfully."),
		);

		assert_eq!(
			config.profile_endpoint().expect("Profile endpoint should build.").as_str(),
			"http://127.0.0.1:8080/gateway/api/user"
		);
		assert_eq!(
			config.health_endpoint().expect("Health endpoint should build.").as_str(),
			"http://127.0.0.1:8080/gateway/health"
		);
	}

	#[test]
	fn partial_document_overrides_named_fields() {
		let config = LoginConfig::from_json_str(
			r#"{"client_id":"other-client","scope":"openid","nonce":{"fixed":"random123"}}"#,
		)
		.expect("Partial config document should parse.");

		assert_eq!(config.client_id, "other-client");
		assert_eq!(config.scope.joined(), "openid");
		assert_eq!(config.nonce, NoncePolicy::Fixed("random123".into()));
		assert_eq!(config.callback_path, DEFAULT_CALLBACK_PATH);
	}

	#[test]
	fn invalid_document_reports_field_path() {
		let err = LoginConfig::from_json_str(r#"{"api_base":"not a url"}"#)
			.expect_err("Invalid URL must be rejected.");

		match err {
			Error::Config(ConfigError::Parse { source }) => {
				assert_eq!(source.path().to_string(), "api_base");
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn callback_path_gains_leading_slash() {
		let config = LoginConfig::default().with_callback_path("oauth/callback");

		assert_eq!(config.callback_path, "/oauth/callback");
	}
}
