//! Transport primitives for API gateway calls.
//!
//! The module exposes [`ApiHttpClient`] so downstream crates can plug in a custom HTTP stack
//! (a `fetch` binding, a recorded fixture, a proxy-aware client) without touching the session
//! logic. The client only ever issues `GET` requests, optionally carrying a bearer credential,
//! and hands back the raw status and body so the session layer decides what counts as success.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, auth::IdToken, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::get`].
pub type HttpFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing gateway `GET` requests.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind `Arc` by a
/// [`LoginClient`](crate::session::LoginClient). No timeout or retry is expected: the future
/// resolves when the transport resolves.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes the request, resolving to the response status and body.
	///
	/// Any HTTP status (including 4xx/5xx) is a successful transport outcome; only network-level
	/// failures produce [`TransportError`].
	fn get(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse>;
}

/// Outbound `GET` request description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// Absolute endpoint URL.
	pub url: Url,
	/// Bearer credential for the `Authorization` header, when the endpoint is protected.
	pub bearer: Option<IdToken>,
}
impl ApiRequest {
	/// Builds an unauthenticated request.
	pub fn new(url: Url) -> Self {
		Self { url, bearer: None }
	}

	/// Attaches a bearer credential.
	pub fn with_bearer(mut self, token: IdToken) -> Self {
		self.bearer = Some(token);

		self
	}
}

/// Status and raw body returned by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Parses the body as JSON, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::ResponseParse { source, status: self.status })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn get(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
		let client = self.0.clone();

		Box::pin(async move {
			let ApiRequest { url, bearer } = request;
			let mut builder = client.get(url).header(ACCEPT, "application/json");

			if let Some(token) = bearer {
				builder = builder.header(AUTHORIZATION, token.bearer_header());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
