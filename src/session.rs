//! Session orchestration: page-load bootstrap, login redirect, and logout.
//!
//! [`LoginClient`] owns the injected collaborators and runs each action the way the page does:
//! strictly sequentially, without retries or timeouts. The only persisted state is the identity
//! token under [`LoginConfig::storage_key`]; its presence is the sole "authenticated" signal.
//!
//! ```text
//! unauthenticated --login--> (provider, callback page stores token) --> authenticated
//! authenticated --profile fetch failure | logout--> unauthenticated
//! ```

// self
use crate::{
	_prelude::*,
	auth::IdToken,
	config::LoginConfig,
	host::{Navigator, SessionStatus, SessionView},
	http::{ApiHttpClient, ApiRequest},
	obs::{self, ActionOutcome, ActionSpan, SessionAction},
	profile::{HealthReport, Profile},
	redirect::{self, AuthorizationRequest},
	store::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestLoginClient = LoginClient<ReqwestHttpClient>;

/// Result of a page-load bootstrap.
#[derive(Debug)]
pub enum SessionOutcome {
	/// No token was stored; the login affordance is shown.
	NotAuthenticated,
	/// The profile endpoint accepted the token; the payload is displayed.
	Authenticated(Profile),
	/// The profile fetch failed for any reason; the token was discarded.
	///
	/// Rejected credentials, network failures, and malformed bodies all land here. The error is
	/// carried for diagnostics only.
	AuthFailed(Error),
}
impl SessionOutcome {
	/// Status rendered for this outcome.
	pub fn status(&self) -> SessionStatus {
		match self {
			SessionOutcome::NotAuthenticated => SessionStatus::NotAuthenticated,
			SessionOutcome::Authenticated(_) => SessionStatus::Authenticated,
			SessionOutcome::AuthFailed(_) => SessionStatus::AuthFailed,
		}
	}

	/// Profile returned by a successful fetch.
	pub fn profile(&self) -> Option<&Profile> {
		match self {
			SessionOutcome::Authenticated(profile) => Some(profile),
			_ => None,
		}
	}
}

/// Drives the implicit-flow login page against a single provider and API gateway.
#[derive(Clone)]
pub struct LoginClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every gateway request.
	pub http_client: Arc<C>,
	/// Session store holding the identity token.
	pub store: Arc<dyn SessionStore>,
	/// Page navigation surface.
	pub navigator: Arc<dyn Navigator>,
	/// On-page session view.
	pub view: Arc<dyn SessionView>,
	/// Provider, gateway, and request settings.
	pub config: LoginConfig,
}
impl<C> LoginClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: LoginConfig,
		store: Arc<dyn SessionStore>,
		navigator: Arc<dyn Navigator>,
		view: Arc<dyn SessionView>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), store, navigator, view, config }
	}

	/// Runs the page-load sequence: read the token, fetch the profile, render the outcome.
	///
	/// Every profile failure is absorbed into [`SessionOutcome::AuthFailed`] after the token is
	/// cleared. Only a failure to *read* the store is returned as `Err`, with the view left in
	/// its freshly-loaded state.
	pub async fn bootstrap(&self) -> Result<SessionOutcome> {
		const ACTION: SessionAction = SessionAction::Bootstrap;

		let span = ActionSpan::new(ACTION, "bootstrap");

		obs::record_action_outcome(ACTION, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.view.reset();

				let Some(token) = self.stored_token().await? else {
					self.view.set_status(SessionStatus::NotAuthenticated);
					self.view.show_login();

					return Ok(SessionOutcome::NotAuthenticated);
				};

				match self.fetch_profile(token).await {
					Ok(profile) => {
						self.view.set_status(SessionStatus::Authenticated);
						self.view.show_user_data(&profile.pretty());
						self.view.show_logout();

						Ok(SessionOutcome::Authenticated(profile))
					},
					Err(err) => {
						if let Err(clear_err) = self.store.clear(&self.config.storage_key).await {
							obs::warn_absorbed(
								ACTION,
								"Failed to clear rejected identity token.",
								&clear_err,
							);
						}

						self.view.set_status(SessionStatus::AuthFailed);
						self.view.show_login();

						Ok(SessionOutcome::AuthFailed(err))
					},
				}
			})
			.await;

		match &result {
			Ok(SessionOutcome::AuthFailed(_)) | Err(_) =>
				obs::record_action_outcome(ACTION, ActionOutcome::Failure),
			Ok(_) => obs::record_action_outcome(ACTION, ActionOutcome::Success),
		}

		result
	}

	/// Sends the page to the provider's authorize endpoint.
	///
	/// The redirect URI is the current origin plus the configured callback path. Control
	/// conceptually leaves the page once [`Navigator::navigate`] runs; the request is returned
	/// for hosts that need to observe it.
	pub fn login(&self) -> Result<AuthorizationRequest> {
		const ACTION: SessionAction = SessionAction::Login;

		let _guard = ActionSpan::new(ACTION, "login").entered();

		obs::record_action_outcome(ACTION, ActionOutcome::Attempt);

		let result = redirect::build_authorization_request(&self.config, &self.navigator.location());

		match &result {
			Ok(request) => {
				self.navigator.navigate(&request.authorize_url);
				obs::record_action_outcome(ACTION, ActionOutcome::Success);
			},
			Err(_) => obs::record_action_outcome(ACTION, ActionOutcome::Failure),
		}

		result
	}

	/// Removes the stored token and reloads the page.
	pub async fn logout(&self) -> Result<()> {
		const ACTION: SessionAction = SessionAction::Logout;

		let span = ActionSpan::new(ACTION, "logout");

		obs::record_action_outcome(ACTION, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.store.clear(&self.config.storage_key).await?;
				self.navigator.reload();

				Ok(())
			})
			.await;

		match result {
			Ok(_) => obs::record_action_outcome(ACTION, ActionOutcome::Success),
			Err(_) => obs::record_action_outcome(ACTION, ActionOutcome::Failure),
		}

		result
	}

	/// Probes the gateway's public health endpoint without credentials.
	pub async fn check_health(&self) -> Result<HealthReport> {
		const ACTION: SessionAction = SessionAction::Health;

		let span = ActionSpan::new(ACTION, "check_health");

		obs::record_action_outcome(ACTION, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.health_endpoint()?;
				let response =
					ApiHttpClient::get(self.http_client.as_ref(), ApiRequest::new(url)).await?;

				if !response.is_success() {
					return Err(Error::UnexpectedStatus { status: response.status });
				}

				response.json::<HealthReport>()
			})
			.await;

		match result {
			Ok(_) => obs::record_action_outcome(ACTION, ActionOutcome::Success),
			Err(_) => obs::record_action_outcome(ACTION, ActionOutcome::Failure),
		}

		result
	}

	/// Returns true when an identity token is stored.
	pub async fn is_authenticated(&self) -> Result<bool> {
		Ok(self.stored_token().await?.is_some())
	}

	async fn stored_token(&self) -> Result<Option<IdToken>> {
		Ok(self.store.get(&self.config.storage_key).await?)
	}

	async fn fetch_profile(&self, token: IdToken) -> Result<Profile> {
		let url = self.config.profile_endpoint()?;
		let request = ApiRequest::new(url).with_bearer(token);
		let response = ApiHttpClient::get(self.http_client.as_ref(), request).await?;

		if !response.is_success() {
			return Err(Error::Unauthorized { status: response.status });
		}

		response.json::<Profile>()
	}
}
#[cfg(feature = "reqwest")]
impl LoginClient<ReqwestHttpClient> {
	/// Creates a new client backed by a default reqwest transport.
	pub fn new(
		config: LoginConfig,
		store: Arc<dyn SessionStore>,
		navigator: Arc<dyn Navigator>,
		view: Arc<dyn SessionView>,
	) -> Self {
		Self::with_http_client(config, store, navigator, view, ReqwestHttpClient::default())
	}
}
impl<C> Debug for LoginClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginClient").field("config", &self.config).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		error::TransportError,
		host::{MemoryNavigator, MemoryView},
		http::{ApiResponse, HttpFuture},
		store::MemoryStore,
	};

	/// Transport that answers every request with the same canned outcome and records requests.
	struct CannedHttpClient {
		status: Option<u16>,
		body: &'static str,
		requests: Mutex<Vec<ApiRequest>>,
	}
	impl CannedHttpClient {
		fn respond(status: u16, body: &'static str) -> Self {
			Self { status: Some(status), body, requests: Mutex::new(Vec::new()) }
		}

		fn unreachable() -> Self {
			Self { status: None, body: "", requests: Mutex::new(Vec::new()) }
		}
	}
	impl ApiHttpClient for CannedHttpClient {
		fn get(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
			self.requests.lock().push(request);

			let outcome = match self.status {
				Some(status) => Ok(ApiResponse::new(status, self.body)),
				None => Err(TransportError::Io(std::io::Error::other("connection refused"))),
			};

			Box::pin(async move { outcome })
		}
	}

	struct Harness {
		client: LoginClient<CannedHttpClient>,
		http: Arc<CannedHttpClient>,
		store: Arc<MemoryStore>,
		navigator: Arc<MemoryNavigator>,
		view: Arc<MemoryView>,
	}

	async fn harness(http: CannedHttpClient, token: Option<&str>) -> Harness {
		let config = LoginConfig::default();
		let http = Arc::new(http);
		let store = Arc::new(MemoryStore::default());
		let navigator = Arc::new(MemoryNavigator::new(
			Url::parse("https://app.example.com/").expect("Origin fixture should parse."),
		));
		let view = Arc::new(MemoryView::default());

		if let Some(value) = token {
			store
				.set(&config.storage_key, IdToken::new(value))
				.await
				.expect("Seeding the store should succeed.");
		}

		let client = LoginClient::with_http_client(
			config,
			store.clone() as Arc<dyn SessionStore>,
			navigator.clone() as Arc<dyn Navigator>,
			view.clone() as Arc<dyn SessionView>,
			http.clone(),
		);

		Harness { client, http, store, navigator, view }
	}

	#[tokio::test]
	async fn missing_token_skips_network() {
		let h = harness(CannedHttpClient::respond(200, "{}"), None).await;
		let outcome = h.client.bootstrap().await.expect("Bootstrap should succeed.");
		let snapshot = h.view.snapshot();

		assert!(matches!(outcome, SessionOutcome::NotAuthenticated));
		assert_eq!(snapshot.status, Some(SessionStatus::NotAuthenticated));
		assert!(snapshot.login_visible);
		assert!(!snapshot.logout_visible);
		assert!(snapshot.user_data.is_none());
		assert!(h.http.requests.lock().is_empty());
	}

	#[tokio::test]
	async fn bearer_header_uses_stored_token() {
		let h = harness(CannedHttpClient::respond(200, r#"{"user_id":"u-1"}"#), Some("tok-1")).await;
		let outcome = h.client.bootstrap().await.expect("Bootstrap should succeed.");
		let requests = h.http.requests.lock().clone();

		assert_eq!(outcome.status(), SessionStatus::Authenticated);
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].url.path(), "/api/user");
		assert_eq!(requests[0].bearer.as_ref().map(IdToken::expose), Some("tok-1"));
	}

	#[tokio::test]
	async fn network_failure_collapses_to_auth_failed() {
		let h = harness(CannedHttpClient::unreachable(), Some("tok-2")).await;
		let outcome = h.client.bootstrap().await.expect("Bootstrap should absorb transport errors.");

		assert!(matches!(outcome, SessionOutcome::AuthFailed(Error::Transport(_))));
		assert!(!h.store.contains("id_token"));
		assert_eq!(h.view.snapshot().status, Some(SessionStatus::AuthFailed));
		assert!(h.view.snapshot().login_visible);
	}

	#[tokio::test]
	async fn malformed_body_collapses_to_auth_failed() {
		let h = harness(CannedHttpClient::respond(200, "not json"), Some("tok-3")).await;
		let outcome = h.client.bootstrap().await.expect("Bootstrap should absorb parse errors.");

		assert!(matches!(outcome, SessionOutcome::AuthFailed(Error::ResponseParse { .. })));
		assert!(!h.store.contains("id_token"));
		assert!(h.view.snapshot().user_data.is_none());
	}

	#[tokio::test]
	async fn login_navigates_to_authorize_url() {
		let h = harness(CannedHttpClient::respond(200, "{}"), None).await;
		let request = h.client.login().expect("Login should build the authorize URL.");

		assert_eq!(h.navigator.last_visited(), Some(request.authorize_url.clone()));
		assert_eq!(request.redirect_uri.as_str(), "https://app.example.com/callback.html");
		assert!(h.http.requests.lock().is_empty());
	}

	#[tokio::test]
	async fn logout_clears_token_and_reloads() {
		let h = harness(CannedHttpClient::respond(200, "{}"), Some("tok-4")).await;

		assert!(h.client.is_authenticated().await.expect("Store read should succeed."));

		h.client.logout().await.expect("Logout should succeed.");

		assert!(!h.client.is_authenticated().await.expect("Store read should succeed."));
		assert_eq!(h.navigator.reloads(), 1);

		let outcome = h.client.bootstrap().await.expect("Bootstrap after logout should succeed.");

		assert!(matches!(outcome, SessionOutcome::NotAuthenticated));
		assert!(!h.view.snapshot().logout_visible);
	}
}
