//! Headless OAuth 2.0 implicit-flow login client: send the user to the identity provider, keep
//! the returned identity token in a session store, and fetch the user profile with it.
//!
//! The browser is modelled as injected collaborators ([`store::SessionStore`],
//! [`host::Navigator`], [`host::SessionView`]) so the same [`session::LoginClient`] drives a web
//! host, a desktop shell, or a test harness.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod obs;
pub mod profile;
pub mod redirect;
pub mod session;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::IdToken,
		config::LoginConfig,
		host::{MemoryNavigator, MemoryView, Navigator, SessionView},
		http::ReqwestHttpClient,
		session::LoginClient,
		store::{MemoryStore, SessionStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = LoginClient<ReqwestHttpClient>;

	/// Handles to every in-memory collaborator wired into a test client.
	#[derive(Clone, Debug)]
	pub struct TestHost {
		/// Session store shared with the client.
		pub store: Arc<MemoryStore>,
		/// Navigator shared with the client.
		pub navigator: Arc<MemoryNavigator>,
		/// View shared with the client.
		pub view: Arc<MemoryView>,
	}

	/// Origin reported by the test navigator.
	pub const TEST_ORIGIN: &str = "https://app.example.com";

	/// Builds a config whose API base points at `api_base` (typically an `httpmock` server).
	pub fn test_config(api_base: &str) -> LoginConfig {
		LoginConfig::default()
			.with_api_base(Url::parse(api_base).expect("Test API base should parse successfully."))
	}

	/// Constructs a [`LoginClient`] backed by in-memory collaborators and the reqwest transport.
	///
	/// When `token` is provided it is written into the store before the client is returned,
	/// standing in for the callback page that captures the provider redirect.
	pub async fn build_reqwest_test_client(
		config: LoginConfig,
		token: Option<&str>,
	) -> (ReqwestTestClient, TestHost) {
		let store = Arc::new(MemoryStore::default());
		let navigator = Arc::new(MemoryNavigator::new(
			Url::parse(TEST_ORIGIN).expect("Test origin should parse successfully."),
		));
		let view = Arc::new(MemoryView::default());

		if let Some(value) = token {
			store
				.set(&config.storage_key, IdToken::new(value))
				.await
				.expect("Seeding the memory store should succeed.");
		}

		let client = LoginClient::with_http_client(
			config,
			store.clone() as Arc<dyn SessionStore>,
			navigator.clone() as Arc<dyn Navigator>,
			view.clone() as Arc<dyn SessionView>,
			ReqwestHttpClient::default(),
		);

		(client, TestHost { store, navigator, view })
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
