//! Runs the login page headlessly: bootstrap from a file-backed store, print the outcome, and
//! fall back to printing the authorize URL when no usable token is stored.
//!
//! Set `IMPLICIT_LOGIN_TOKEN` to simulate the callback page having captured a token, and
//! `IMPLICIT_LOGIN_CONFIG` to point at a JSON config document overriding the defaults.

// std
use std::{env, fs, sync::Arc};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use implicit_login::{
	auth::IdToken,
	config::LoginConfig,
	host::{MemoryNavigator, Navigator, SessionStatus, SessionView},
	session::{LoginClient, SessionOutcome},
	store::{FileStore, SessionStore},
};

/// View that mirrors every page update to stdout.
struct ConsoleView;
impl SessionView for ConsoleView {
	fn reset(&self) {}

	fn set_status(&self, status: SessionStatus) {
		println!("[status] {status}");
	}

	fn show_login(&self) {
		println!("[login] visible");
	}

	fn show_logout(&self) {
		println!("[logout] visible");
	}

	fn show_user_data(&self, payload: &str) {
		println!("[user data]\n{payload}");
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = match env::var("IMPLICIT_LOGIN_CONFIG") {
		Ok(path) => LoginConfig::from_json_str(&fs::read_to_string(path)?)?,
		Err(_) => LoginConfig::default(),
	};
	let store = Arc::new(FileStore::open(env::temp_dir().join("implicit-login-demo.json"))?);

	if let Ok(raw) = env::var("IMPLICIT_LOGIN_TOKEN") {
		store.set(&config.storage_key, IdToken::new(raw)).await?;
	}

	let navigator = Arc::new(MemoryNavigator::new(Url::parse("http://localhost:8080/")?));
	let client = LoginClient::new(
		config,
		store.clone() as Arc<dyn SessionStore>,
		navigator.clone() as Arc<dyn Navigator>,
		Arc::new(ConsoleView),
	);

	match client.bootstrap().await? {
		SessionOutcome::Authenticated(profile) => {
			if let Some(info) = profile.user_info() {
				println!("Signed in as {}.", info.email.as_deref().unwrap_or("unknown"));
			}
		},
		SessionOutcome::AuthFailed(err) => {
			eprintln!("Stored token was rejected: {err}.");
			client.login()?;
		},
		SessionOutcome::NotAuthenticated => {
			client.login()?;
		},
	}

	if let Some(url) = navigator.last_visited() {
		println!("Send your user to {url}.");
	}

	Ok(())
}
