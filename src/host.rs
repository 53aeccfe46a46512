//! Host-environment seams: page navigation and the on-page session view.
//!
//! In a browser these map to `window.location` and three page regions (login button, logout
//! button, status/user-data display). They are injected into
//! [`LoginClient`](crate::session::LoginClient) instead of being looked up globally, and the
//! in-memory implementations record every interaction for headless hosts and tests.

// self
use crate::_prelude::*;

/// Session status rendered into the status region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
	/// No identity token is stored.
	NotAuthenticated,
	/// The profile endpoint accepted the stored token.
	Authenticated,
	/// The profile fetch failed and the stored token was discarded.
	AuthFailed,
}
impl SessionStatus {
	/// Returns the user-facing status text.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionStatus::NotAuthenticated => "Not authenticated",
			SessionStatus::Authenticated => "Authenticated",
			SessionStatus::AuthFailed => "Auth failed",
		}
	}
}
impl Display for SessionStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Page navigation surface.
pub trait Navigator
where
	Self: Send + Sync,
{
	/// Current page location; only its origin is used to build the redirect URI.
	fn location(&self) -> Url;

	/// Replaces the whole page with `url` (full-page redirect, not a popup).
	fn navigate(&self, url: &Url);

	/// Reloads the current page.
	fn reload(&self);
}

/// On-page session view.
///
/// Affordances are only ever revealed during a page load; [`reset`](Self::reset) restores the
/// freshly-loaded state where every region is hidden.
pub trait SessionView
where
	Self: Send + Sync,
{
	/// Hides every region and clears the status text.
	fn reset(&self);

	/// Writes the status text.
	fn set_status(&self, status: SessionStatus);

	/// Reveals the login affordance.
	fn show_login(&self);

	/// Reveals the logout affordance.
	fn show_logout(&self);

	/// Writes `payload` into the user-data region and reveals it.
	fn show_user_data(&self, payload: &str);
}

/// Recording [`Navigator`] for headless hosts and tests.
#[derive(Debug)]
pub struct MemoryNavigator(Mutex<NavigatorState>);
impl MemoryNavigator {
	/// Creates a navigator positioned at `location`.
	pub fn new(location: Url) -> Self {
		Self(Mutex::new(NavigatorState { location, visited: Vec::new(), reloads: 0 }))
	}

	/// URLs passed to [`Navigator::navigate`], oldest first.
	pub fn visited(&self) -> Vec<Url> {
		self.0.lock().visited.clone()
	}

	/// Most recent navigation target, if any.
	pub fn last_visited(&self) -> Option<Url> {
		self.0.lock().visited.last().cloned()
	}

	/// Number of reloads requested.
	pub fn reloads(&self) -> usize {
		self.0.lock().reloads
	}
}
impl Navigator for MemoryNavigator {
	fn location(&self) -> Url {
		self.0.lock().location.clone()
	}

	fn navigate(&self, url: &Url) {
		let mut state = self.0.lock();

		state.location = url.clone();
		state.visited.push(url.clone());
	}

	fn reload(&self) {
		self.0.lock().reloads += 1;
	}
}

#[derive(Debug)]
struct NavigatorState {
	location: Url,
	visited: Vec<Url>,
	reloads: usize,
}

/// Snapshot of everything a [`MemoryView`] currently displays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
	/// Status text, if any has been written since the last reset.
	pub status: Option<SessionStatus>,
	/// Whether the login affordance is visible.
	pub login_visible: bool,
	/// Whether the logout affordance is visible.
	pub logout_visible: bool,
	/// User-data region contents when visible.
	pub user_data: Option<String>,
}

/// Recording [`SessionView`] for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryView(Mutex<ViewSnapshot>);
impl MemoryView {
	/// Returns a copy of the current view state.
	pub fn snapshot(&self) -> ViewSnapshot {
		self.0.lock().clone()
	}
}
impl SessionView for MemoryView {
	fn reset(&self) {
		*self.0.lock() = ViewSnapshot::default();
	}

	fn set_status(&self, status: SessionStatus) {
		self.0.lock().status = Some(status);
	}

	fn show_login(&self) {
		self.0.lock().login_visible = true;
	}

	fn show_logout(&self) {
		self.0.lock().logout_visible = true;
	}

	fn show_user_data(&self, payload: &str) {
		self.0.lock().user_data = Some(payload.to_owned());
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_text_matches_page_copy() {
		assert_eq!(SessionStatus::NotAuthenticated.to_string(), "Not authenticated");
		assert_eq!(SessionStatus::Authenticated.to_string(), "Authenticated");
		assert_eq!(SessionStatus::AuthFailed.to_string(), "Auth failed");
	}

	#[test]
	fn memory_navigator_records_navigation_and_reloads() {
		let start = Url::parse("https://app.example.com/index.html")
			.expect("Start URL fixture should parse successfully.");
		let target = Url::parse("https://auth.example.com/authorize")
			.expect("Target URL fixture should parse successfully.");
		let navigator = MemoryNavigator::new(start);

		navigator.navigate(&target);
		navigator.reload();

		assert_eq!(navigator.location(), target);
		assert_eq!(navigator.visited(), vec![target.clone()]);
		assert_eq!(navigator.last_visited(), Some(target));
		assert_eq!(navigator.reloads(), 1);
	}

	#[test]
	fn memory_view_reset_hides_everything() {
		let view = MemoryView::default();

		view.set_status(SessionStatus::Authenticated);
		view.show_user_data("{}");
		view.show_logout();
		view.reset();

		assert_eq!(view.snapshot(), ViewSnapshot::default());
	}
}
