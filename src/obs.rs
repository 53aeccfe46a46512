//! Optional observability helpers for session actions.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `implicit_login.session` with the `action`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `implicit_login_session_total` counter for every
//!   attempt/success/failure, labeled by `action` + `outcome`.

mod metrics;
mod tracing;

pub(crate) use metrics::*;
pub(crate) use tracing::*;

// self
use crate::_prelude::*;

/// Session actions observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionAction {
	/// Page-load bootstrap and profile fetch.
	Bootstrap,
	/// Redirect to the provider.
	Login,
	/// Token removal and reload.
	Logout,
	/// Gateway health probe.
	Health,
}
impl SessionAction {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionAction::Bootstrap => "bootstrap",
			SessionAction::Login => "login",
			SessionAction::Logout => "logout",
			SessionAction::Health => "health",
		}
	}
}
impl Display for SessionAction {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
	/// Entry to a session action.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure, whether propagated or absorbed into the view.
	Failure,
}
impl ActionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ActionOutcome::Attempt => "attempt",
			ActionOutcome::Success => "success",
			ActionOutcome::Failure => "failure",
		}
	}
}
impl Display for ActionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
