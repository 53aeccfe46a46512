// self
use crate::obs::{ActionOutcome, SessionAction};

/// Records an action outcome via the global metrics recorder (when enabled).
pub(crate) fn record_action_outcome(action: SessionAction, outcome: ActionOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"implicit_login_session_total",
			"action" => action.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (action, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_action_outcome_noop_without_metrics() {
		record_action_outcome(SessionAction::Bootstrap, ActionOutcome::Failure);
	}
}
