// self
use crate::{_prelude::*, obs::SessionAction};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub(crate) type InstrumentedAction<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub(crate) type InstrumentedAction<F> = F;

/// A span builder used by session actions.
#[derive(Clone, Debug)]
pub(crate) struct ActionSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ActionSpan {
	/// Creates a new span tagged with the provided action + stage.
	pub(crate) fn new(action: SessionAction, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("implicit_login.session", action = action.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (action, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub(crate) fn entered(self) -> ActionSpanGuard {
		#[cfg(feature = "tracing")]
		{
			ActionSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			ActionSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub(crate) fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAction<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`ActionSpan::entered`].
pub(crate) struct ActionSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for ActionSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ActionSpanGuard(..)")
	}
}

/// Emits a warning for failures the session absorbs instead of returning.
pub(crate) fn warn_absorbed(action: SessionAction, what: &'static str, err: &dyn StdError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(action = action.as_str(), error = %err, "{what}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (action, what, err);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn action_span_noop_without_tracing() {
		let _guard = ActionSpan::new(SessionAction::Login, "test").entered();
	}

	#[test]
	fn warn_absorbed_accepts_any_error() {
		let err = std::io::Error::other("disk full");

		warn_absorbed(SessionAction::Bootstrap, "Failed to clear identity token.", &err);
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = ActionSpan::new(SessionAction::Bootstrap, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
