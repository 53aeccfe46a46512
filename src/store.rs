//! Session storage contracts and built-in store implementations for the identity token.
//!
//! A store plays the role of browser local storage: a flat key/value space where at most one
//! token lives under any key. Presence of the token is the only "authenticated" signal.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::IdToken};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by session token stores.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Fetches the token stored under `key`, if present.
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<IdToken>>;

	/// Persists or replaces the token stored under `key`.
	fn set<'a>(&'a self, key: &'a str, token: IdToken) -> StoreFuture<'a, ()>;

	/// Removes the token stored under `key`, returning the previous value.
	///
	/// Clearing an absent key succeeds with `None`.
	fn clear<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<IdToken>>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "storage quota exceeded".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("storage quota exceeded"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
