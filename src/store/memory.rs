//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::IdToken,
	store::{SessionStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, IdToken>>>;

/// Thread-safe storage backend that keeps tokens in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns true when a token is stored under `key`.
	pub fn contains(&self, key: &str) -> bool {
		self.0.read().contains_key(key)
	}
}
impl SessionStore for MemoryStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<IdToken>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(key).cloned()) })
	}

	fn set<'a>(&'a self, key: &'a str, token: IdToken) -> StoreFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().insert(key.to_owned(), token);

			Ok(())
		})
	}

	fn clear<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<IdToken>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.write().remove(key)) })
	}
}
