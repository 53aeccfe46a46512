//! Auth-domain values: requested scopes, the identity token, and nonce policy.

pub mod nonce;
pub mod scope;
pub mod token;

pub use nonce::*;
pub use scope::*;
pub use token::*;
