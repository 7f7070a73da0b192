//! Hashing and token infrastructure.
//!
//! Use cases depend on the [`HashProvider`] and [`TokenProvider`] traits only.
//! The crate ships one implementation of each:
//!
//! * [`BcryptHashProvider`] - bcrypt password hashes, computed off the async runtime
//! * [`JwtTokenProvider`] - HS256 JSON Web Tokens with expiry
//!
//! Both fail with [`ProviderError`], which keeps the underlying cause.

mod error;
mod hash;
mod token;

pub use error::ProviderError;
pub use hash::{BcryptHashProvider, HashProvider};
pub use token::{JwtTokenProvider, TokenClaims, TokenProvider, TokenSubject};
