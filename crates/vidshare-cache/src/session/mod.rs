//! Session storage module.

mod refresh_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore, TokenStore};
