//! HTTP surface for passwheel: an axum middleware that gates requests on
//! a rolling window token.
//!
//! The crate is intentionally small. It exposes a [`TokenGate`] state
//! struct and the [`require_token`] middleware function; everything about
//! token derivation and window maintenance lives in `passwheel-auth`.

pub mod middleware;

pub use middleware::{TOKEN_HEADER, TokenGate, require_token};
