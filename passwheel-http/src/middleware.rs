//! Token gate middleware for axum.
//!
//! Mounts a [`Passkey`] validator in front of a router: requests carry the
//! window token in a header (default name `token`, decimal form), and
//! anything absent, malformed, or outside the rolling window is answered
//! with `401 Unauthorized` and an empty body. Parse failures fold into the
//! same 401, so a probe learns nothing about why it was rejected.
//!
//! # Setup
//!
//! ```ignore
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use passwheel_auth::{Passkey, SecretSpec};
//! use passwheel_http::{TokenGate, require_token};
//!
//! let passkey = Arc::new(Passkey::new(SecretSpec::Generate)?);
//! let gate = TokenGate::new(passkey);
//! let app: Router = Router::new()
//!     .route("/demo", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(gate, require_token));
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderName, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use passwheel_auth::Passkey;

/// Default name of the request header carrying the token.
pub const TOKEN_HEADER: &str = "token";

/// Shared state for [`require_token`]: the window to validate against and
/// the header to read the candidate from.
#[derive(Clone)]
pub struct TokenGate {
    passkey: Arc<Passkey>,
    header: HeaderName,
}

impl TokenGate {
    /// Gate requests against `passkey`, reading the default `token` header.
    #[must_use]
    pub fn new(passkey: Arc<Passkey>) -> Self {
        Self {
            passkey,
            header: HeaderName::from_static(TOKEN_HEADER),
        }
    }

    /// Read the candidate from a different header.
    #[must_use]
    pub fn with_header(mut self, header: HeaderName) -> Self {
        self.header = header;
        self
    }

    /// The window this gate validates against.
    #[must_use]
    pub fn passkey(&self) -> &Arc<Passkey> {
        &self.passkey
    }

    /// Candidate token from the request, if present and well-formed.
    fn candidate(&self, request: &Request) -> Option<u32> {
        let value = request.headers().get(&self.header)?;
        value.to_str().ok()?.parse().ok()
    }
}

/// Require a valid window token on every request.
///
/// Forwards the request unchanged when the header parses as a decimal u32
/// matching the window; otherwise short-circuits with a bodyless 401.
pub async fn require_token(
    State(gate): State<TokenGate>,
    request: Request,
    next: Next,
) -> Response {
    match gate.candidate(&request) {
        Some(candidate) if gate.passkey.validate(candidate) => next.run(request).await,
        _ => {
            // The candidate is deliberately not echoed.
            debug!(header = %gate.header, "request rejected: missing or invalid token");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}
