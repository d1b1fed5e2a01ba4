//! Rolling shared-secret token authentication primitive.
//!
//! Time-windowed one-time `u32` tokens derived from a 20-byte shared secret,
//! HOTP/TOTP-style, for machine-to-machine authentication without a central
//! credential store. Both endpoints hold the same secret and derive matching
//! tokens independently; a {previous, current, next} window absorbs one
//! interval of clock or latency skew.
//!
//! The derive/validate hot path is intentionally free of IO and locks:
//! - No filesystem, network, or database access
//! - Derivation is a pure function of (secret, interval, instant)
//! - Validation reads three atomic cells
//!
//! The only background piece is the refresher task ([`Passkey::run`]),
//! driven by an interval timer and a [`ShutdownSignal`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use passwheel_auth::{Passkey, SecretSpec, ShutdownCoordinator};
//!
//! // Validator side: build the window and keep it fresh.
//! let passkey = Arc::new(Passkey::new(SecretSpec::Generate)?);
//! let shutdown = ShutdownCoordinator::new();
//! let refresher = passkey.spawn_refresher(shutdown.signal());
//!
//! // Client side: same secret, independently derived tokens.
//! let client = Passkey::new(SecretSpec::Encoded(passkey.secret().encode()))?;
//! assert!(passkey.validate(client.current()));
//! ```

mod base32;
mod refresher;
pub mod secret;
pub mod shutdown;
pub mod token;
pub mod window;

pub use secret::{ENCODED_LEN, SECRET_LEN, Secret, SecretError, SecretSpec};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
pub use token::{DEFAULT_INTERVAL, derive};
pub use window::Passkey;
