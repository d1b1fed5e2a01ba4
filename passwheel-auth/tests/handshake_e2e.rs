//! End-to-end tests for the generator/validator handshake.
//!
//! Exercises the public API the way a deployment uses it: one side owns the
//! window and distributes its encoded secret, the other derives matching
//! tokens independently.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use passwheel_auth::{
    DEFAULT_INTERVAL, Passkey, Secret, SecretSpec, ShutdownCoordinator, derive,
};

#[test]
fn test_generated_secret_distributes_to_client() {
    // Validator side generates; the encoded form travels to the client.
    let validator = Passkey::new(SecretSpec::Generate).unwrap();
    let encoded = validator.secret().encode();

    let client = Passkey::new(SecretSpec::Encoded(encoded)).unwrap();
    assert!(validator.validate(client.current()));
}

#[test]
fn test_malformed_secret_falls_back_to_generated() {
    // The startup recovery path for hosts: a bad encoded secret is not
    // fatal, it downgrades to a generated one.
    let passkey = Passkey::new(SecretSpec::Encoded("not-a-real-secret".into()))
        .or_else(|_| Passkey::new(SecretSpec::Generate))
        .unwrap();
    assert!(passkey.validate(passkey.current()));
}

#[test]
fn test_pure_derive_matches_window() {
    let secret = Secret::generate();
    let window = Passkey::new(SecretSpec::Raw(*secret.as_bytes())).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    // At most one bucket boundary can pass between construction and here,
    // and the window absorbs exactly that much.
    assert!(window.validate(derive(&secret, DEFAULT_INTERVAL, 0, now)));
}

#[tokio::test]
async fn test_refresher_lifecycle() {
    let passkey = Arc::new(
        Passkey::with_interval(SecretSpec::Generate, Duration::from_secs(3600)).unwrap(),
    );
    let coordinator = ShutdownCoordinator::new();
    let refresher = passkey.spawn_refresher(coordinator.signal());

    assert!(passkey.validate(passkey.current()));

    coordinator.shutdown();
    refresher.await.unwrap();

    // Cancellation freezes the triple at its last-computed values.
    let frozen = passkey.tokens();
    assert!(frozen.into_iter().all(|token| passkey.validate(token)));
}
