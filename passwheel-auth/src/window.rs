//! Rolling token window.
//!
//! [`Passkey`] owns the shared secret, the interval, and the
//! {previous, current, next} token triple. The triple is three independent
//! atomic cells: the refresher overwrites each slot in turn while any number
//! of validators read concurrently, lock-free. A reader may observe a mix of
//! pre- and post-refresh slots mid-overwrite; validation tolerates that
//! because it checks all three slots and adjacent buckets overlap across a
//! refresh anyway.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::secret::{Secret, SecretError, SecretSpec};
use crate::token::{DEFAULT_INTERVAL, derive, unix_now};

/// A rolling window of one-time tokens over a shared secret.
///
/// Both sides of a connection hold a `Passkey` built from the same secret
/// and interval: one side reads [`Passkey::current`] to stamp requests, the
/// other calls [`Passkey::validate`] to check them. Construction performs
/// the first refresh, so tokens are valid immediately; keeping them fresh
/// afterwards is the refresher's job (see [`Passkey::run`]).
pub struct Passkey {
    secret: Secret,
    interval: Duration,
    // previous, current, next - written only by refresh, read by anyone.
    slots: [AtomicU32; 3],
}

impl Passkey {
    /// Create a window with the default 60 s interval.
    ///
    /// # Errors
    ///
    /// Returns `SecretError` when an encoded secret in `spec` is malformed;
    /// callers fall back to `SecretSpec::Generate`.
    pub fn new(spec: SecretSpec) -> Result<Self, SecretError> {
        Self::with_interval(spec, DEFAULT_INTERVAL)
    }

    /// Create a window with an explicit interval.
    ///
    /// A zero interval falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns `SecretError` when an encoded secret in `spec` is malformed.
    pub fn with_interval(spec: SecretSpec, interval: Duration) -> Result<Self, SecretError> {
        let passkey = Self {
            secret: Secret::new(spec)?,
            interval: effective_interval(interval),
            slots: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
        };
        passkey.refresh();
        Ok(passkey)
    }

    /// Recompute the triple against the current wall clock.
    pub fn refresh(&self) {
        self.refresh_at(unix_now());
    }

    /// Recompute the triple against a pinned instant (Unix seconds).
    ///
    /// Slots are overwritten independently, not swapped as a unit; see the
    /// module docs for why transiently mixed reads are acceptable.
    pub fn refresh_at(&self, now_unix: i64) {
        for (i, slot) in self.slots.iter().enumerate() {
            let time_offset = i as i64 - 1;
            let token = derive(&self.secret, self.interval, time_offset, now_unix);
            // Relaxed: each slot is an independent value, no cross-slot
            // ordering is claimed.
            slot.store(token, Ordering::Relaxed);
        }
    }

    /// The token for the current time bucket (as of the last refresh).
    #[must_use]
    pub fn current(&self) -> u32 {
        self.slots[1].load(Ordering::Relaxed)
    }

    /// All three tokens, {previous, current, next}.
    ///
    /// Three independent reads, not a transactional snapshot.
    #[must_use]
    pub fn tokens(&self) -> [u32; 3] {
        [
            self.slots[0].load(Ordering::Relaxed),
            self.slots[1].load(Ordering::Relaxed),
            self.slots[2].load(Ordering::Relaxed),
        ]
    }

    /// Whether `candidate` matches any slot of the window.
    ///
    /// Accepting the previous and next buckets absorbs one interval of
    /// clock or latency skew between the two endpoints. No replay
    /// protection: a valid token validates any number of times within its
    /// window.
    #[must_use]
    pub fn validate(&self, candidate: u32) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.load(Ordering::Relaxed) == candidate)
    }

    /// Change the interval and recompute the triple immediately.
    ///
    /// A zero interval falls back to the default. Requires exclusive access,
    /// so it cannot race a running refresher.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = effective_interval(interval);
        self.refresh();
    }

    /// The active interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The shared secret, for export and distribution by the owner.
    #[must_use]
    pub fn secret(&self) -> &Secret {
        &self.secret
    }
}

fn effective_interval(interval: Duration) -> Duration {
    if interval.is_zero() {
        DEFAULT_INTERVAL
    } else {
        interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED: &str = "AW6TJVTYMAYJXLWFW2WWJ6D3Q5B2AY25";
    const T: i64 = 1_700_000_000;

    // Reference triple at instant T with the 60 s interval.
    const PREVIOUS: u32 = 3713044369;
    const CURRENT: u32 = 2974118224;
    const NEXT: u32 = 1085349011;

    fn window() -> Passkey {
        Passkey::new(SecretSpec::Encoded(ENCODED.to_string())).unwrap()
    }

    #[test]
    fn test_construction_refreshes_immediately() {
        let passkey = window();
        assert_eq!(passkey.current(), passkey.tokens()[1]);
        assert!(passkey.validate(passkey.current()));
    }

    #[test]
    fn test_reference_triple() {
        let passkey = window();
        passkey.refresh_at(T);
        assert_eq!(passkey.tokens(), [PREVIOUS, CURRENT, NEXT]);
        assert_eq!(passkey.current(), CURRENT);
    }

    #[test]
    fn test_validate_absorbs_one_interval_of_skew() {
        let passkey = window();
        passkey.refresh_at(T);

        assert!(passkey.validate(PREVIOUS));
        assert!(passkey.validate(CURRENT));
        assert!(passkey.validate(NEXT));

        // Two intervals out is beyond the window.
        assert!(!passkey.validate(4019655725)); // bucket at -2
        assert!(!passkey.validate(4285547405)); // bucket at +2
        assert!(!passkey.validate(CURRENT + 1));
    }

    #[test]
    fn test_independent_windows_agree() {
        let a = window();
        let b = window();
        a.refresh_at(T);
        b.refresh_at(T);
        assert_eq!(a.tokens(), b.tokens());
    }

    #[test]
    fn test_interval_selects_different_tokens() {
        let a = Passkey::with_interval(
            SecretSpec::Encoded(ENCODED.to_string()),
            Duration::from_secs(30),
        )
        .unwrap();
        let b = Passkey::with_interval(
            SecretSpec::Encoded(ENCODED.to_string()),
            Duration::from_secs(60),
        )
        .unwrap();
        let instant = 1_700_000_035;
        a.refresh_at(instant);
        b.refresh_at(instant);
        assert_eq!(a.current(), 3171693919);
        assert_eq!(b.current(), 2974118224);
    }

    #[test]
    fn test_zero_interval_falls_back_to_default() {
        let passkey =
            Passkey::with_interval(SecretSpec::Encoded(ENCODED.to_string()), Duration::ZERO)
                .unwrap();
        assert_eq!(passkey.interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_set_interval_recomputes() {
        let mut passkey = window();
        passkey.refresh_at(T);
        assert_eq!(passkey.current(), CURRENT);

        passkey.set_interval(Duration::from_secs(90));
        assert_eq!(passkey.interval(), Duration::from_secs(90));
        // Recomputed against the live clock, so the pinned triple is gone.
        assert_ne!(passkey.tokens(), [PREVIOUS, CURRENT, NEXT]);

        passkey.set_interval(Duration::ZERO);
        assert_eq!(passkey.interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_malformed_secret_rejected() {
        // Passkey has no Debug, so unwrap_err is unavailable here.
        let Err(err) = Passkey::new(SecretSpec::Encoded("short".to_string())) else {
            panic!("malformed secret must be rejected");
        };
        assert_eq!(
            err,
            SecretError::InvalidLength {
                expected: 32,
                actual: 5
            }
        );
    }

    #[test]
    fn test_secret_roundtrips_through_window() {
        let passkey = window();
        assert_eq!(passkey.secret().encode(), ENCODED);
    }

    #[test]
    fn test_concurrent_validation_during_refresh() {
        let passkey = window();
        passkey.refresh_at(T);

        // Writer re-stores the same pinned triple while readers validate:
        // exercises the lock-free load/store paths under contention with a
        // deterministic expected answer.
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..10_000 {
                        assert!(passkey.validate(CURRENT));
                        assert!(!passkey.validate(CURRENT + 1));
                    }
                });
            }
            for _ in 0..10_000 {
                passkey.refresh_at(T);
            }
        });
    }
}
