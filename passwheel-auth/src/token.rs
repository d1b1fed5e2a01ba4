//! Time-bucketed token derivation.
//!
//! A token is derived from the shared secret and the wall clock alone, so
//! both endpoints compute matching values without any handshake:
//!
//! 1. Round the instant down to the interval boundary (the "time bucket"),
//!    as a Unix timestamp.
//! 2. Encode the bucket as an 8-byte little-endian integer.
//! 3. HMAC-SHA1 those 8 bytes with the secret as key (20-byte digest).
//! 4. `n` = low nibble of digest byte 19 (0–15); the token is the
//!    little-endian `u32` read from digest bytes `[n, n + 4)`.
//!
//! This is HOTP-shaped (RFC 4226) but deliberately not HOTP: the message is
//! a time bucket rather than a counter, the byte order is little-endian end
//! to end, and no decimal truncation is applied — tokens range over the full
//! 32-bit space. Deployed validators expect exactly these bytes, so the
//! divergence from the RFC is load-bearing, not a defect to correct.
//!
//! `time_offset` selects an adjacent bucket (−1 previous, 0 current, +1
//! next); deriving all three is what gives the rolling window its one
//! interval of skew tolerance.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::secret::Secret;

type HmacSha1 = Hmac<Sha1>;

/// Default token interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Derive the token for one time bucket.
///
/// Pure: the clock is injected as `now_unix` (Unix seconds), so callers can
/// pin the instant for deterministic verification. `time_offset` shifts the
/// instant by whole intervals before rounding. Cannot fail for any secret,
/// interval, or instant.
#[must_use]
pub fn derive(secret: &Secret, interval: Duration, time_offset: i64, now_unix: i64) -> u32 {
    // Sub-second intervals are not representable in the bucket math.
    let interval_secs = (interval.as_secs() as i64).max(1);
    let instant = now_unix + time_offset * interval_secs;
    // Floor, not nearest: pre-epoch instants round toward -inf as well.
    let bucket = instant.div_euclid(interval_secs) * interval_secs;

    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(&(bucket as u64).to_le_bytes());
    let digest = mac.finalize().into_bytes();

    let n = usize::from(digest[19] & 0x0f);
    u32::from_le_bytes([digest[n], digest[n + 1], digest[n + 2], digest[n + 3]])
}

/// Current wall clock in Unix seconds.
pub(crate) fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        // Clock set before the epoch; still well-defined for bucketing.
        Err(err) => -(err.duration().as_secs() as i64),
    }
}
