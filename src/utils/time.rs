use chrono::{DateTime, Duration, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `issued_at + ttl`, saturating at the representable bounds
pub fn expires_at(issued_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    issued_at.checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// A token is expired once `now` is strictly past its expiry
pub fn is_expired(expires: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expires
}
