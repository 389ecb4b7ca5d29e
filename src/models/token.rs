use chrono::{DateTime, TimeDelta, Utc};

/// Bearer credential presented to the downstream API
#[derive(Debug, Clone, PartialEq)]
pub struct BearerToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl BearerToken {
    /// Build a token from a server-issued lifetime, counted from `issued_at`
    ///
    /// Returns `None` when the expiry instant is not representable.
    pub fn new(value: String, expires_in: i64, issued_at: DateTime<Utc>) -> Option<Self> {
        let expires_at = TimeDelta::try_seconds(expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))?;
        Some(Self { value, expires_at })
    }

    /// True when the token is expired or expires within `skew_secs` of `now`
    pub fn is_stale(&self, now: DateTime<Utc>, skew_secs: i64) -> bool {
        // A window past the end of time covers every expiry
        match TimeDelta::try_seconds(skew_secs.max(0)).and_then(|skew| now.checked_add_signed(skew)) {
            Some(horizon) => self.expires_at <= horizon,
            None => true,
        }
    }

    /// Short prefix safe for logs
    pub fn redacted(&self) -> String {
        let prefix: String = self.value.chars().take(8).collect();
        format!("{}...", prefix)
    }
}
