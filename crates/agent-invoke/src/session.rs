use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Invocation-scoped remote session identifier.
///
/// Ids look like `chat-<unix seconds>-<sequence>`. The sequence is shared by
/// the whole process, so two ids generated in the same second still differ.
/// Nothing is guaranteed across processes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh id from the current wall clock.
    pub fn generate() -> Self {
        Self::at(SystemTime::now())
    }

    /// Generates a fresh id for the given point in time.
    ///
    /// Times before the unix epoch are clamped to zero.
    pub fn at(now: SystemTime) -> Self {
        let secs = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("chat-{secs}-{seq}"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
