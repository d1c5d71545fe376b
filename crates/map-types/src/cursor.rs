//! Collaboration cursor types.

use serde::{Deserialize, Serialize};

/// A remote collaborator's pointer position.
///
/// Cursors arrive as complete snapshots from the collaboration feed, so
/// several entries may share a `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub user_id: String,
    pub user_name: String,
    /// Hex color such as `#00c864`
    pub color: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl CursorPosition {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        color: impl Into<String>,
        longitude: f64,
        latitude: f64,
        timestamp: u64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            color: color.into(),
            longitude,
            latitude,
            timestamp,
        }
    }

    /// Returns true if the cursor was last reported more than `max_age_ms`
    /// before `now_ms`.
    pub fn is_stale(&self, now_ms: u64, max_age_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp) > max_age_ms
    }
}
