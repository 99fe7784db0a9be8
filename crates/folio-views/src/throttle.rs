//! Per-key submit throttle for public forms.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::ViewError;

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5);

/// Allows one submission per key per window.
#[derive(Debug)]
pub struct SubmitThrottle {
    window: Duration,
    last: Mutex<HashMap<String, Instant>>,
}

impl Default for SubmitThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl SubmitThrottle {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `key`, or refuse it if the previous accepted
    /// attempt was less than one window ago.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Throttled`] with the whole seconds still to wait,
    /// rounded up.
    pub fn check(&self, key: &str) -> Result<(), ViewError> {
        let now = Instant::now();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = last.get(key) {
            let elapsed = now.duration_since(*previous);
            if elapsed < self.window {
                let wait = self.window - elapsed;
                let wait_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
                return Err(ViewError::Throttled { wait_secs });
            }
        }
        last.insert(key.to_string(), now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn second_attempt_within_window_is_refused() {
        let throttle = SubmitThrottle::default();
        throttle.check("contact").unwrap();

        tokio::time::advance(Duration::from_millis(1500)).await;
        let err = throttle.check("contact").unwrap_err();
        assert_eq!(err.to_string(), "Please wait 4 seconds before trying again");

        tokio::time::advance(Duration::from_millis(3500)).await;
        assert!(throttle.check("contact").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let throttle = SubmitThrottle::default();
        throttle.check("contact").unwrap();
        assert!(throttle.check("newsletter").is_ok());
    }
}
