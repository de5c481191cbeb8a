//! In-memory log resource for tests
//!
//! Stands in for the device's console log so scanner and engine behavior can
//! be exercised without a network. Fetch and reset failures can be scripted
//! to simulate an unreachable or misbehaving device agent.

use std::sync::Mutex;

use super::{FetchError, LogResource, ResetError};

/// In-memory stand-in for the remote console log
#[derive(Default)]
pub struct MemoryLog {
    content: Mutex<Vec<u8>>,
    fail_fetch: Mutex<bool>,
    fail_resets: Mutex<u32>,
    reset_count: Mutex<u32>,
}

impl MemoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-populated with content
    pub fn with_content(content: impl AsRef<[u8]>) -> Self {
        let log = Self::new();
        log.append(content);
        log
    }

    /// Append bytes, as the instrumentation process would
    pub fn append(&self, bytes: impl AsRef<[u8]>) {
        let mut content = self.content.lock().unwrap();
        content.extend_from_slice(bytes.as_ref());
        content.push(b'\n');
    }

    /// Make subsequent fetches fail with `FetchError::Unavailable`
    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().unwrap() = fail;
    }

    /// Make the next `n` resets fail with `ResetError::Unacknowledged`
    pub fn fail_next_resets(&self, n: u32) {
        *self.fail_resets.lock().unwrap() = n;
    }

    /// Number of reset calls seen, successful or not
    pub fn reset_count(&self) -> u32 {
        *self.reset_count.lock().unwrap()
    }

    /// Whether the log currently holds any bytes
    pub fn is_empty(&self) -> bool {
        self.content.lock().unwrap().is_empty()
    }
}

impl LogResource for MemoryLog {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(FetchError::Unavailable("fetch disabled by test".into()));
        }
        Ok(self.content.lock().unwrap().clone())
    }

    fn reset(&self) -> Result<(), ResetError> {
        *self.reset_count.lock().unwrap() += 1;

        let mut fail_resets = self.fail_resets.lock().unwrap();
        if *fail_resets > 0 {
            *fail_resets -= 1;
            return Err(ResetError::Unacknowledged {
                body: "false".into(),
            });
        }

        self.content.lock().unwrap().clear();
        Ok(())
    }
}
