//! Status message log shown on the overlay.
//!
//! Autopilot status texts are pushed by the host as they arrive. The log
//! keeps the last [`MESSAGE_LOG_SIZE`] lines in a ring buffer; the oldest
//! line is dropped when a new one arrives on a full buffer. Lines are drawn
//! oldest first, one per [`MESSAGE_LINE_PITCH`](crate::config::MESSAGE_LINE_PITCH)
//! pixels.
//!
//! # Example
//!
//! ```ignore
//! let mut log = MessageLog::new();
//! log.push("EKF3 IMU0 is using GPS");
//! log.push("Throttle armed");
//!
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use heapless::{Deque, String};

/// Lines kept in the log.
pub const MESSAGE_LOG_SIZE: usize = 6;

/// Characters kept per line.
pub const MESSAGE_LINE_LENGTH: usize = 50;

/// Ring buffer of status messages.
pub struct MessageLog {
    buffer: Deque<String<MESSAGE_LINE_LENGTH>, MESSAGE_LOG_SIZE>,
}

impl MessageLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Append a message, dropping the oldest when full. Long messages are
    /// truncated.
    pub fn push(&mut self, msg: &str) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<MESSAGE_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        log::debug!("osd message: {}", line.as_str());
        self.buffer.push_back(line).ok();
    }

    /// Messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(String::as_str) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Default for MessageLog {
    fn default() -> Self { Self::new() }
}
