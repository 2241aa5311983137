//! Redaction helper for identifiers and credentials in log output.

use std::fmt;

/// Display wrapper that keeps a short prefix and masks the rest.
/// Enough to correlate log lines without writing identifiers out raw.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 4 {
            write!(f, "{}", "*".repeat(self.0.len()))
        } else {
            write!(f, "{}***", &self.0[..4])
        }
    }
}
