//! Small helpers shared by the TCP transport.

use std::borrow::Cow;

/// Ensure the payload ends with a newline terminator: append one if missing,
/// never duplicate an existing one.
pub fn ensure_trailing_newline(payload: &str) -> Cow<'_, str> {
    if payload.ends_with('\n') {
        Cow::Borrowed(payload)
    } else {
        let mut owned = String::with_capacity(payload.len() + 1);
        owned.push_str(payload);
        owned.push('\n');
        Cow::Owned(owned)
    }
}
