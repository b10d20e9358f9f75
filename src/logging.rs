//! DEBUG-level call logging.
//!
//! A transparent wrapper around service calls: the invocation, its return
//! value, and its failure are logged at DEBUG, and the result is returned
//! unchanged. When DEBUG is disabled the closure runs directly, with no
//! formatting cost beyond the level check.

use std::fmt::{Debug, Display};
use tracing::debug;

/// Run `f`, logging the call and its outcome at DEBUG level.
///
/// `call` is a rendered description of the invocation, typically the method
/// name with its arguments already formatted in.
///
/// # Errors
///
/// Transparent: whatever `f` returns is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use crosscut::logging::logged;
///
/// fn transfer(from: &str, to: &str) -> Result<u64, String> {
///     Ok(42)
/// }
///
/// let receipt = logged("transfer(alice, bob)", || transfer("alice", "bob"));
/// assert_eq!(receipt, Ok(42));
/// ```
pub fn logged<T, E, F>(call: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    T: Debug,
    E: Display,
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return f();
    }
    debug!(call, "method call");
    match f() {
        Ok(value) => {
            debug!(call, value = ?value, "method returned");
            Ok(value)
        }
        Err(err) => {
            debug!(call, error = %err, "method failed");
            Err(err)
        }
    }
}
