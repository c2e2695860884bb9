//! Compiler notices with colored terminal output.
//!
//! Provides deduplication so a selector compiled thousands of times (or a
//! stylesheet full of the same legacy syntax) reports each notice once.
//! Notices never change parse results; they only inform the user that some
//! input was accepted in a degraded or normalized form.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of notices we've already printed (to deduplicate)
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// When set, notices are still recorded but not printed.
static QUIET: AtomicBool = AtomicBool::new(false);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Report a notice about normalized or legacy input (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("Selector", "'::before' is treated as the pseudo-class ':before'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key(component, message));

    if should_print && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[sift {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once` has already recorded this notice.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&key(component, message))
}

/// Suppress (or re-enable) printing of notices. Deduplication is unaffected.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Clear all recorded notices (call between independent batches of input)
pub fn clear_warnings() {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}
