//! Tests for the deduplicating notice system.
//!
//! The notice set is process-global, so everything runs in one test to keep
//! `clear_warnings` from racing with the assertions.

use sift_common::warning::{clear_warnings, has_warned, set_quiet, warn_once};

#[test]
fn test_warn_once_lifecycle() {
    set_quiet(true);

    warn_once("Test", "recorded notice");
    assert!(has_warned("Test", "recorded notice"));
    assert!(!has_warned("Other", "recorded notice"));

    // Repeats are absorbed
    warn_once("Test", "recorded notice");
    assert!(has_warned("Test", "recorded notice"));

    clear_warnings();
    assert!(!has_warned("Test", "recorded notice"));
}
