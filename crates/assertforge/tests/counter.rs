//! The process-wide assertion counter.
//!
//! Kept in its own test binary so no other test touches the counter.

use assertforge::prelude::*;
use assertforge::{assert_count, classic};

#[test]
fn test_counter_counts_every_resolvable_assertion() {
    assert_eq!(assert_count(), 0);

    that(1, Is::equal_to(1)).unwrap();
    that(1, Is::equal_to(2)).unwrap_err();
    that_with("x", Is::null(), "expected null").unwrap_err();
    classic::is_true(true).unwrap();

    // Not counted: malformed expressions and shortcut signals.
    that(1, Is::not()).unwrap_err();
    ignore("skip").unwrap_err();

    assert_eq!(assert_count(), 4);
    assert_eq!(assert_count(), 0);
}
