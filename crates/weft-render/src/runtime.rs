/*
 * runtime.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime helpers targeted by generated code.
//!
//! The source-emitting backend compiles builtin function calls into calls
//! to a fixed helper namespace; these are the reference implementations of
//! those helpers. Keeping them next to the interpreting backend's logic is
//! what makes the dual-backend guarantee checkable: both share the same
//! mark-selection policy.

use weft_values::{Dir, estimate_dir};

use crate::bidi::mark_after;

/// The namespace generated call forms are qualified with, e.g.
/// `weft.bidiMarkAfter(1, TEXT)`.
pub const RUNTIME_NAMESPACE: &str = "weft";

/// Runtime counterpart of [`BidiMarkAfterFn`](crate::BidiMarkAfterFn).
///
/// `dir_code` is the generated direction code: `1` for an LTR ambient
/// direction, `-1` for RTL. The text's direction is estimated from content;
/// declared directions do not survive into generated code.
pub fn bidi_mark_after(dir_code: i32, text: &str, is_html: bool) -> String {
    let ambient = if dir_code < 0 { Dir::Rtl } else { Dir::Ltr };
    mark_after(estimate_dir(text, is_html), ambient).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bidi_mark_after_ltr() {
        assert_eq!(bidi_mark_after(1, "", false), "");
        assert_eq!(bidi_mark_after(1, "a", false), "");
        assert_eq!(bidi_mark_after(1, "\u{05E0}", false), "\u{200E}");
    }

    #[test]
    fn test_bidi_mark_after_rtl() {
        assert_eq!(bidi_mark_after(-1, "\u{05E0}", false), "");
        assert_eq!(bidi_mark_after(-1, "a", false), "\u{200F}");
    }

    #[test]
    fn test_bidi_mark_after_html() {
        assert_eq!(bidi_mark_after(1, "<br>\u{05E0}", false), "");
        assert_eq!(bidi_mark_after(1, "<br>\u{05E0}", true), "\u{200E}");
    }
}
