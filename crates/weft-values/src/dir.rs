/*
 * dir.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Text direction types and estimation.
//!
//! A value's direction is either *declared* by its producer (carried on
//! [`TextValue`](crate::TextValue)) or *estimated* from content with a
//! first-strong-character heuristic. Estimation is what the renderer falls
//! back to when no direction was declared.

use serde::{Deserialize, Serialize};

/// The writing direction of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Left-to-right (e.g., Latin scripts).
    Ltr,
    /// Right-to-left (e.g., Hebrew, Arabic).
    Rtl,
    /// No strong directionality (e.g., digits, punctuation, empty text).
    Neutral,
}

/// Estimate the direction of `text` from its first strong character.
///
/// Returns [`Dir::Neutral`] when the text contains no strongly directional
/// character. When `is_html` is set, markup (`<...>` tags and `&...;`
/// character entities) is skipped before classification so that tag names
/// and entity names do not count as Latin text.
pub fn estimate_dir(text: &str, is_html: bool) -> Dir {
    if is_html {
        first_strong_dir(&strip_markup(text))
    } else {
        first_strong_dir(text)
    }
}

/// Direction of the first strong character, or [`Dir::Neutral`].
fn first_strong_dir(text: &str) -> Dir {
    for c in text.chars() {
        if let Some(dir) = strong_dir(c) {
            return dir;
        }
    }
    Dir::Neutral
}

/// Classify a single character as strongly LTR, strongly RTL, or neither.
///
/// The ranges cover the common strong-direction blocks: Hebrew, Arabic,
/// Syriac, and Thaana plus the Hebrew/Arabic presentation forms for RTL;
/// Latin and the general left-to-right letter ranges for LTR. Everything
/// else (digits, punctuation, whitespace) has no strong direction.
fn strong_dir(c: char) -> Option<Dir> {
    match c {
        '\u{0591}'..='\u{07FF}'
        | '\u{200F}'
        | '\u{FB1D}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFC}' => Some(Dir::Rtl),
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02B8}'
        | '\u{0300}'..='\u{0590}'
        | '\u{0800}'..='\u{1FFF}'
        | '\u{200E}'
        | '\u{2C00}'..='\u{FB1C}'
        | '\u{FE00}'..='\u{FE6F}'
        | '\u{FEFD}'..='\u{FFFF}' => Some(Dir::Ltr),
        _ => None,
    }
}

/// Replace HTML tags and character entities with spaces.
///
/// A `&` that is never terminated by `;` is not an entity and is kept
/// as-is.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '<' => {
                for (_, t) in chars.by_ref() {
                    if t == '>' {
                        break;
                    }
                }
                out.push(' ');
            }
            '&' => {
                let rest = &text[i + 1..];
                match rest.find(';') {
                    Some(end) if end > 0 => {
                        // Consume the entity body and the terminating ';'.
                        let stop = i + 1 + end;
                        while let Some(&(j, _)) = chars.peek() {
                            chars.next();
                            if j == stop {
                                break;
                            }
                        }
                        out.push(' ');
                    }
                    _ => out.push('&'),
                }
            }
            _ => out.push(c),
        }
    }
    out
}
