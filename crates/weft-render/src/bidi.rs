/*
 * bidi.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The `bidiMarkAfter` builtin function.
//!
//! `bidiMarkAfter(text[, isHtml])` decides whether a zero-width directional
//! mark must follow `text` so that subsequent ambient-direction content
//! renders in the correct reading order. It is the canonical dual-backend
//! function: the interpreting backend computes the mark now, the
//! source-emitting backend defers the decision to the
//! [`runtime`](crate::runtime) helper in generated code.

use weft_values::{Dir, TextValue, Value, estimate_dir};

use crate::dir_context::GlobalDir;
use crate::error::RenderError;
use crate::expr::SourceExpr;
use crate::plugin::{EmitSource, Interpret, TemplateFn};
use crate::runtime::RUNTIME_NAMESPACE;

/// U+200E LEFT-TO-RIGHT MARK.
pub const LEFT_TO_RIGHT_MARK: &str = "\u{200E}";

/// U+200F RIGHT-TO-LEFT MARK.
pub const RIGHT_TO_LEFT_MARK: &str = "\u{200F}";

/// The `bidiMarkAfter` builtin. Stateless; one instance serves all renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidiMarkAfterFn;

/// Select the mark that must follow text of direction `actual` under an
/// `ambient` direction.
///
/// No mark is needed when the text has no strong direction or already
/// matches the ambient direction; otherwise the mark matches the *ambient*
/// direction, so that the content following the text resumes it.
pub(crate) fn mark_after(actual: Dir, ambient: Dir) -> &'static str {
    if actual == Dir::Neutral || actual == ambient {
        ""
    } else if ambient == Dir::Ltr {
        LEFT_TO_RIGHT_MARK
    } else {
        RIGHT_TO_LEFT_MARK
    }
}

impl Interpret for BidiMarkAfterFn {
    fn interpret(&self, args: &[Value], dir: &GlobalDir) -> Result<Value, RenderError> {
        let text = match args.first() {
            Some(value) => value.as_text()?,
            None => return Err(RenderError::generic("bidiMarkAfter requires a text argument")),
        };
        let is_html = match args.get(1) {
            Some(value) => value.coerce_bool()?,
            None => false,
        };

        let ambient = dir.resolve()?;
        // Declared direction wins; otherwise estimate from content.
        let actual = text
            .dir()
            .unwrap_or_else(|| estimate_dir(text.content(), is_html));

        Ok(Value::Text(TextValue::with_dir(
            mark_after(actual, ambient),
            ambient,
        )))
    }
}

impl EmitSource for BidiMarkAfterFn {
    fn emit_source(&self, args: &[SourceExpr], dir: &GlobalDir) -> SourceExpr {
        // Call-form arity mirrors the template-level arity exactly: the
        // isHtml expression appears iff the caller supplied one.
        let mut code = format!(
            "{RUNTIME_NAMESPACE}.bidiMarkAfter({}",
            dir.dir_code().code()
        );
        for arg in args {
            code.push_str(", ");
            code.push_str(arg.code());
        }
        code.push(')');
        SourceExpr::atom(code)
    }
}

impl TemplateFn for BidiMarkAfterFn {
    fn name(&self) -> &'static str {
        "bidiMarkAfter"
    }

    fn arities(&self) -> &'static [usize] {
        &[1, 2]
    }
}
