/*
 * dir_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The ambient ("global") direction context of a render pass.
//!
//! Resolved once at render start and shared read-only by every builtin
//! function evaluation within that render. The direction is either fixed at
//! configuration time ([`GlobalDir::StaticLtr`], [`GlobalDir::StaticRtl`])
//! or decided by a boolean expression evaluated at the *target's* runtime
//! ([`GlobalDir::Dynamic`]) — the latter stays symbolic for the
//! source-emitting backend, while the interpreting backend requires the
//! boolean to have been bound up front by the caller's direction provider.

use weft_values::Dir;

use crate::error::RenderError;
use crate::expr::{PRECEDENCE_CONDITIONAL, SourceExpr};

/// The ambient writing direction for one render. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalDir {
    /// Direction fixed to left-to-right.
    StaticLtr,

    /// Direction fixed to right-to-left.
    StaticRtl,

    /// Direction decided by an `isRtl` boolean at the target's runtime.
    Dynamic(DynamicDir),
}

/// The dynamic variant's payload: the target-language boolean expression,
/// plus the bound value of that boolean when the interpreting backend is
/// the one running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicDir {
    is_rtl_code: SourceExpr,
    is_rtl: Option<bool>,
}

impl GlobalDir {
    /// A dynamic direction for source emission only; [`GlobalDir::resolve`]
    /// fails on it.
    pub fn dynamic(is_rtl_code: SourceExpr) -> Self {
        GlobalDir::Dynamic(DynamicDir {
            is_rtl_code,
            is_rtl: None,
        })
    }

    /// A dynamic direction with its boolean already evaluated, as the
    /// interpreting backend's direction provider supplies it.
    pub fn dynamic_bound(is_rtl_code: SourceExpr, is_rtl: bool) -> Self {
        GlobalDir::Dynamic(DynamicDir {
            is_rtl_code,
            is_rtl: Some(is_rtl),
        })
    }

    /// Resolve the ambient direction to a concrete [`Dir::Ltr`] or
    /// [`Dir::Rtl`].
    ///
    /// Only the interpreting backend calls this; an unbound dynamic
    /// direction is a generic render failure.
    pub fn resolve(&self) -> Result<Dir, RenderError> {
        match self {
            GlobalDir::StaticLtr => Ok(Dir::Ltr),
            GlobalDir::StaticRtl => Ok(Dir::Rtl),
            GlobalDir::Dynamic(dynamic) => match dynamic.is_rtl {
                Some(true) => Ok(Dir::Rtl),
                Some(false) => Ok(Dir::Ltr),
                None => Err(RenderError::generic(
                    "dynamic global direction is not bound in this render",
                )),
            },
        }
    }

    /// The direction-code expression generated call forms take as their
    /// first argument: `1` for LTR, `-1` for RTL, or a conditional on the
    /// dynamic boolean.
    pub fn dir_code(&self) -> SourceExpr {
        match self {
            GlobalDir::StaticLtr => SourceExpr::atom("1"),
            GlobalDir::StaticRtl => SourceExpr::atom("-1"),
            GlobalDir::Dynamic(dynamic) => SourceExpr::new(
                format!(
                    "{} ? -1 : 1",
                    dynamic.is_rtl_code.code_at_least(PRECEDENCE_CONDITIONAL + 1)
                ),
                PRECEDENCE_CONDITIONAL,
            ),
        }
    }
}

impl DynamicDir {
    /// The target-language boolean expression.
    pub fn is_rtl_code(&self) -> &SourceExpr {
        &self.is_rtl_code
    }

    /// The bound boolean value, if the direction provider evaluated it.
    pub fn is_rtl(&self) -> Option<bool> {
        self.is_rtl
    }
}
