/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render-failure aggregation and the public failure type.
//!
//! A failure raised deep inside nested template calls propagates outward as
//! a [`RenderError`]: each enclosing template-call boundary appends one
//! [`RenderFrame`] and re-raises the error unchanged in kind. The error is
//! *open* (frame-appendable) until [`RenderError::finalize`] derives its
//! template-call trace, after which the trace is immutable. The outermost
//! render boundary then performs the only externally visible conversion,
//! into [`RenderFailure`].
//!
//! The trace is an explicit, inspectable piece of data rendered to text at
//! finalization — never a captured native call stack.

use std::error::Error;
use std::fmt;

use weft_values::DataError;

use crate::ast::CallSite;

/// Classification of a render-time failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A malformed or mistyped runtime value. The boundary conversion never
    /// unwraps past a data-value cause, so callers can classify these
    /// without inspecting the chain.
    DataValue,

    /// Any other evaluation failure: missing template, plugin failure,
    /// invalid argument arity, estimator failure.
    Generic,
}

/// One template-call boundary crossed by a propagating failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Name of the template whose call failed.
    pub template_name: String,
    /// Location of the failing call within that template, when known.
    pub call_site: Option<CallSite>,
}

impl RenderFrame {
    /// Create a frame.
    pub fn new(template_name: impl Into<String>, call_site: Option<CallSite>) -> Self {
        Self {
            template_name: template_name.into(),
            call_site,
        }
    }
}

/// A failure propagating through a render.
///
/// Internal to a render: the only failure type that crosses the render
/// boundary is [`RenderFailure`]. Mutable (frame-appendable) until
/// finalized; each render owns its own instance, so no locking is involved.
#[derive(Debug, Clone)]
pub struct RenderError {
    kind: ErrorKind,
    message: String,
    cause: Option<Box<RenderError>>,
    frames: Vec<RenderFrame>,
    /// The derived trace; `Some` once finalized.
    trace: Option<String>,
}

impl RenderError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            frames: Vec::new(),
            trace: None,
        }
    }

    /// A generic evaluation failure.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Generic, message)
    }

    /// A data-value failure.
    pub fn data_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataValue, message)
    }

    /// Attach an underlying cause.
    pub fn with_cause(mut self, cause: RenderError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The original failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&RenderError> {
        self.cause.as_deref()
    }

    /// The call boundaries crossed so far, in unwinding order (innermost
    /// boundary first).
    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    /// Whether the trace has been derived.
    pub fn is_finalized(&self) -> bool {
        self.trace.is_some()
    }

    /// Record one template-call boundary crossed while unwinding.
    ///
    /// Each boundary appends exactly once; re-raising through the same
    /// boundary must not re-append. Valid only before finalization;
    /// afterwards the frame sequence is immutable and the append is
    /// dropped.
    pub fn push_frame(&mut self, frame: RenderFrame) {
        debug_assert!(self.trace.is_none(), "frame appended after finalize");
        if self.trace.is_none() {
            self.frames.push(frame);
        }
    }

    /// Derive the template-call trace.
    ///
    /// The first call composes the trace from the accumulated frames and
    /// the cause chain and freezes this error; repeated calls leave the
    /// state unchanged and return the identical text.
    pub fn finalize(&mut self) -> &str {
        if self.trace.is_none() {
            let trace = self.render_trace();
            self.trace = Some(trace);
        }
        self.trace.as_deref().unwrap_or("")
    }

    /// Copy the already-derived trace verbatim onto the terminal failure,
    /// so that both objects expose identical diagnostics.
    pub fn finalize_onto(&self, failure: &mut RenderFailure) {
        debug_assert!(self.trace.is_some(), "finalize_onto before finalize");
        if let Some(trace) = &self.trace {
            failure.trace = trace.clone();
        }
    }

    /// The cause selected by the boundary unwrap policy.
    ///
    /// Walks the cause chain outward: the first data-value link is returned
    /// immediately, even when it has a deeper cause; otherwise the deepest
    /// link is returned. An error with no cause is its own root cause.
    pub fn root_cause(&self) -> &RenderError {
        let mut current = self;
        while let Some(next) = current.cause.as_deref() {
            if current.kind == ErrorKind::DataValue {
                return current;
            }
            current = next;
        }
        current
    }

    fn render_trace(&self) -> String {
        let mut trace = self.message.clone();
        for frame in &self.frames {
            match &frame.call_site {
                Some(site) => {
                    trace.push_str(&format!("\n  at {} ({site})", frame.template_name));
                }
                None => {
                    trace.push_str(&format!("\n  at {} (unknown source)", frame.template_name));
                }
            }
        }
        let mut cause = self.cause.as_deref();
        while let Some(err) = cause {
            trace.push_str(&format!("\ncaused by: {}", err.message));
            cause = err.cause.as_deref();
        }
        trace
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl From<DataError> for RenderError {
    fn from(err: DataError) -> Self {
        RenderError::data_value(err.to_string())
    }
}

/// The failure type a render exposes to its caller.
///
/// Constructed exactly once per failed render, at the render boundary, from
/// a finalized [`RenderError`]. The message is the original failure's
/// message; the cause follows the root-cause policy of
/// [`RenderError::root_cause`]; the trace shows the logical template-call
/// path rather than native execution frames.
#[derive(Debug, Clone)]
pub struct RenderFailure {
    message: String,
    cause: Box<RenderError>,
    trace: String,
}

impl RenderFailure {
    /// The original failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The root cause per the boundary unwrap policy.
    pub fn cause(&self) -> &RenderError {
        &self.cause
    }

    /// The finalized template-call trace, identical to the trace of the
    /// render error this failure was converted from.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Whether the failure was caused by a malformed or mistyped data
    /// value. Data-value failures are handled differently upstream (they
    /// map to a distinct error status).
    pub fn is_data_value(&self) -> bool {
        self.cause.kind() == ErrorKind::DataValue
    }
}

impl From<RenderError> for RenderFailure {
    fn from(mut err: RenderError) -> Self {
        err.finalize();
        let cause = Box::new(err.root_cause().clone());
        let mut failure = RenderFailure {
            message: err.message().to_owned(),
            cause,
            trace: String::new(),
        };
        err.finalize_onto(&mut failure);
        failure
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for RenderFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(template: &str, line: u32) -> RenderFrame {
        RenderFrame::new(template, Some(CallSite::new("templates.weft", line)))
    }

    // ========================================================================
    // Frame aggregation and finalization
    // ========================================================================

    #[test]
    fn test_frames_accumulate_in_unwinding_order() {
        let mut err = RenderError::generic("boom");
        err.push_frame(frame("ns.inner", 4));
        err.push_frame(frame("ns.outer", 9));

        assert_eq!(err.frames().len(), 2);
        assert_eq!(err.frames()[0].template_name, "ns.inner");
        assert_eq!(err.frames()[1].template_name, "ns.outer");
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut err = RenderError::generic("boom");
        err.push_frame(frame("ns.inner", 4));
        err.push_frame(frame("ns.outer", 9));

        let first = err.finalize().to_owned();
        let second = err.finalize().to_owned();
        assert_eq!(first, second);
        assert!(err.is_finalized());
    }

    #[test]
    fn test_finalize_trace_contents() {
        let mut err = RenderError::generic("boom")
            .with_cause(RenderError::generic("disk on fire"));
        err.push_frame(frame("ns.inner", 4));
        err.push_frame(RenderFrame::new("ns.outer", None));

        let trace = err.finalize();
        assert_eq!(
            trace,
            "boom\n  at ns.inner (templates.weft:4)\n  at ns.outer (unknown source)\ncaused by: disk on fire"
        );
    }

    #[test]
    fn test_push_frame_after_finalize_is_dropped() {
        let mut err = RenderError::generic("boom");
        err.push_frame(frame("ns.inner", 4));
        err.finalize();

        // Release builds drop the append; the frame sequence is immutable.
        #[cfg(not(debug_assertions))]
        {
            err.push_frame(frame("ns.late", 1));
            assert_eq!(err.frames().len(), 1);
        }
        assert_eq!(err.frames().len(), 1);
    }

    #[test]
    fn test_finalize_onto_copies_trace_verbatim() {
        let mut err = RenderError::generic("boom");
        err.push_frame(frame("ns.inner", 4));
        let trace = err.finalize().to_owned();

        let failure = RenderFailure::from(err);
        assert_eq!(failure.trace(), trace);
    }

    // ========================================================================
    // Root-cause policy
    // ========================================================================

    #[test]
    fn test_root_cause_stops_at_data_value() {
        // A -> B(data value) -> C: root cause is B, C is never reached.
        let c = RenderError::generic("c");
        let b = RenderError::data_value("b").with_cause(c);
        let a = RenderError::generic("a").with_cause(b);

        let root = a.root_cause();
        assert_eq!(root.kind(), ErrorKind::DataValue);
        assert_eq!(root.message(), "b");
        assert!(root.cause().is_some());
    }

    #[test]
    fn test_root_cause_deepest_without_data_value() {
        let c = RenderError::generic("c");
        let b = RenderError::generic("b").with_cause(c);
        let a = RenderError::generic("a").with_cause(b);

        assert_eq!(a.root_cause().message(), "c");
    }

    #[test]
    fn test_root_cause_of_chainless_error_is_itself() {
        let err = RenderError::generic("alone");
        assert_eq!(err.root_cause().message(), "alone");
    }

    #[test]
    fn test_root_cause_terminal_data_value_returned_as_deepest() {
        // A data-value error that ends the chain is the deepest cause.
        let b = RenderError::data_value("b");
        let a = RenderError::generic("a").with_cause(b);

        let root = a.root_cause();
        assert_eq!(root.kind(), ErrorKind::DataValue);
        assert_eq!(root.message(), "b");
    }

    #[test]
    fn test_root_cause_data_value_at_top_with_cause() {
        let b = RenderError::generic("b");
        let a = RenderError::data_value("a").with_cause(b);

        assert_eq!(a.root_cause().message(), "a");
    }

    // ========================================================================
    // Boundary conversion
    // ========================================================================

    #[test]
    fn test_conversion_preserves_message_and_frame_order() {
        let mut err = RenderError::generic("boom");
        err.push_frame(frame("ns.t1", 1));
        err.push_frame(frame("ns.t2", 2));

        let failure = RenderFailure::from(err);
        assert_eq!(failure.message(), "boom");

        let t1 = failure.trace().find("ns.t1").unwrap();
        let t2 = failure.trace().find("ns.t2").unwrap();
        assert!(t1 < t2);
    }

    #[test]
    fn test_conversion_classifies_data_value_cause() {
        let err = RenderError::generic("boom").with_cause(RenderError::data_value("bad value"));
        let failure = RenderFailure::from(err);

        assert!(failure.is_data_value());
        assert_eq!(failure.cause().message(), "bad value");
    }

    #[test]
    fn test_conversion_without_cause_uses_error_itself() {
        let failure = RenderFailure::from(RenderError::generic("boom"));
        assert!(!failure.is_data_value());
        assert_eq!(failure.cause().message(), "boom");
    }

    #[test]
    fn test_data_error_converts_to_data_value_kind() {
        let err: RenderError = DataError::new("expected a text value, got bool").into();
        assert_eq!(err.kind(), ErrorKind::DataValue);
        assert_eq!(err.message(), "expected a text value, got bool");
    }

    #[test]
    fn test_error_source_chain() {
        let err = RenderError::generic("a").with_cause(RenderError::generic("b"));
        let source = Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "b");
    }
}
