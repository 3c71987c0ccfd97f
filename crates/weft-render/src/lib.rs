/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render core for the weft template engine.
//!
//! This crate implements the two subsystems every backend of the engine
//! shares:
//!
//! - The **dual-backend builtin-function contract**: each builtin template
//!   function is invocable by the interpreting backend (operating on
//!   runtime [`Value`](weft_values::Value)s) and by the source-emitting
//!   backend (composing a target-language [`SourceExpr`]), with the
//!   guarantee that both paths produce equivalent results.
//!   [`BidiMarkAfterFn`] is the canonical implementation: it decides
//!   whether a zero-width directional mark must follow a piece of text.
//! - **Render-failure aggregation**: a failure raised deep inside nested
//!   template calls accumulates one [`RenderFrame`] per call boundary as it
//!   unwinds, and is converted exactly once, at the render boundary, into
//!   the public [`RenderFailure`] with a root-cause policy that keeps
//!   data-value errors classifiable.
//!
//! # Architecture
//!
//! Template parsing, type checking, and autoescaping are external; this
//! crate consumes an already-built template tree ([`Template`]) and the
//! runtime value model from `weft-values`.
//!
//! # Example
//!
//! ```ignore
//! use weft_render::{GlobalDir, Renderer, Template, TemplateNode};
//! use weft_values::TemplateData;
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template(Template::new(
//!     "hello",
//!     vec![TemplateNode::Literal("Hello!".to_string())],
//! ));
//!
//! let output = renderer.render("hello", &TemplateData::new(), &GlobalDir::StaticLtr)?;
//! assert_eq!(output, "Hello!");
//! ```

pub mod ast;
pub mod bidi;
pub mod dir_context;
pub mod error;
pub mod expr;
pub mod plugin;
pub mod renderer;
pub mod runtime;

// Re-export main types at crate root
pub use ast::{CallNode, CallSite, Expr, Template, TemplateNode};
pub use bidi::{BidiMarkAfterFn, LEFT_TO_RIGHT_MARK, RIGHT_TO_LEFT_MARK};
pub use dir_context::{DynamicDir, GlobalDir};
pub use error::{ErrorKind, RenderError, RenderFailure, RenderFrame};
pub use expr::{PRECEDENCE_ATOM, PRECEDENCE_CONDITIONAL, SourceExpr};
pub use plugin::{EmitSource, FunctionRegistry, Interpret, TemplateFn};
pub use renderer::Renderer;
pub use runtime::RUNTIME_NAMESPACE;
