/*
 * renderer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The interpreting render engine.
//!
//! This module walks a template tree against per-render data and an
//! ambient direction context. Rendering is synchronous and
//! single-threaded per render; the renderer itself is immutable during a
//! render, so one instance serves unrelated renders concurrently.
//!
//! Failure propagation: when a nested template call fails, the enclosing
//! frame appends one [`RenderFrame`] and re-raises the error unchanged in
//! kind. Only [`Renderer::render`] — the outermost boundary — converts the
//! accumulated [`RenderError`] into the public [`RenderFailure`].

use std::collections::HashMap;

use weft_values::{TemplateData, Value};

use crate::ast::{Expr, Template, TemplateNode};
use crate::dir_context::GlobalDir;
use crate::error::{RenderError, RenderFailure, RenderFrame};
use crate::plugin::FunctionRegistry;

/// Default bound on template-call nesting.
const DEFAULT_MAX_CALL_DEPTH: usize = 50;

/// A template renderer: a set of templates plus the builtin function
/// registry.
#[derive(Debug, Clone)]
pub struct Renderer {
    templates: HashMap<String, Template>,
    functions: FunctionRegistry,
    max_call_depth: usize,
}

impl Renderer {
    /// Create a renderer with the builtin functions and no templates.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            functions: FunctionRegistry::with_builtins(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Replace the function registry.
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    /// Set the maximum template-call nesting depth.
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Add a template, keyed by its name.
    pub fn add_template(&mut self, template: Template) -> &mut Self {
        self.templates.insert(template.name.clone(), template);
        self
    }

    /// Render a template to its output string.
    ///
    /// This is the render boundary: any failure raised during evaluation is
    /// finalized and converted into a [`RenderFailure`] exactly once, here.
    pub fn render(
        &self,
        name: &str,
        data: &TemplateData,
        dir: &GlobalDir,
    ) -> Result<String, RenderFailure> {
        tracing::debug!(template = name, "Rendering template");
        match self.render_template(name, data, dir, 0) {
            Ok(output) => Ok(output),
            Err(err) => {
                let failure = RenderFailure::from(err);
                tracing::debug!(template = name, error = %failure, "Render failed");
                Err(failure)
            }
        }
    }

    fn render_template(
        &self,
        name: &str,
        data: &TemplateData,
        dir: &GlobalDir,
        depth: usize,
    ) -> Result<String, RenderError> {
        if depth > self.max_call_depth {
            return Err(RenderError::generic(format!(
                "template call depth exceeded {} at {name}",
                self.max_call_depth
            )));
        }

        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::generic(format!("template not found: {name}")))?;

        let mut output = String::new();
        for node in &template.nodes {
            match node {
                TemplateNode::Literal(text) => output.push_str(text),

                TemplateNode::Print(expr) => {
                    output.push_str(&self.eval(expr, data, dir)?.coerce_string());
                }

                TemplateNode::Call(call) => {
                    match self.render_template(&call.callee, data, dir, depth + 1) {
                        Ok(rendered) => output.push_str(&rendered),
                        Err(mut err) => {
                            // Annotate this boundary once, re-raise unchanged in kind.
                            err.push_frame(RenderFrame::new(
                                template.name.clone(),
                                call.call_site.clone(),
                            ));
                            return Err(err);
                        }
                    }
                }
            }
        }
        Ok(output)
    }

    fn eval(&self, expr: &Expr, data: &TemplateData, dir: &GlobalDir) -> Result<Value, RenderError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),

            Expr::Var(name) => data
                .get(name)
                .cloned()
                .ok_or_else(|| RenderError::generic(format!("undefined variable: {name}"))),

            Expr::Function { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg, data, dir))
                    .collect::<Result<Vec<_>, _>>()?;
                self.functions.interpret_call(name, &values, dir)
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
