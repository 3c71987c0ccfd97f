/*
 * plugin.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The dual-backend builtin-function contract.
//!
//! Every builtin template function is invocable two ways:
//!
//! - [`Interpret`]: operate directly on runtime values, for the
//!   interpreting backend;
//! - [`EmitSource`]: compose a target-language expression, for
//!   source-emitting backends.
//!
//! [`TemplateFn`] requires both, so a function missing one backend cannot
//! be registered — the gap is a compile error, not a runtime surprise. The
//! contract guarantee: for any input representable in both backends,
//! interpreting and executing the emitted expression yield equivalent
//! results.
//!
//! Implementations must be pure and stateless; one instance may be invoked
//! concurrently from unrelated renders.

use std::collections::HashMap;
use std::sync::Arc;

use weft_values::Value;

use crate::bidi::BidiMarkAfterFn;
use crate::dir_context::GlobalDir;
use crate::error::RenderError;
use crate::expr::SourceExpr;

/// The interpreting backend's entry: evaluate the function on runtime
/// values.
pub trait Interpret {
    /// Evaluate with already-evaluated arguments and the ambient direction
    /// context. Pure; fails only by propagating a value-model error.
    fn interpret(&self, args: &[Value], dir: &GlobalDir) -> Result<Value, RenderError>;
}

/// The source-emitting backend's entry: compose a target-language
/// expression.
pub trait EmitSource {
    /// Compose the call expression from argument expressions and the
    /// ambient direction context. Purely syntactic; never evaluates values.
    fn emit_source(&self, args: &[SourceExpr], dir: &GlobalDir) -> SourceExpr;
}

/// A builtin template function, implementable for both backends.
pub trait TemplateFn: Interpret + EmitSource + Send + Sync {
    /// The name the function is called by in templates.
    fn name(&self) -> &'static str;

    /// The argument counts the function accepts.
    fn arities(&self) -> &'static [usize];
}

/// Lookup of builtin functions by name and argument arity.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Arc<dyn TemplateFn>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin functions registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BidiMarkAfterFn));
        registry
    }

    /// Register a function under its declared name.
    pub fn register(&mut self, function: Arc<dyn TemplateFn>) {
        self.functions.insert(function.name(), function);
    }

    /// Look up a function by name and arity.
    ///
    /// Unknown names and unsupported arities are generic render failures.
    pub fn lookup(&self, name: &str, arity: usize) -> Result<&dyn TemplateFn, RenderError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| RenderError::generic(format!("unknown function: {name}")))?;
        if !function.arities().contains(&arity) {
            return Err(RenderError::generic(format!(
                "function {name} does not accept {arity} argument(s)"
            )));
        }
        Ok(function.as_ref())
    }

    /// Dispatch an interpret-backend call.
    pub fn interpret_call(
        &self,
        name: &str,
        args: &[Value],
        dir: &GlobalDir,
    ) -> Result<Value, RenderError> {
        self.lookup(name, args.len())?.interpret(args, dir)
    }

    /// Dispatch a source-emitting call.
    pub fn emit_call(
        &self,
        name: &str,
        args: &[SourceExpr],
        dir: &GlobalDir,
    ) -> Result<SourceExpr, RenderError> {
        Ok(self.lookup(name, args.len())?.emit_source(args, dir))
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
