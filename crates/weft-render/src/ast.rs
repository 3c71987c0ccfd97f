/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The template tree the renderer walks.
//!
//! Parsing, type checking, and call linking happen in the external front
//! end; this module defines only the already-built shape the render core
//! consumes. Call nodes carry the source location the front end recorded,
//! which becomes the call-site of a [`RenderFrame`](crate::RenderFrame)
//! when a failure unwinds through them.

use std::fmt;

use weft_values::Value;

/// Location of a node within its template's source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Source file of the enclosing template.
    pub file: String,
    /// Line number of the call.
    pub line: u32,
}

impl CallSite {
    /// Create a call site.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A template, as supplied by the external front end.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Fully qualified template name.
    pub name: String,
    /// The template body.
    pub nodes: Vec<TemplateNode>,
}

impl Template {
    /// Create a template.
    pub fn new(name: impl Into<String>, nodes: Vec<TemplateNode>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }
}

/// A node in a template body.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text, output as-is.
    Literal(String),

    /// Print the value of an expression.
    Print(Expr),

    /// Invoke another template.
    Call(CallNode),
}

/// A call to another template.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    /// Name of the called template.
    pub callee: String,
    /// Location of the call in the enclosing template, when known.
    pub call_site: Option<CallSite>,
}

impl CallNode {
    /// Create a call with no recorded location.
    pub fn new(callee: impl Into<String>) -> Self {
        Self {
            callee: callee.into(),
            call_site: None,
        }
    }

    /// Create a call with a recorded location.
    pub fn at(callee: impl Into<String>, call_site: CallSite) -> Self {
        Self {
            callee: callee.into(),
            call_site: Some(call_site),
        }
    }
}

/// An expression in a print node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Value),

    /// A reference to a template data variable.
    Var(String),

    /// A builtin function call.
    Function {
        /// Function name, as registered in the function registry.
        name: String,
        /// Argument expressions.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// A string-literal expression.
    pub fn str(content: impl Into<String>) -> Self {
        Expr::Literal(Value::text(content))
    }

    /// A variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// A function call expression.
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_site_display() {
        let site = CallSite::new("main.weft", 12);
        assert_eq!(site.to_string(), "main.weft:12");
    }

    #[test]
    fn test_expr_helpers() {
        assert_eq!(Expr::str("a"), Expr::Literal(Value::text("a")));
        assert_eq!(Expr::var("x"), Expr::Var("x".to_string()));
    }

    #[test]
    fn test_call_node_at() {
        let call = CallNode::at("ns.inner", CallSite::new("outer.weft", 3));
        assert_eq!(call.callee, "ns.inner");
        assert_eq!(call.call_site.unwrap().line, 3);
    }
}
