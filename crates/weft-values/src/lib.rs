/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime value model for the weft template engine.
//!
//! This crate defines the slice of the runtime value model that the render
//! core consumes:
//!
//! - [`Value`]: the runtime value variants templates evaluate to
//! - [`TextValue`]: text content with an optional declared direction
//! - [`Dir`] and [`estimate_dir`]: text-direction types and the
//!   first-strong-character estimation heuristic
//! - [`TemplateData`]: the variable bindings supplied to one render
//! - [`DataError`]: the failure raised when a value is malformed or mistyped
//!
//! # Architecture
//!
//! These types are **independent of any template front end**. Parsing,
//! type checking, and escaping live elsewhere; conversion from external
//! data (JSON) into [`Value`] happens here so the render core never touches
//! serde types directly.

pub mod dir;
pub mod error;
pub mod value;

// Re-export main types at crate root
pub use dir::{Dir, estimate_dir};
pub use error::DataError;
pub use value::{TemplateData, TextValue, Value};
