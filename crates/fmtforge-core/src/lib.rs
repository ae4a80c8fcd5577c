//! # fmtforge-core
//!
//! A runtime printf-style string formatting engine.
//!
//! Given a format template and a list of [`Value`] arguments, [`render`]
//! interprets embedded `%`-directives (flags, width, precision, positional
//! `N$` selection, and a conversion character) and produces the rendered
//! string. Integer conversions support fixed-width and arbitrary-precision
//! arguments, including the infinite two's-complement `..`-prefix convention
//! for negative values in bases 2, 8, and 16.
//!
//! The engine is stateless per call: each render owns its own argument
//! cursor and output buffer, so concurrent calls never share mutable state.

#![deny(unsafe_code)]

pub mod args;
pub mod buffer;
pub mod directive;
pub mod error;
pub mod num;
pub mod render;
pub mod value;

pub use error::FormatError;
pub use render::render;
pub use value::Value;
