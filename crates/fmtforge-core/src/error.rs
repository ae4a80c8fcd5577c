//! Formatting fault taxonomy.
//!
//! Every fault is raised synchronously at the point of detection and aborts
//! the whole render call; no partial result is ever returned.

use thiserror::Error;

/// Errors produced while rendering a format template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The template itself is broken: unknown conversion character, a
    /// directive cut off by the end of the template, or width/precision
    /// specified twice. The message identifies the offending construct.
    #[error("{0}")]
    MalformedTemplate(String),

    /// A sequential or positional fetch went past the end of the argument
    /// list.
    #[error("too few arguments")]
    ArgumentUnderflow,

    /// An argument cannot satisfy the capability a conversion requires.
    #[error("invalid argument type for %{conversion}: expected {expected}")]
    InvalidArgumentType {
        conversion: char,
        expected: &'static str,
    },

    /// Reserved for grammars with a step-like modifier; never produced by
    /// this directive grammar.
    #[error("zero divisor not applicable to this directive grammar")]
    ZeroDivisorNotApplicable,
}

impl FormatError {
    /// Shorthand for a `MalformedTemplate` fault.
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        FormatError::MalformedTemplate(msg.into())
    }
}
