//! Argument cursors.
//!
//! [`ArgCursor`] provides bounds-checked sequential and positional access
//! into the argument list. Positional (`N$`) access never permanently
//! advances the sequential position: an explicit index only seeds a
//! directive-scoped cursor ([`DirectiveArgs`]), so mixing `N$` and
//! sequential directives in one template behaves like common printf
//! implementations.

use crate::error::FormatError;
use crate::value::Value;

/// Sequential cursor over the argument list for one render call.
#[derive(Debug)]
pub struct ArgCursor<'v> {
    args: &'v [Value],
    next: usize,
}

impl<'v> ArgCursor<'v> {
    pub fn new(args: &'v [Value]) -> Self {
        Self { args, next: 0 }
    }

    /// Number of arguments supplied.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True when the argument list is empty.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Consume and return the next sequential argument.
    pub fn next(&mut self) -> Result<&'v Value, FormatError> {
        let value = self
            .args
            .get(self.next)
            .ok_or(FormatError::ArgumentUnderflow)?;
        self.next += 1;
        Ok(value)
    }

    /// Return the argument at an explicit 1-based index without touching
    /// the sequential position.
    pub fn at(&self, index: usize) -> Result<&'v Value, FormatError> {
        if index == 0 {
            return Err(FormatError::ArgumentUnderflow);
        }
        self.args
            .get(index - 1)
            .ok_or(FormatError::ArgumentUnderflow)
    }
}

/// Directive-scoped argument fetcher.
///
/// Fetches are sequential by default. Once a directive supplies an explicit
/// `N$` index, subsequent fetches within that directive continue from N
/// (N, N+1, ...) without disturbing the global sequential cursor.
#[derive(Debug)]
pub(crate) struct DirectiveArgs<'v, 'c> {
    cursor: &'c mut ArgCursor<'v>,
    local: Option<usize>,
}

impl<'v, 'c> DirectiveArgs<'v, 'c> {
    pub(crate) fn new(cursor: &'c mut ArgCursor<'v>) -> Self {
        Self {
            cursor,
            local: None,
        }
    }

    /// Restart this directive's fetches at the given 1-based index.
    pub(crate) fn rebase(&mut self, index: usize) {
        self.local = Some(index);
    }

    /// Fetch the next argument for this directive.
    pub(crate) fn fetch(&mut self) -> Result<&'v Value, FormatError> {
        match self.local {
            Some(i) => {
                let value = self.cursor.at(i)?;
                self.local = Some(i + 1);
                Ok(value)
            }
            None => self.cursor.next(),
        }
    }

    /// One-off positional fetch (the `*N$` width/precision form).
    pub(crate) fn at(&self, index: usize) -> Result<&'v Value, FormatError> {
        self.cursor.at(index)
    }
}
