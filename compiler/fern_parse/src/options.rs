//! Parser configuration.

/// Options that change what the parser accepts.
///
/// ```text
/// let options = ParseOptions::default().with_automatic_semicolon_insertion(false);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// When `false`, every automatic semicolon is reported as an error.
    pub allow_automatic_semicolon_insertion: bool,
    /// Parse the whole text as strict-mode code, as if it started with a
    /// `"use strict"` directive.
    pub initial_strict_mode: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_automatic_semicolon_insertion: true,
            initial_strict_mode: false,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_automatic_semicolon_insertion(mut self, allow: bool) -> Self {
        self.allow_automatic_semicolon_insertion = allow;
        self
    }

    #[must_use]
    pub fn with_initial_strict_mode(mut self, strict: bool) -> Self {
        self.initial_strict_mode = strict;
        self
    }
}
