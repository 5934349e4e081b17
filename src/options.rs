/// Return-type keywords recognized when no others are configured.
pub const DEFAULT_RETURN_TYPES: [&str; 3] = ["int", "void", "boolean"];

/// Translation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Identifiers that start a top-level function definition.
    pub return_types: Vec<String>,
    /// Skip unrecognized tokens with a warning instead of failing.
    pub lenient: bool,
}

impl Options {
    /// Default settings: strict, with the default return types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            return_types: DEFAULT_RETURN_TYPES.iter().map(ToString::to_string).collect(),
            lenient: false,
        }
    }

    /// Recognize another return-type keyword.
    #[must_use]
    pub fn return_type(mut self, name: &str) -> Self {
        if !self.is_return_type(name) {
            self.return_types.push(name.to_string());
        }
        self
    }

    /// Enable or disable skip-and-continue on unrecognized input.
    #[must_use]
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[must_use]
    pub fn is_return_type(&self, word: &str) -> bool {
        self.return_types.iter().any(|t| t == word)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
