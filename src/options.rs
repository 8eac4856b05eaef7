//! Configuration for serialization.
//!
//! The only knob is the recursion budget: how many composite values may be
//! open on the walk at once before serialization gives up with
//! [`Error::StackOverflow`](crate::Error::StackOverflow). Output shape is not
//! configurable: there is no pretty printing, key sorting or custom
//! separator support.
//!
//! ## Examples
//!
//! ```rust
//! use json_stringify::{js, stringify_with_options, Error, StringifyOptions};
//!
//! let nested = js!([[[[1]]]]);
//!
//! let options = StringifyOptions::new().with_max_depth(2);
//! let err = stringify_with_options(&nested, options).unwrap_err();
//! assert_eq!(err, Error::StackOverflow);
//! ```

/// Default composite-nesting budget.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for [`stringify_with_options`](crate::stringify_with_options).
#[derive(Clone, Debug)]
pub struct StringifyOptions {
    /// Maximum number of simultaneously open objects/arrays on the walk.
    pub max_depth: usize,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StringifyOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the composite-nesting budget.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_stringify::StringifyOptions;
    ///
    /// let options = StringifyOptions::new().with_max_depth(16);
    /// assert_eq!(options.max_depth, 16);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
