/// Default scanner buffer capacity in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Buffer tuning for [`Scanner`](crate::Scanner) and everything built on it.
///
/// The scanner starts with `buffer_size` bytes of capacity. Whenever a read
/// would leave less than `threshold` bytes free after compaction, the buffer
/// doubles, so large tokens cost a logarithmic number of reallocations.
///
/// # Examples
///
/// ```rust
/// use jsonstruct::ParserOptions;
///
/// let options = ParserOptions::with_buffer_size(64);
/// assert_eq!(options.threshold, 16);
/// assert_eq!(ParserOptions::default().buffer_size, 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Initial buffer capacity in bytes. Values below 1 are treated as 1.
    ///
    /// # Default
    ///
    /// `4096`
    pub buffer_size: usize,

    /// Minimum free space to keep before reading. A refill that cannot
    /// guarantee this much room grows the buffer first.
    ///
    /// # Default
    ///
    /// `buffer_size / 4`
    pub threshold: usize,
}

impl ParserOptions {
    /// Options with the given capacity and a threshold of a quarter of it.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            threshold: buffer_size >> 2,
        }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }
}
