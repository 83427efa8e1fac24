/*! Errors that can abort building a paragraph.

   Finding no good breaks is *not* an error: the paragraph is then returned as a single
   (overfull or underfull) line. The only failure that reaches the caller is the hyphenation
   hook's, unmodified.
 */

/// Reported by a [`Hyphenator`](crate::engine::state::Hyphenator) that could not process a paragraph.
#[derive(Debug,Clone,PartialEq,Eq,thiserror::Error)]
pub enum HyphenationError {
    /// No patterns are loaded for the `\language` in effect
    #[error("No hyphenation patterns for language {language}")]
    NoPatterns { language:i32 },
    /// A hyphenation point could not be turned into a discretionary
    #[error("! Improper discretionary list: {0}")]
    ImproperDiscretionary(String),
    #[error("{0}")]
    Other(String)
}
