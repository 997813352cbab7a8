//! # Error Types
//!
//! All errors produced by the walkbass pipeline.
//!
//! Only input validation fails. Unplayable notes are dropped by the fretboard
//! mapper and rendering gaps are filled with filler, so neither ever surfaces here.
//!
//! ## Usage
//! ```rust
//! use walkbass::{compile, BassError};
//!
//! let source = "key: H\nchords: [\"1\"]\n";
//! match compile(source) {
//!     Ok(tab) => println!("{}", tab),
//!     Err(BassError::InvalidKey(key)) => eprintln!("No such key: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BassError {
    /// Key name is not one of the 12 chromatic names.
    ///
    /// # Example
    /// ```
    /// # use walkbass::BassError;
    /// let err = BassError::InvalidKey("H".to_string());
    /// assert_eq!(err.to_string(), "Key 'H' not found in chromatic notes");
    /// ```
    #[error("Key '{0}' not found in chromatic notes")]
    InvalidKey(String),

    /// A formula step points outside the 7-note mode.
    ///
    /// # Example
    /// ```
    /// # use walkbass::BassError;
    /// let err = BassError::InvalidFormulaIndex { index: 9, mode_len: 7 };
    /// assert_eq!(err.to_string(), "Formula index 9 is out of bounds for a 7-note mode");
    /// ```
    #[error("Formula index {index} is out of bounds for a {mode_len}-note mode")]
    InvalidFormulaIndex { index: usize, mode_len: usize },

    /// Chord symbol could not be parsed (e.g. `9m`, `2sus`).
    #[error("Invalid chord symbol: {0}")]
    InvalidChord(String),

    /// Measures are 1-indexed.
    #[error("Invalid measure {0}: measures start at 1")]
    InvalidMeasure(u32),

    #[error("Invalid tempo {0}: BPM must be a positive number")]
    InvalidTempo(f64),

    /// Malformed progression document.
    ///
    /// # Example
    /// ```
    /// # use walkbass::BassError;
    /// let err = BassError::ProgressionError("missing field `key`".to_string());
    /// assert_eq!(err.to_string(), "Invalid progression: missing field `key`");
    /// ```
    #[error("Invalid progression: {0}")]
    ProgressionError(String),
}
