//! # Playback Module
//!
//! Converts generated pitches into records for an external audio scheduler.
//!
//! ## Purpose
//! Each record tells the scheduler:
//! 1. **What to play**: the MIDI note number
//! 2. **When**: start time and duration in seconds at a given BPM
//! 3. **Where the playhead goes**: the index of the tab column holding the note
//!
//! ## Sub-modules
//! - `types` - [`PlaybackNote`] record definition
//! - `engine` - timing and column-index arithmetic
//!
//! ## Example
//! ```rust
//! use walkbass::{generate_notes, Chord};
//! use walkbass::playback::to_playback_sequence;
//!
//! let notes = generate_notes(&[Chord::parse("1", 1)?], "C")?;
//! let records = to_playback_sequence(&notes, 120.0)?;
//!
//! assert_eq!(records.len(), 4);
//! assert_eq!(records[1].time, 0.5);
//! assert_eq!(records[1].column_index, 3);
//! # Ok::<(), walkbass::BassError>(())
//! ```
//!
//! ## Timing
//! All timing assumes 4/4 with the quarter note as the beat.

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{column_index, seconds_per_beat, to_playback_sequence, DEFAULT_TEMPO};
pub use types::PlaybackNote;
