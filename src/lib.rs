//! walkbass: walking bass lines as bass tablature.
//!
//! ## Pipeline
//! 1. [`generator`]: chords in a key → MIDI pitches, one per formula step
//! 2. [`fretboard`]: pitches → string/fret positions, greedy least movement
//! 3. [`tab`]: positions → aligned tab columns → text
//!
//! [`playback`] turns the same pitches into records for an audio scheduler, and
//! [`progression`] reads YAML progression documents.
//!
//! ## Example
//! ```rust
//! let source = r#"
//! key: C
//! chords: [2m7, 57, 1maj7]
//! "#;
//!
//! let tab = walkbass::compile(source)?;
//! assert_eq!(tab.lines().count(), 4);
//! assert!(tab.starts_with("G|"));
//! # Ok::<(), walkbass::BassError>(())
//! ```

pub mod chord;
pub mod error;
pub mod fretboard;
pub mod generator;
pub mod playback;
pub mod progression;
pub mod tab;
pub mod theory;

pub use chord::Chord;
pub use error::BassError;
pub use fretboard::{map_to_positions, FretPosition, FretboardMapper, Opening};
pub use generator::{generate_notes, Generator, Pitch};
pub use playback::{to_playback_sequence, PlaybackNote};
pub use progression::{Options, Progression};
pub use tab::{render_beat_row, render_columns, render_text, ColumnKind, TabColumn};
pub use theory::{note_from_midi, ChordQuality, Key, Mode, PitchClass, ScaleDegree};

/// Render a YAML progression document as tab text.
/// This is the main entry point for the library.
pub fn compile(source: &str) -> Result<String, BassError> {
    Progression::from_yaml(source)?.tab_text()
}

/// Render a YAML progression document with `options` in place of its own settings.
///
/// ```rust
/// use walkbass::{compile_with_options, Options};
///
/// let options = Options { slot_width: 3, ..Options::default() };
/// let tab = compile_with_options("key: E\nchords: [1]\n", options)?;
/// assert_eq!(tab.lines().last(), Some("E|-0--4--7--4-|"));
/// # Ok::<(), walkbass::BassError>(())
/// ```
pub fn compile_with_options(source: &str, options: Options) -> Result<String, BassError> {
    Progression::from_yaml(source)?
        .with_options(options)?
        .tab_text()
}

/// Playback records for a YAML progression document.
pub fn compile_playback(source: &str) -> Result<Vec<PlaybackNote>, BassError> {
    Progression::from_yaml(source)?.playback()
}

/// Render chords in `key` with default options.
///
/// ```rust
/// use walkbass::{render_tab, Chord};
///
/// let tab = render_tab(&[Chord::parse("1", 1)?], "E")?;
/// assert!(tab.contains("E|--0---"));
/// # Ok::<(), walkbass::BassError>(())
/// ```
pub fn render_tab(chords: &[Chord], key: &str) -> Result<String, BassError> {
    Progression::new(key, chords.to_vec(), Options::default())?.tab_text()
}
