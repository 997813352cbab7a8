//! Playback record definitions

use serde::Serialize;

/// One note for the audio scheduler.
///
/// Serialized as `{"midi", "time", "duration", "columnIndex"}`.
///
/// # Fields
/// - `midi`: MIDI note number
/// - `time`: start time in seconds from the top of the progression
/// - `duration`: length in seconds
/// - `column_index`: index of the tab column holding this note, for playhead highlighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackNote {
    pub midi: i32,
    pub time: f64,
    pub duration: f64,
    pub column_index: usize,
}
