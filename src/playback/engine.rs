//! Playback timing engine
//!
//! Turns measure/beat positions into seconds and tab column indices.

use crate::error::BassError;
use crate::generator::Pitch;
use crate::tab::BEATS_PER_MEASURE;

use super::types::PlaybackNote;

pub const DEFAULT_TEMPO: f64 = 120.0;

/// Columns per measure in the rendered tab: 4 beats + 1 bar line.
const COLUMNS_PER_MEASURE: usize = BEATS_PER_MEASURE as usize + 1;

/// Length of one beat in seconds, rejecting tempos that are not positive.
pub fn seconds_per_beat(bpm: f64) -> Result<f64, BassError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(BassError::InvalidTempo(bpm));
    }
    Ok(60.0 / bpm)
}

/// Tab column index of a (measure, beat) pair.
///
/// Formula: `(measure - 1) * 5 + 1 (header) + 1 (opening bar) + (beat - 1)`.
///
/// ```
/// use walkbass::playback::column_index;
///
/// assert_eq!(column_index(1, 1), 2);
/// assert_eq!(column_index(2, 3), 9);
/// ```
pub fn column_index(measure: u32, beat: u32) -> usize {
    let measure_offset = measure.saturating_sub(1) as usize * COLUMNS_PER_MEASURE;
    let beat_offset = beat.saturating_sub(1) as usize;
    measure_offset + 1 + 1 + beat_offset
}

/// Build scheduler records for `pitches` at `bpm`.
pub fn to_playback_sequence(pitches: &[Pitch], bpm: f64) -> Result<Vec<PlaybackNote>, BassError> {
    let beat_seconds = seconds_per_beat(bpm)?;

    Ok(pitches
        .iter()
        .map(|pitch| {
            let absolute_beat = pitch.measure.saturating_sub(1) as f64 * BEATS_PER_MEASURE as f64
                + pitch.beat.saturating_sub(1) as f64;

            PlaybackNote {
                midi: pitch.midi,
                time: absolute_beat * beat_seconds,
                duration: pitch.duration * beat_seconds,
                column_index: column_index(pitch.measure, pitch.beat),
            }
        })
        .collect())
}
