//! # Harmonic Engine
//!
//! Turns chords in a key into the absolute pitches of a walking bass line.
//!
//! ## Algorithm (per chord)
//! 1. Pick a mode with [`Mode::for_chord`]: the degree's own mode for diatonic chords,
//!    a quality-based mode for borrowed ones
//! 2. Root pitch class = key + degree offset (mod 12)
//! 3. Root MIDI = lowest MIDI ≥ 28 (E1) with that class
//! 4. One pitch per formula step: `root + mode[step - 1]`, on beat `step index + 1`
//!
//! ## Example
//! ```rust
//! use walkbass::{generate_notes, Chord};
//!
//! let chords = vec![Chord::parse("1", 1)?];
//! let notes = generate_notes(&chords, "C")?;
//!
//! let midi: Vec<i32> = notes.iter().map(|n| n.midi).collect();
//! assert_eq!(midi, vec![36, 40, 43, 40]); // C E G E
//! # Ok::<(), walkbass::BassError>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::chord::Chord;
use crate::error::BassError;
use crate::theory::{Key, Mode};

/// Walking pattern used when none is configured: root, third, fifth, third.
pub const DEFAULT_FORMULA: [usize; 4] = [1, 3, 5, 3];

/// A single generated bass note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    /// MIDI note number
    pub midi: i32,
    /// 1-indexed measure
    pub measure: u32,
    /// 1-indexed beat within the measure
    pub beat: u32,
    /// Duration in beats
    pub duration: f64,
}

/// Generates pitches from chords using a fixed melodic formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    formula: Vec<usize>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(DEFAULT_FORMULA.to_vec())
    }
}

impl Generator {
    /// Steps are 1-based indices into the chord's 7-note mode.
    /// They are checked during generation, not here.
    pub fn new(formula: Vec<usize>) -> Self {
        Self { formula }
    }

    pub fn formula(&self) -> &[usize] {
        &self.formula
    }

    /// Generate `formula.len()` pitches for every chord, in chord order.
    pub fn generate_notes(&self, chords: &[Chord], key: &str) -> Result<Vec<Pitch>, BassError> {
        let key: Key = key.parse()?;
        let mut result = Vec::with_capacity(chords.len() * self.formula.len());

        for chord in chords {
            let mode = Mode::for_chord(chord.degree(), chord.quality());
            let root_class = key.transpose(chord.degree().semitones());
            let root_midi = root_class.lowest_midi();
            let intervals = mode.intervals();

            debug!(
                chord = %chord,
                measure = chord.measure(),
                root = %root_class,
                mode = %mode,
                "generating chord"
            );

            for (j, &step) in self.formula.iter().enumerate() {
                let interval = step
                    .checked_sub(1)
                    .and_then(|i| intervals.get(i))
                    .ok_or(BassError::InvalidFormulaIndex {
                        index: step,
                        mode_len: intervals.len(),
                    })?;

                result.push(Pitch {
                    midi: root_midi + interval,
                    measure: chord.measure(),
                    beat: j as u32 + 1,
                    duration: 1.0,
                });
            }
        }

        Ok(result)
    }
}

/// Generate pitches with [`DEFAULT_FORMULA`].
pub fn generate_notes(chords: &[Chord], key: &str) -> Result<Vec<Pitch>, BassError> {
    Generator::default().generate_notes(chords, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{ChordQuality, ScaleDegree, LOWEST_PITCH};

    fn chord(symbol: &str, measure: u32) -> Chord {
        Chord::parse(symbol, measure).unwrap()
    }

    fn offsets(notes: &[Pitch]) -> Vec<i32> {
        notes.iter().map(|n| n.midi - notes[0].midi).collect()
    }

    #[test]
    fn test_one_major_in_c() {
        let notes = generate_notes(&[chord("1", 1)], "C").unwrap();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[0].midi, 36);
        assert_eq!(offsets(&notes), vec![0, 4, 7, 4]);
    }

    #[test]
    fn test_four_major_in_c_is_f_lydian() {
        let generator = Generator::new(vec![1, 2, 3, 4, 5, 6, 7]);
        let notes = generator.generate_notes(&[chord("4", 1)], "C").unwrap();

        // F1 = 29
        assert_eq!(notes[0].midi, 29);
        assert_eq!(notes[0].midi.rem_euclid(12), 5);
        assert_eq!(offsets(&notes), vec![0, 2, 4, 6, 7, 9, 11]);
    }

    #[test]
    fn test_timing_follows_formula_positions() {
        let notes = generate_notes(&[chord("2m7", 1), chord("57", 2)], "C").unwrap();
        assert_eq!(notes.len(), 8);

        let timing: Vec<(u32, u32)> = notes.iter().map(|n| (n.measure, n.beat)).collect();
        assert_eq!(
            timing,
            vec![(1, 1), (1, 2), (1, 3), (1, 4), (2, 1), (2, 2), (2, 3), (2, 4)]
        );
        assert!(notes.iter().all(|n| n.duration == 1.0));
    }

    #[test]
    fn test_ii_v_i_pitches() {
        let chords = [chord("2m7", 1), chord("57", 2), chord("1maj7", 3)];
        let midi: Vec<i32> = generate_notes(&chords, "C")
            .unwrap()
            .iter()
            .map(|n| n.midi)
            .collect();

        // D Dorian: D F A F; G Mixolydian: G B D B; C Ionian: C E G E
        assert_eq!(
            midi,
            vec![38, 41, 45, 41, 31, 35, 38, 35, 36, 40, 43, 40]
        );
    }

    #[test]
    fn test_borrowed_minor_four_uses_aeolian() {
        let notes = generate_notes(&[chord("4m", 1)], "C").unwrap();
        assert_eq!(offsets(&notes), vec![0, 3, 7, 3]);
    }

    #[test]
    fn test_diminished_seven_uses_locrian_fifth() {
        let notes = generate_notes(&[chord("7dim", 1)], "C").unwrap();
        assert_eq!(notes[0].midi, 35); // B1
        assert_eq!(offsets(&notes), vec![0, 3, 6, 3]);
    }

    #[test]
    fn test_unspecified_quality_is_ionian() {
        let chords = [Chord::in_measure(ScaleDegree::FlatSeven, None, 1).unwrap()];
        let notes = generate_notes(&chords, "C").unwrap();
        assert_eq!(notes[0].midi, 34); // A#1
        assert_eq!(offsets(&notes), vec![0, 4, 7, 4]);
    }

    #[test]
    fn test_every_pitch_is_above_floor() {
        for key in crate::theory::NOTE_NAMES {
            for degree in ScaleDegree::ALL {
                for quality in ChordQuality::ALL {
                    let c = Chord::in_measure(degree, Some(quality), 1).unwrap();
                    let notes = generate_notes(&[c], key).unwrap();
                    assert_eq!(notes.len(), DEFAULT_FORMULA.len());
                    assert!(notes.iter().all(|n| n.midi >= LOWEST_PITCH));
                }
            }
        }
    }

    #[test]
    fn test_invalid_key() {
        assert_eq!(
            generate_notes(&[chord("1", 1)], "H"),
            Err(BassError::InvalidKey("H".to_string()))
        );
    }

    #[test]
    fn test_invalid_formula_index() {
        let too_high = Generator::new(vec![1, 8]);
        assert_eq!(
            too_high.generate_notes(&[chord("1", 1)], "C"),
            Err(BassError::InvalidFormulaIndex { index: 8, mode_len: 7 })
        );

        let zero = Generator::new(vec![0]);
        assert_eq!(
            zero.generate_notes(&[chord("1", 1)], "C"),
            Err(BassError::InvalidFormulaIndex { index: 0, mode_len: 7 })
        );
    }

    #[test]
    fn test_empty_progression() {
        assert_eq!(generate_notes(&[], "C"), Ok(vec![]));
    }
}
