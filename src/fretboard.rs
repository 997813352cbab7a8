//! # Fretboard Mapper
//!
//! Places each pitch on a 4-string bass (E1 A1 D2 G2, frets 0–24).
//!
//! Selection is a single greedy pass with no backtracking. The hand starts at a sentinel
//! on fret 12 of the E string. Each later pitch takes the candidate that minimizes
//! `|Δfret| + |Δstring|` from the previous pick. Equal costs go to the lowest string index.
//! Pitches with no candidate are skipped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::generator::Pitch;

/// Open-string MIDI numbers, low E first.
pub const OPEN_STRINGS: [i32; 4] = [28, 33, 38, 43];

pub const STRING_NAMES: [&str; 4] = ["E", "A", "D", "G"];

pub const MAX_FRET: i32 = 24;

/// Starting hand position before the first note.
pub const SENTINEL: FretPosition = FretPosition {
    string: 0,
    fret: 12,
    measure: 0,
    beat: 0,
};

const FRET_COST_WEIGHT: i32 = 1;
const STRING_COST_WEIGHT: i32 = 1;

/// A pitch placed on the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    /// 0 = low E, 3 = G
    pub string: usize,
    pub fret: i32,
    pub measure: u32,
    pub beat: u32,
}

/// How the first note of a line is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Opening {
    /// Lowest available fret.
    #[default]
    LowestFret,
    /// Cheapest move from the sentinel, like every later note.
    NearestToSentinel,
}

/// Every (string, fret) that sounds `pitch`, in string order.
pub fn playable_positions(pitch: &Pitch) -> Vec<FretPosition> {
    OPEN_STRINGS
        .iter()
        .enumerate()
        .filter_map(|(string, open)| {
            let fret = pitch.midi - open;
            (0..=MAX_FRET).contains(&fret).then_some(FretPosition {
                string,
                fret,
                measure: pitch.measure,
                beat: pitch.beat,
            })
        })
        .collect()
}

/// Hand movement between two positions.
pub fn cost(prev: &FretPosition, next: &FretPosition) -> i32 {
    let fret_diff = (next.fret - prev.fret).abs();
    let string_diff = (next.string as i32 - prev.string as i32).abs();
    fret_diff * FRET_COST_WEIGHT + string_diff * STRING_COST_WEIGHT
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FretboardMapper {
    opening: Opening,
}

impl FretboardMapper {
    pub fn new(opening: Opening) -> Self {
        Self { opening }
    }

    pub fn opening(&self) -> Opening {
        self.opening
    }

    /// Map pitches to positions, dropping the ones no string can reach.
    pub fn map(&self, pitches: &[Pitch]) -> Vec<FretPosition> {
        let mut result = Vec::with_capacity(pitches.len());
        let mut hand = SENTINEL;

        for pitch in pitches {
            let candidates = playable_positions(pitch);
            let by_lowest_fret = result.is_empty() && self.opening == Opening::LowestFret;

            // min_by_key returns the first minimum, i.e. the lowest string on ties
            let best = candidates.iter().min_by_key(|next| {
                if by_lowest_fret {
                    next.fret
                } else {
                    cost(&hand, next)
                }
            });

            match best {
                Some(&position) => {
                    debug!(
                        midi = pitch.midi,
                        string = STRING_NAMES[position.string],
                        fret = position.fret,
                        "placed note"
                    );
                    result.push(position);
                    hand = position;
                }
                None => {
                    warn!(
                        midi = pitch.midi,
                        measure = pitch.measure,
                        beat = pitch.beat,
                        "pitch is outside the fretboard, skipping"
                    );
                }
            }
        }

        result
    }
}

/// Map pitches with the default [`Opening::LowestFret`].
pub fn map_to_positions(pitches: &[Pitch]) -> Vec<FretPosition> {
    FretboardMapper::default().map(pitches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(midi: &[i32]) -> Vec<Pitch> {
        midi.iter()
            .enumerate()
            .map(|(i, &midi)| Pitch {
                midi,
                measure: 1,
                beat: i as u32 + 1,
                duration: 1.0,
            })
            .collect()
    }

    fn tuples(positions: &[FretPosition]) -> Vec<(usize, i32)> {
        positions.iter().map(|p| (p.string, p.fret)).collect()
    }

    #[test]
    fn test_playable_positions() {
        let positions = playable_positions(&pitches(&[40])[0]);
        assert_eq!(tuples(&positions), vec![(0, 12), (1, 7), (2, 2)]);

        // Open low E only fits one string
        assert_eq!(tuples(&playable_positions(&pitches(&[28])[0])), vec![(0, 0)]);
        // G4 is fret 24 on the G string
        assert_eq!(tuples(&playable_positions(&pitches(&[67])[0])), vec![(3, 24)]);
    }

    #[test]
    fn test_cost() {
        let a = FretPosition { string: 0, fret: 12, measure: 1, beat: 1 };
        let b = FretPosition { string: 2, fret: 7, measure: 1, beat: 2 };
        assert_eq!(cost(&a, &b), 7);
        assert_eq!(cost(&b, &a), 7);
        assert_eq!(cost(&a, &a), 0);
    }

    #[test]
    fn test_lowest_fret_opening() {
        let positions = map_to_positions(&pitches(&[40, 43, 47]));
        // 40: D2; 43: tie between D5 and G0 (cost 3), lower string wins; 47: G4
        assert_eq!(tuples(&positions), vec![(2, 2), (2, 5), (3, 4)]);
    }

    #[test]
    fn test_nearest_to_sentinel_opening() {
        let mapper = FretboardMapper::new(Opening::NearestToSentinel);
        let positions = mapper.map(&pitches(&[40, 43, 47]));
        // 40: E12 sits on the sentinel; 43: E15 and A10 both cost 3, E wins; 47: A14
        assert_eq!(tuples(&positions), vec![(0, 12), (0, 15), (1, 14)]);
    }

    #[test]
    fn test_timing_is_carried_through() {
        let input = vec![
            Pitch { midi: 36, measure: 3, beat: 2, duration: 1.0 },
            Pitch { midi: 40, measure: 4, beat: 1, duration: 1.0 },
        ];
        let positions = map_to_positions(&input);
        assert_eq!(positions[0].measure, 3);
        assert_eq!(positions[0].beat, 2);
        assert_eq!(positions[1].measure, 4);
        assert_eq!(positions[1].beat, 1);
    }

    #[test]
    fn test_unplayable_pitches_are_skipped() {
        let positions = map_to_positions(&pitches(&[20, 36, 90, 38]));
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].beat, 2);
        assert_eq!(positions[1].beat, 4);
    }

    #[test]
    fn test_first_playable_note_uses_opening_rule() {
        // The unplayable note must not count as the first note
        let positions = map_to_positions(&pitches(&[10, 45]));
        assert_eq!(tuples(&positions), vec![(3, 2)]);
    }

    #[test]
    fn test_frets_stay_in_range() {
        let all: Vec<i32> = (0..100).collect();
        for position in map_to_positions(&pitches(&all)) {
            assert!((0..=MAX_FRET).contains(&position.fret));
            assert!(position.string < OPEN_STRINGS.len());
        }
        // Every pitch from E1 to G4 is reachable
        assert_eq!(map_to_positions(&pitches(&all)).len(), (28..=67).count());
    }

    #[test]
    fn test_walking_line_stays_in_one_area() {
        let positions = map_to_positions(&pitches(&[36, 40, 43, 40]));
        // C A3, E D2, G D5 (ties with G0), then E A7 (ties with D2)
        assert_eq!(tuples(&positions), vec![(1, 3), (2, 2), (2, 5), (1, 7)]);
    }
}
