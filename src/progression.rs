//! # Progression Documents
//!
//! Loads a progression from YAML and runs the full pipeline over it.
//!
//! ## Format
//! ```yaml
//! key: C
//! tempo: 120
//! formula: [1, 3, 5, 3]
//! slot-width: 6
//! measures: 4
//! opening: lowest-fret
//! beat-numbers: false
//! chords:
//!   - 2m7
//!   - 57
//!   - chord: 1maj7
//!     measure: 4
//! ```
//!
//! Only `key` and `chords` are required. A bare symbol goes in the measure after the
//! previous chord. The detailed form can pin a measure, beat and duration.
//!
//! ## Example
//! ```rust
//! use walkbass::Progression;
//!
//! let progression = Progression::from_yaml("key: G\nchords: [1, 4, 57, 1]\n")?;
//! assert_eq!(progression.chords().len(), 4);
//! assert_eq!(progression.notes()?.len(), 16);
//! # Ok::<(), walkbass::BassError>(())
//! ```

use serde::Deserialize;

use crate::chord::Chord;
use crate::error::BassError;
use crate::fretboard::{FretPosition, FretboardMapper, Opening};
use crate::generator::{Generator, Pitch, DEFAULT_FORMULA};
use crate::playback::{self, PlaybackNote, DEFAULT_TEMPO};
use crate::tab::{self, TabColumn, DEFAULT_SLOT_WIDTH, MAX_MEASURES};
use crate::theory::Key;

/// Raw progression for YAML deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawProgression {
    key: String,
    chords: Vec<RawChord>,
    tempo: Option<f64>,
    formula: Option<Vec<usize>>,
    slot_width: Option<usize>,
    measures: Option<u32>,
    opening: Option<Opening>,
    beat_numbers: Option<bool>,
}

/// Chord entry: either a bare symbol or a map with explicit timing.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawChord {
    // Unquoted symbols like `57` arrive as YAML integers
    Number(u32),
    Symbol(String),
    Detailed {
        chord: SymbolValue,
        measure: Option<u32>,
        beat: Option<f64>,
        duration: Option<f64>,
    },
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SymbolValue {
    Number(u32),
    Text(String),
}

impl SymbolValue {
    fn into_string(self) -> String {
        match self {
            SymbolValue::Number(n) => n.to_string(),
            SymbolValue::Text(s) => s,
        }
    }
}

/// Rendering and generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub tempo: f64,
    pub formula: Vec<usize>,
    pub slot_width: usize,
    /// Minimum number of measures to draw
    pub measures: u32,
    pub opening: Opening,
    /// Print beat numbers under the tab
    pub beat_numbers: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            formula: DEFAULT_FORMULA.to_vec(),
            slot_width: DEFAULT_SLOT_WIDTH,
            measures: 0,
            opening: Opening::default(),
            beat_numbers: false,
        }
    }
}

/// A key, its chords and the settings to render them with.
///
/// Every accessor reruns the pipeline from the chords, so results never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    key: Key,
    chords: Vec<Chord>,
    options: Options,
}

impl Progression {
    /// Rejects unknown keys, non-positive tempos and measures past [`MAX_MEASURES`].
    pub fn new(key: &str, chords: Vec<Chord>, options: Options) -> Result<Self, BassError> {
        let key: Key = key.parse()?;
        validate_options(&options)?;
        if let Some(chord) = chords.iter().find(|c| c.measure() > MAX_MEASURES) {
            return Err(BassError::InvalidMeasure(chord.measure()));
        }

        Ok(Self { key, chords, options })
    }

    /// Parse and validate a YAML progression document.
    pub fn from_yaml(source: &str) -> Result<Self, BassError> {
        let raw: RawProgression = serde_yaml::from_str(source)
            .map_err(|e| BassError::ProgressionError(e.to_string()))?;

        let defaults = Options::default();
        let options = Options {
            tempo: raw.tempo.unwrap_or(defaults.tempo),
            formula: raw.formula.unwrap_or(defaults.formula),
            slot_width: raw.slot_width.unwrap_or(defaults.slot_width),
            measures: raw.measures.unwrap_or(defaults.measures),
            opening: raw.opening.unwrap_or(defaults.opening),
            beat_numbers: raw.beat_numbers.unwrap_or(defaults.beat_numbers),
        };

        let chords = build_chords(raw.chords)?;
        Self::new(&raw.key, chords, options)
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace every option at once.
    pub fn with_options(mut self, options: Options) -> Result<Self, BassError> {
        validate_options(&options)?;
        self.options = options;
        Ok(self)
    }

    /// Replace the tempo, e.g. from a command-line override.
    pub fn with_tempo(mut self, bpm: f64) -> Result<Self, BassError> {
        playback::seconds_per_beat(bpm)?;
        self.options.tempo = bpm;
        Ok(self)
    }

    /// Number of measures the rendered tab covers at least.
    pub fn measure_count(&self) -> u32 {
        self.chords
            .iter()
            .map(Chord::measure)
            .max()
            .unwrap_or(0)
            .max(self.options.measures)
    }

    pub fn notes(&self) -> Result<Vec<Pitch>, BassError> {
        Generator::new(self.options.formula.clone()).generate_notes(&self.chords, self.key.name())
    }

    pub fn positions(&self) -> Result<Vec<FretPosition>, BassError> {
        Ok(FretboardMapper::new(self.options.opening).map(&self.notes()?))
    }

    pub fn columns(&self) -> Result<Vec<TabColumn>, BassError> {
        Ok(tab::render_columns(
            &self.positions()?,
            self.measure_count(),
            self.options.slot_width,
        ))
    }

    pub fn tab_text(&self) -> Result<String, BassError> {
        let columns = self.columns()?;
        Ok(if self.options.beat_numbers {
            tab::render_text_with_beats(&columns)
        } else {
            tab::render_text(&columns)
        })
    }

    pub fn playback(&self) -> Result<Vec<PlaybackNote>, BassError> {
        playback::to_playback_sequence(&self.notes()?, self.options.tempo)
    }
}

fn validate_options(options: &Options) -> Result<(), BassError> {
    playback::seconds_per_beat(options.tempo)?;
    if options.measures > MAX_MEASURES {
        return Err(BassError::InvalidMeasure(options.measures));
    }
    Ok(())
}

/// Assign measures to raw chord entries and parse their symbols.
fn build_chords(raw: Vec<RawChord>) -> Result<Vec<Chord>, BassError> {
    let mut chords = Vec::with_capacity(raw.len());
    let mut previous_measure = 0u32;

    for entry in raw {
        let next_measure = || {
            previous_measure
                .checked_add(1)
                .ok_or(BassError::InvalidMeasure(previous_measure))
        };
        let chord = match entry {
            RawChord::Number(n) => Chord::parse(&n.to_string(), next_measure()?)?,
            RawChord::Symbol(symbol) => Chord::parse(&symbol, next_measure()?)?,
            RawChord::Detailed {
                chord,
                measure,
                beat,
                duration,
            } => {
                let symbol = chord.into_string();
                let (degree, quality) = crate::chord::parse_chord_symbol(&symbol)?;
                Chord::new(
                    degree,
                    Some(quality),
                    match measure {
                        Some(measure) => measure,
                        None => next_measure()?,
                    },
                    beat.unwrap_or(1.0),
                    duration.unwrap_or(4.0),
                )?
            }
        };
        previous_measure = chord.measure();
        chords.push(chord);
    }

    Ok(chords)
}
