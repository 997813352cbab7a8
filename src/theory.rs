//! # Music Theory Tables
//!
//! Pitch classes, scale degrees, chord qualities and the modes that connect them.
//!
//! All tables are fixed data: every lookup is an exhaustive `match` on a closed enum,
//! so there is no fallible table access anywhere in the pipeline.
//!
//! ## MIDI Reference
//! - E1 = 28 (lowest open string on a 4-string bass)
//! - C2 = 36, C3 = 48, C4 = 60

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BassError;

/// Chromatic note names, indexed by pitch class.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The lowest pitch a generated root may take (E1, the open low E string).
pub const LOWEST_PITCH: i32 = 28;

/// One of the 12 chromatic pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// A key is named by its tonic pitch class.
pub type Key = PitchClass;

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Chromatic index, C = 0.
    pub fn index(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::DSharp => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp => 6,
            PitchClass::G => 7,
            PitchClass::GSharp => 8,
            PitchClass::A => 9,
            PitchClass::ASharp => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class of any index, wrapping modulo 12.
    pub fn from_index(index: u8) -> Self {
        PitchClass::ALL[(index % 12) as usize]
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.index() as usize]
    }

    /// Transpose upwards by `semitones`, wrapping at the octave.
    pub fn transpose(self, semitones: u8) -> Self {
        PitchClass::from_index((self.index() + semitones % 12) % 12)
    }

    /// Lowest MIDI number at or above [`LOWEST_PITCH`] with this pitch class.
    ///
    /// ```
    /// use walkbass::PitchClass;
    ///
    /// assert_eq!(PitchClass::E.lowest_midi(), 28);
    /// assert_eq!(PitchClass::C.lowest_midi(), 36);
    /// assert_eq!(PitchClass::DSharp.lowest_midi(), 39);
    /// ```
    pub fn lowest_midi(self) -> i32 {
        let class = self.index() as i32;
        LOWEST_PITCH + (class - LOWEST_PITCH).rem_euclid(12)
    }
}

impl FromStr for PitchClass {
    type Err = BassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NOTE_NAMES
            .iter()
            .position(|name| *name == s)
            .map(|i| PitchClass::ALL[i])
            .ok_or_else(|| BassError::InvalidKey(s.to_string()))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale degree of a chord root relative to the key's major scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleDegree {
    One,
    FlatTwo,
    Two,
    FlatThree,
    Three,
    Four,
    FlatFive,
    Five,
    SharpFive,
    Six,
    FlatSeven,
    Seven,
}

impl ScaleDegree {
    pub const ALL: [ScaleDegree; 12] = [
        ScaleDegree::One,
        ScaleDegree::FlatTwo,
        ScaleDegree::Two,
        ScaleDegree::FlatThree,
        ScaleDegree::Three,
        ScaleDegree::Four,
        ScaleDegree::FlatFive,
        ScaleDegree::Five,
        ScaleDegree::SharpFive,
        ScaleDegree::Six,
        ScaleDegree::FlatSeven,
        ScaleDegree::Seven,
    ];

    /// Semitones above the key's tonic.
    pub fn semitones(self) -> u8 {
        match self {
            ScaleDegree::One => 0,
            ScaleDegree::FlatTwo => 1,
            ScaleDegree::Two => 2,
            ScaleDegree::FlatThree => 3,
            ScaleDegree::Three => 4,
            ScaleDegree::Four => 5,
            ScaleDegree::FlatFive => 6,
            ScaleDegree::Five => 7,
            ScaleDegree::SharpFive => 8,
            ScaleDegree::Six => 9,
            ScaleDegree::FlatSeven => 10,
            ScaleDegree::Seven => 11,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleDegree::One => "1",
            ScaleDegree::FlatTwo => "flat2",
            ScaleDegree::Two => "2",
            ScaleDegree::FlatThree => "flat3",
            ScaleDegree::Three => "3",
            ScaleDegree::Four => "4",
            ScaleDegree::FlatFive => "flat5",
            ScaleDegree::Five => "5",
            ScaleDegree::SharpFive => "sharp5",
            ScaleDegree::Six => "6",
            ScaleDegree::FlatSeven => "flat7",
            ScaleDegree::Seven => "7",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        ScaleDegree::ALL.into_iter().find(|d| d.label() == label)
    }

    /// Triad quality this degree carries in a major key.
    /// Chromatic degrees have no diatonic expectation.
    pub fn diatonic_quality(self) -> Option<ChordQuality> {
        match self {
            ScaleDegree::One | ScaleDegree::Four | ScaleDegree::Five => Some(ChordQuality::Major),
            ScaleDegree::Two | ScaleDegree::Three | ScaleDegree::Six => Some(ChordQuality::Minor),
            ScaleDegree::Seven => Some(ChordQuality::Diminished),
            ScaleDegree::FlatTwo
            | ScaleDegree::FlatThree
            | ScaleDegree::FlatFive
            | ScaleDegree::SharpFive
            | ScaleDegree::FlatSeven => None,
        }
    }

    /// Mode conventionally built on this degree of a major scale.
    pub fn diatonic_mode(self) -> Option<Mode> {
        match self {
            ScaleDegree::One => Some(Mode::Ionian),
            ScaleDegree::Two => Some(Mode::Dorian),
            ScaleDegree::Three => Some(Mode::Phrygian),
            ScaleDegree::Four => Some(Mode::Lydian),
            ScaleDegree::Five => Some(Mode::Mixolydian),
            ScaleDegree::Six => Some(Mode::Aeolian),
            ScaleDegree::Seven => Some(Mode::Locrian),
            _ => None,
        }
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Minor7,
    Major7,
    Diminished,
    Augmented,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 7] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dominant7,
        ChordQuality::Minor7,
        ChordQuality::Major7,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
    ];

    /// Suffix used in chord symbols (`""`, `m`, `7`, `m7`, `maj7`, `dim`, `aug`).
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        ChordQuality::ALL.into_iter().find(|q| q.suffix() == suffix)
    }

    /// Mode used when the chord is borrowed or otherwise not diatonic.
    pub fn fallback_mode(quality: Option<ChordQuality>) -> Mode {
        match quality {
            Some(ChordQuality::Major | ChordQuality::Major7 | ChordQuality::Augmented) => Mode::Ionian,
            Some(ChordQuality::Minor | ChordQuality::Minor7) => Mode::Aeolian,
            Some(ChordQuality::Dominant7) => Mode::Mixolydian,
            Some(ChordQuality::Diminished) => Mode::Locrian,
            None => Mode::Ionian,
        }
    }
}

/// The seven modes of the major scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    /// Semitones above the mode's own root.
    pub const fn intervals(self) -> &'static [i32; 7] {
        match self {
            Mode::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Mode::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Mode::Locrian => &[0, 1, 3, 5, 6, 8, 10],
        }
    }

    /// Pick the mode for a chord: the degree's own mode when the chord is diatonic,
    /// otherwise a mode chosen from the quality alone.
    ///
    /// ```
    /// use walkbass::{ChordQuality, Mode, ScaleDegree};
    ///
    /// assert_eq!(Mode::for_chord(ScaleDegree::Four, Some(ChordQuality::Major)), Mode::Lydian);
    /// // bVII is borrowed, so only the quality counts
    /// assert_eq!(Mode::for_chord(ScaleDegree::FlatSeven, Some(ChordQuality::Major)), Mode::Ionian);
    /// ```
    pub fn for_chord(degree: ScaleDegree, quality: Option<ChordQuality>) -> Mode {
        if let (Some(expected), Some(mode)) = (degree.diatonic_quality(), degree.diatonic_mode()) {
            if quality_matches(degree, quality, expected) {
                return mode;
            }
        }
        ChordQuality::fallback_mode(quality)
    }
}

/// Seventh chords count as their triad; a dominant seventh also fits any degree
/// that expects a major triad, and always fits V.
fn quality_matches(degree: ScaleDegree, quality: Option<ChordQuality>, expected: ChordQuality) -> bool {
    match quality {
        None => false,
        Some(q) if q == expected => true,
        Some(ChordQuality::Major7) => expected == ChordQuality::Major,
        Some(ChordQuality::Minor7) => expected == ChordQuality::Minor,
        Some(ChordQuality::Dominant7) => {
            expected == ChordQuality::Major || degree == ScaleDegree::Five
        }
        Some(_) => false,
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ionian => "Ionian",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Aeolian => "Aeolian",
            Mode::Locrian => "Locrian",
        };
        f.write_str(name)
    }
}

/// Note name with octave number, counting octaves as `midi / 12`.
///
/// ```
/// use walkbass::note_from_midi;
///
/// assert_eq!(note_from_midi(28), "E2");
/// assert_eq!(note_from_midi(60), "C5");
/// ```
pub fn note_from_midi(midi: i32) -> String {
    let index = midi.rem_euclid(12) as usize;
    let octave = midi.div_euclid(12);
    format!("{}{}", NOTE_NAMES[index], octave)
}
