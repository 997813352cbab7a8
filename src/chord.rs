//! Chords and chord-symbol parsing.
//!
//! A symbol is a degree label followed by a quality suffix:
//! `1`, `6m`, `2m7`, `57` (V7), `flat7maj7`, `7dim`.
//! Degree labels are a single digit with an optional `flat`/`sharp` prefix, so the
//! split between degree and suffix is never ambiguous.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BassError;
use crate::theory::{ChordQuality, ScaleDegree};

/// One chord of a progression. Fields are read-only once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    degree: ScaleDegree,
    quality: Option<ChordQuality>,
    measure: u32,
    beat: f64,
    duration: f64,
}

impl Chord {
    /// Create a chord, rejecting measure 0.
    pub fn new(
        degree: ScaleDegree,
        quality: Option<ChordQuality>,
        measure: u32,
        beat: f64,
        duration: f64,
    ) -> Result<Self, BassError> {
        if measure == 0 {
            return Err(BassError::InvalidMeasure(measure));
        }
        Ok(Self {
            degree,
            quality,
            measure,
            beat,
            duration,
        })
    }

    /// A whole-measure chord starting on beat 1.
    pub fn in_measure(
        degree: ScaleDegree,
        quality: Option<ChordQuality>,
        measure: u32,
    ) -> Result<Self, BassError> {
        Self::new(degree, quality, measure, 1.0, 4.0)
    }

    /// Parse a chord symbol and place it in `measure`.
    ///
    /// ```
    /// use walkbass::{Chord, ChordQuality, ScaleDegree};
    ///
    /// let chord = Chord::parse("57", 3)?;
    /// assert_eq!(chord.degree(), ScaleDegree::Five);
    /// assert_eq!(chord.quality(), Some(ChordQuality::Dominant7));
    /// assert_eq!(chord.measure(), 3);
    /// # Ok::<(), walkbass::BassError>(())
    /// ```
    pub fn parse(symbol: &str, measure: u32) -> Result<Self, BassError> {
        let (degree, quality) = parse_chord_symbol(symbol)?;
        Self::in_measure(degree, Some(quality), measure)
    }

    pub fn degree(&self) -> ScaleDegree {
        self.degree
    }

    pub fn quality(&self) -> Option<ChordQuality> {
        self.quality
    }

    pub fn measure(&self) -> u32 {
        self.measure
    }

    pub fn beat(&self) -> f64 {
        self.beat
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = self.quality.map(ChordQuality::suffix).unwrap_or("");
        write!(f, "{}{}", self.degree.label(), suffix)
    }
}

/// Split a chord symbol into its degree and quality.
pub fn parse_chord_symbol(symbol: &str) -> Result<(ScaleDegree, ChordQuality), BassError> {
    let invalid = || BassError::InvalidChord(symbol.to_string());
    let trimmed = symbol.trim();

    let prefix_len = ["flat", "sharp"]
        .iter()
        .find(|p| trimmed.starts_with(*p))
        .map_or(0, |p| p.len());

    let digit = trimmed[prefix_len..].chars().next().ok_or_else(invalid)?;
    if !digit.is_ascii_digit() {
        return Err(invalid());
    }
    let split = prefix_len + 1;

    let degree = ScaleDegree::from_label(&trimmed[..split]).ok_or_else(invalid)?;
    let quality = ChordQuality::from_suffix(&trimmed[split..]).ok_or_else(invalid)?;
    Ok((degree, quality))
}

impl FromStr for Chord {
    type Err = BassError;

    /// Parses a symbol into a measure-1 chord.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chord::parse(s, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_symbol_parsing() {
        assert_eq!(
            parse_chord_symbol("1"),
            Ok((ScaleDegree::One, ChordQuality::Major))
        );
        assert_eq!(
            parse_chord_symbol("6m"),
            Ok((ScaleDegree::Six, ChordQuality::Minor))
        );
        assert_eq!(
            parse_chord_symbol("2m7"),
            Ok((ScaleDegree::Two, ChordQuality::Minor7))
        );
        assert_eq!(
            parse_chord_symbol("57"),
            Ok((ScaleDegree::Five, ChordQuality::Dominant7))
        );
        assert_eq!(
            parse_chord_symbol("7"),
            Ok((ScaleDegree::Seven, ChordQuality::Major))
        );
        assert_eq!(
            parse_chord_symbol("77"),
            Ok((ScaleDegree::Seven, ChordQuality::Dominant7))
        );
        assert_eq!(
            parse_chord_symbol("flat7maj7"),
            Ok((ScaleDegree::FlatSeven, ChordQuality::Major7))
        );
        assert_eq!(
            parse_chord_symbol("sharp5aug"),
            Ok((ScaleDegree::SharpFive, ChordQuality::Augmented))
        );
        assert_eq!(
            parse_chord_symbol(" 7dim "),
            Ok((ScaleDegree::Seven, ChordQuality::Diminished))
        );
    }

    #[test]
    fn test_invalid_chord_symbols() {
        for bad in ["", "flat", "9", "flat1", "sharp3", "2sus", "m7", "IV"] {
            assert_eq!(
                parse_chord_symbol(bad),
                Err(BassError::InvalidChord(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trips_symbol() {
        for symbol in ["1", "2m7", "57", "flat3maj7", "7dim", "sharp5aug", "4m"] {
            let chord = Chord::parse(symbol, 1).unwrap();
            assert_eq!(chord.to_string(), symbol);
        }
    }

    #[test]
    fn test_unspecified_quality_displays_bare_degree() {
        let chord = Chord::in_measure(ScaleDegree::FlatSeven, None, 2).unwrap();
        assert_eq!(chord.to_string(), "flat7");
    }

    #[test]
    fn test_measure_zero_is_rejected() {
        assert_eq!(
            Chord::in_measure(ScaleDegree::One, None, 0),
            Err(BassError::InvalidMeasure(0))
        );
        assert_eq!(
            Chord::parse("1", 0).unwrap_err(),
            BassError::InvalidMeasure(0)
        );
    }
}
