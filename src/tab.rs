//! # Tab Renderer
//!
//! Lays fret positions out as tablature columns and joins them into text.
//!
//! ## Column Layout
//! ```text
//! header | b1 b2 b3 b4 | b1 b2 b3 b4 | ...
//! ```
//! One header column, one opening bar, then four content columns and a closing
//! bar per measure. Playback column indices address this exact layout
//! (see [`crate::playback::column_index`]).
//!
//! ## Example
//! ```rust
//! use walkbass::{render_columns, render_text, FretPosition};
//!
//! let positions = vec![FretPosition { string: 1, fret: 3, measure: 1, beat: 1 }];
//! let text = render_text(&render_columns(&positions, 1, 4));
//!
//! assert_eq!(
//!     text,
//!     "G|----------------|\n\
//!      D|----------------|\n\
//!      A|-3--------------|\n\
//!      E|----------------|\n"
//! );
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::fretboard::{FretPosition, OPEN_STRINGS, STRING_NAMES};

pub const BEATS_PER_MEASURE: u32 = 4;

pub const DEFAULT_SLOT_WIDTH: usize = 6;

pub const FILLER: char = '-';

pub const BAR: char = '|';

/// Longest span of measures a tab draws.
pub const MAX_MEASURES: u32 = 1024;

/// Text returned for a tab without columns.
pub const EMPTY_TAB: &str = "(no tab notes)";

const STRING_COUNT: usize = OPEN_STRINGS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// Fret numbers or filler for one beat
    Content,
    /// Measure separator
    BarLine,
    /// String names
    HeaderLine,
}

/// One time slice of tablature.
///
/// `cells` is indexed by string, low E first; every cell has the same width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabColumn {
    pub cells: [String; STRING_COUNT],
    pub measure: u32,
    pub beat: u32,
    pub duration: f64,
    pub kind: ColumnKind,
}

impl TabColumn {
    fn uniform(text: &str, measure: u32, kind: ColumnKind) -> Self {
        Self {
            cells: std::array::from_fn(|_| text.to_string()),
            measure,
            beat: 0,
            duration: 0.0,
            kind,
        }
    }

    fn header() -> Self {
        Self {
            cells: STRING_NAMES.map(str::to_string),
            measure: 0,
            beat: 0,
            duration: 0.0,
            kind: ColumnKind::HeaderLine,
        }
    }

    fn bar_line(measure: u32) -> Self {
        Self::uniform(&BAR.to_string(), measure, ColumnKind::BarLine)
    }

    pub fn width(&self) -> usize {
        self.cells[0].chars().count()
    }
}

/// Center `text` in `width` characters of `filler`.
///
/// Left padding is `floor((width - len) / 2)`, the remainder goes right. Text longer
/// than `width` is returned unchanged.
///
/// ```
/// use walkbass::tab::center;
///
/// assert_eq!(center("7", 6, '-'), "--7---");
/// assert_eq!(center("12", 6, '-'), "--12--");
/// assert_eq!(center("12", 5, '-'), "-12--");
/// ```
pub fn center(text: &str, width: usize, filler: char) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len) - left;

    let mut out = String::with_capacity(width.max(len));
    out.extend(std::iter::repeat(filler).take(left));
    out.push_str(text);
    out.extend(std::iter::repeat(filler).take(right));
    out
}

/// Build tab columns for `positions`.
///
/// Measures run from the lowest measure seen to `max(measure_count, highest measure seen)`,
/// cut off after [`MAX_MEASURES`] measures. Returns no columns when `positions` is empty.
pub fn render_columns(
    positions: &[FretPosition],
    measure_count: u32,
    slot_width: usize,
) -> Vec<TabColumn> {
    let (Some(first), Some(last)) = (
        positions.iter().map(|p| p.measure).min(),
        positions.iter().map(|p| p.measure).max(),
    ) else {
        return Vec::new();
    };
    let last = last
        .max(measure_count)
        .min(first.saturating_add(MAX_MEASURES - 1));

    // First position wins for a given (measure, beat, string)
    let mut lookup: HashMap<(u32, u32, usize), i32> = HashMap::new();
    for p in positions {
        lookup.entry((p.measure, p.beat, p.string)).or_insert(p.fret);
    }

    let mut columns = vec![TabColumn::header()];
    columns.push(TabColumn::bar_line(first));

    for measure in first..=last {
        for beat in 1..=BEATS_PER_MEASURE {
            columns.push(content_column(&lookup, measure, beat, slot_width));
        }
        columns.push(TabColumn::bar_line(measure));
    }

    columns
}

fn content_column(
    lookup: &HashMap<(u32, u32, usize), i32>,
    measure: u32,
    beat: u32,
    slot_width: usize,
) -> TabColumn {
    let frets: [Option<String>; STRING_COUNT] =
        std::array::from_fn(|string| lookup.get(&(measure, beat, string)).map(i32::to_string));

    // Widen the whole column if a fret number does not fit the slot
    let width = frets
        .iter()
        .flatten()
        .map(|text| text.chars().count())
        .fold(slot_width, usize::max);

    TabColumn {
        cells: frets.map(|fret| center(fret.as_deref().unwrap_or(""), width, FILLER)),
        measure,
        beat,
        duration: 1.0,
        kind: ColumnKind::Content,
    }
}

/// Join columns into one line per string, G string on top.
pub fn render_text(columns: &[TabColumn]) -> String {
    if columns.is_empty() {
        return EMPTY_TAB.to_string();
    }

    let mut out = String::new();
    for string in (0..STRING_COUNT).rev() {
        for column in columns {
            out.push_str(&column.cells[string]);
        }
        out.push('\n');
    }
    out
}

/// Beat numbers centered under each content column, trailing spaces trimmed.
pub fn render_beat_row(columns: &[TabColumn]) -> String {
    let mut row: String = columns
        .iter()
        .map(|column| match column.kind {
            ColumnKind::Content => center(&column.beat.to_string(), column.width(), ' '),
            ColumnKind::BarLine | ColumnKind::HeaderLine => " ".repeat(column.width()),
        })
        .collect();
    row.truncate(row.trim_end().len());
    row
}

/// [`render_text`] followed by a [`render_beat_row`] line.
pub fn render_text_with_beats(columns: &[TabColumn]) -> String {
    if columns.is_empty() {
        return EMPTY_TAB.to_string();
    }

    let mut out = render_text(columns);
    out.push_str(&render_beat_row(columns));
    out.push('\n');
    out
}
