use super::*;
use crate::fretboard::map_to_positions;
use crate::tab::{render_columns, ColumnKind};
use crate::{generate_notes, BassError, Chord, Pitch};

fn pitch(midi: i32, measure: u32, beat: u32) -> Pitch {
    Pitch {
        midi,
        measure,
        beat,
        duration: 1.0,
    }
}

#[test]
fn test_column_index_formula() {
    assert_eq!(column_index(1, 1), 2);
    assert_eq!(column_index(1, 4), 5);
    assert_eq!(column_index(2, 1), 7);
    assert_eq!(column_index(2, 3), 1 + 5 + 1 + 2);
    assert_eq!(column_index(3, 4), 15);
}

#[test]
fn test_playback_basic_timing() {
    let records = to_playback_sequence(&[pitch(36, 1, 1), pitch(40, 1, 2), pitch(43, 2, 3)], 120.0)
        .unwrap();

    assert_eq!(records[0].time, 0.0);
    assert_eq!(records[0].duration, 0.5);
    assert_eq!(records[1].time, 0.5);
    // (1 * 4 + 2) beats at half a second
    assert_eq!(records[2].time, 3.0);
    assert_eq!(records[2].column_index, 9);
    assert_eq!(records[2].midi, 43);
}

#[test]
fn test_playback_at_sixty_bpm() {
    let records = to_playback_sequence(&[pitch(36, 3, 4)], 60.0).unwrap();
    assert_eq!(records[0].time, 11.0);
    assert_eq!(records[0].duration, 1.0);
}

#[test]
fn test_invalid_tempo() {
    for bpm in [0.0, -120.0, f64::NAN, f64::INFINITY] {
        let result = to_playback_sequence(&[pitch(36, 1, 1)], bpm);
        assert!(matches!(result, Err(BassError::InvalidTempo(_))), "bpm {}", bpm);
    }
}

#[test]
fn test_empty_sequence() {
    assert!(to_playback_sequence(&[], 120.0).unwrap().is_empty());
}

#[test]
fn test_column_index_points_at_content_column() {
    let chords = vec![
        Chord::parse("2m7", 1).unwrap(),
        Chord::parse("57", 2).unwrap(),
        Chord::parse("1maj7", 3).unwrap(),
    ];
    let notes = generate_notes(&chords, "C").unwrap();
    let columns = render_columns(&map_to_positions(&notes), 3, 6);

    for record in to_playback_sequence(&notes, 100.0).unwrap() {
        let column = &columns[record.column_index];
        assert_eq!(column.kind, ColumnKind::Content);
        let fret_cells = column.cells.iter().filter(|c| c.contains(char::is_numeric));
        assert_eq!(fret_cells.count(), 1);
    }
}

#[test]
fn test_json_shape() {
    let records = to_playback_sequence(&[pitch(38, 2, 3)], 120.0).unwrap();
    let json = serde_json::to_string(&records[0]).unwrap();
    assert_eq!(json, r#"{"midi":38,"time":3.0,"duration":0.5,"columnIndex":9}"#);
}
