use chrono::{TimeZone, Utc};
use oozie_sync_core::{PassStage, Watermark};
use pretty_assertions::assert_eq;

#[test]
fn beginning_is_start_of_2000() {
    assert_eq!(Watermark::beginning().to_marker_text(), "2000-01-01T00:00:00Z");
}

#[test]
fn advance_never_moves_backwards() {
    let start = Watermark::at(Utc.with_ymd_and_hms(2023, 7, 1, 12, 0, 0).unwrap());
    let earlier = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2023, 7, 2, 0, 0, 0).unwrap();

    assert_eq!(start.advance(earlier), start);
    assert_eq!(start.advance(later).instant(), later);
    assert_eq!(start.advance_all(Vec::new()), start);
}

#[test]
fn advance_all_picks_maximum_of_out_of_order_instants() {
    let start = Watermark::beginning();
    let instants = [
        Utc.with_ymd_and_hms(2023, 7, 3, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 7, 5, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 7, 4, 0, 0, 0).unwrap(),
    ];
    assert_eq!(start.advance_all(instants).instant(), instants[1]);
}

#[test]
fn marker_text_parses_back_and_tolerates_whitespace() {
    let watermark = Watermark::at(Utc.with_ymd_and_hms(2023, 7, 1, 8, 30, 5).unwrap());
    let text = watermark.to_marker_text();
    assert_eq!(text, "2023-07-01T08:30:05Z");
    assert_eq!(Watermark::parse_marker_text(&format!("{text}\n")).unwrap(), watermark);
}

#[test]
fn marker_text_with_offset_is_normalised() {
    let parsed = Watermark::parse_marker_text("2023-07-01T10:30:05+02:00").unwrap();
    assert_eq!(parsed.to_marker_text(), "2023-07-01T08:30:05Z");
}

#[test]
fn garbage_marker_text_is_rejected() {
    let err = Watermark::parse_marker_text("2023-07-01T08:3").unwrap_err();
    assert_eq!(err.text, "2023-07-01T08:3");
    assert!(Watermark::parse_marker_text("").is_err());
}

#[test]
fn stages_follow_the_fixed_order() {
    let mut walked = vec![PassStage::Init];
    let mut stage = PassStage::Init;
    while let Some(next) = stage.next() {
        walked.push(next);
        stage = next;
    }
    assert_eq!(walked, PassStage::ORDER.to_vec());
    assert_eq!(PassStage::FilterAndEmit.to_string(), "filter and emit");
}
