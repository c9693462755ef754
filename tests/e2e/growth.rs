use crate::common::fixtures::{numbered_lines, TestFixture};
use crate::common::harness::PagerTestHarness;
use crossterm::event::KeyCode;

/// Lines appended while the last line is highlighted are pulled in and the
/// highlight moves onto the newest one.
#[test]
fn test_follow_appended_lines() {
    let fixture = TestFixture::numbered_log("app.log", 10).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    harness.press(KeyCode::End);
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 9"));

    fixture.append(&numbered_lines(10..13)).unwrap();
    assert!(harness.check_file_growth());

    assert_eq!(harness.highlighted_text().as_deref(), Some("line 12"));
    harness.assert_screen_contains("line 12");
    assert!(harness.status_line().contains("[FOLLOW]"));
}

/// Each of several appends is followed in turn
#[test]
fn test_follow_repeated_appends() {
    let fixture = TestFixture::numbered_log("app.log", 3).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    harness.press(KeyCode::End);

    for i in 3..8 {
        fixture.append(&format!("line {i}\n")).unwrap();
        assert!(harness.check_file_growth());
        assert_eq!(harness.highlighted_text(), Some(format!("line {i}")));
    }
    assert!(!harness.check_file_growth());
}

/// Reading far from the bottom, growth only updates the known size; the
/// new lines show up once the user goes to the end.
#[test]
fn test_scrolled_away_does_not_follow() {
    let fixture = TestFixture::numbered_log("app.log", 500).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    harness.render();

    fixture.append(&numbered_lines(500..505)).unwrap();
    assert!(harness.check_file_growth());

    assert_eq!(harness.highlighted_text().as_deref(), Some("line 0"));
    assert_eq!(harness.screen_row(0), "line 0");
    assert!(!harness.status_line().contains("[FOLLOW]"));

    harness.press(KeyCode::End);
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 504"));
}

/// A file that shrinks (rotated or truncated) is re-read from the start
#[test]
fn test_truncation_reloads_from_start() {
    let fixture = TestFixture::numbered_log("app.log", 1000).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    for _ in 0..3 {
        harness.press(KeyCode::PageDown);
    }
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 33"));

    fixture.rewrite("rotated 0\nrotated 1\n").unwrap();
    assert!(harness.check_file_growth());

    assert_eq!(harness.screen_row(0), "rotated 0");
    assert_eq!(harness.screen_row(1), "rotated 1");
    assert_eq!(harness.highlighted_text().as_deref(), Some("rotated 0"));
    assert!(harness.status_line().contains("truncated"));
    assert_eq!(harness.resident_lines(), 2);
}

/// Text appended to an unterminated last line joins that line
#[test]
fn test_partial_line_is_completed() {
    let fixture = TestFixture::new("app.log", "first\nsecond par").unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    harness.press(KeyCode::End);
    assert_eq!(harness.highlighted_text().as_deref(), Some("second par"));

    fixture.append("tial\nthird\n").unwrap();
    assert!(harness.check_file_growth());

    assert_eq!(harness.screen_row(0), "first");
    assert_eq!(harness.screen_row(1), "second partial");
    assert_eq!(harness.screen_row(2), "third");
    assert_eq!(harness.resident_lines(), 3);
}

/// An empty file starts showing lines as soon as they are written
#[test]
fn test_empty_file_then_growth() {
    let fixture = TestFixture::empty("app.log").unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    harness.render();
    assert!(harness.status_line().contains("ALL"));

    fixture.append("hello\nworld\n").unwrap();
    assert!(harness.check_file_growth());
    harness.assert_screen_contains("hello");
    assert_eq!(harness.highlighted_text().as_deref(), Some("world"));
}
