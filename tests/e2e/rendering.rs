use crate::common::fixtures::TestFixture;
use crate::common::harness::PagerTestHarness;
use crossterm::event::KeyCode;
use fresh_pager::PagerError;

#[test]
fn test_initial_screen() {
    let fixture = TestFixture::numbered_log("app.log", 100).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 6).unwrap();
    harness.render();

    for row in 0..5 {
        assert_eq!(harness.screen_row(row), format!("line {row}"));
    }
    let status = harness.status_line();
    assert!(status.contains("app.log"), "status: {status}");
    assert!(status.contains("byte 0"), "status: {status}");
    assert!(status.contains("TOP"), "status: {status}");
}

#[test]
fn test_status_shows_percentage() {
    let content: String = (0..1000).map(|i| format!("row {i:05}\n")).collect();
    let fixture = TestFixture::new("rows.log", &content).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 11).unwrap();

    for _ in 0..10 {
        harness.press(KeyCode::PageDown);
    }
    assert_eq!(harness.highlighted_text().as_deref(), Some("row 00100"));
    let status = harness.status_line();
    assert!(status.contains("byte 1000"), "status: {status}");
    assert!(status.contains("10%"), "status: {status}");
}

#[test]
fn test_horizontal_scroll() {
    let fixture = TestFixture::new("wide.log", "0123456789abcdefghij\n").unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 4).unwrap();

    harness.press(KeyCode::Right);
    assert_eq!(harness.screen_row(0), "56789abcdefghij");
    harness.press(KeyCode::Left);
    harness.press(KeyCode::Left);
    assert_eq!(harness.screen_row(0), "0123456789abcdefghij");
}

#[test]
fn test_long_lines_cut_at_width() {
    let fixture = TestFixture::new("long.log", &format!("{}\n", "y".repeat(100))).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 20, 4).unwrap();
    harness.render();
    assert_eq!(harness.screen_row(0), "y".repeat(20));
}

#[test]
fn test_control_characters_escaped() {
    let fixture = TestFixture::new("ctl.log", "\u{1b}[31mred\u{1b}[0m\tend\n").unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 4).unwrap();
    harness.render();
    assert_eq!(harness.screen_row(0), "^[[31mred^[[0m  end");
}

#[test]
fn test_empty_file() {
    let fixture = TestFixture::empty("empty.log").unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 4).unwrap();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::End);
    assert_eq!(harness.screen_row(0), "");
    assert!(harness.status_line().contains("ALL"));
    assert_eq!(harness.highlighted_text(), None);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PagerTestHarness::open(&dir.path().join("nope.log"), 40, 4);
    assert!(matches!(result, Err(PagerError::FileOpen { .. })));
}
