use crate::common::fixtures::{big_log_line, TestFixture, BIG_LOG_LINES};
use crate::common::harness::PagerTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use fresh_pager::config::Config;

fn small_buffer_config(max_line_buffer: usize) -> Config {
    let mut config = Config::default();
    config.pager.max_line_buffer = max_line_buffer;
    config
}

/// Jumping to either end of a large log keeps the buffer bounded
#[test]
fn test_big_log_jump_to_end_and_back() {
    let path = TestFixture::big_log().unwrap();
    let mut harness =
        PagerTestHarness::with_config(&path, small_buffer_config(2000), 100, 25).unwrap();

    harness.press(KeyCode::End);
    assert_eq!(
        harness.highlighted_text(),
        Some(big_log_line(BIG_LOG_LINES - 1))
    );
    assert!(harness.resident_lines() <= 2000);
    assert!(harness.status_line().contains("BOT"));

    harness.press(KeyCode::Home);
    assert_eq!(harness.highlighted_text(), Some(big_log_line(0)));
    assert!(harness.resident_lines() <= 2000);
    assert!(harness.status_line().contains("TOP"));
}

/// Paging deep into a file and back again with a tiny buffer
#[test]
fn test_big_log_paging_keeps_buffer_bounded() {
    let path = TestFixture::big_log().unwrap();
    let mut harness =
        PagerTestHarness::with_config(&path, small_buffer_config(100), 100, 11).unwrap();

    for _ in 0..100 {
        harness.press(KeyCode::PageDown);
        assert!(harness.resident_lines() <= 100);
    }
    assert_eq!(harness.highlighted_text(), Some(big_log_line(1000)));

    for _ in 0..100 {
        harness.press(KeyCode::PageUp);
        assert!(harness.resident_lines() <= 100);
    }
    assert_eq!(harness.highlighted_text(), Some(big_log_line(0)));
}

/// A screen taller than the line cap still pages onto the right line
#[test]
fn test_page_down_with_screen_taller_than_buffer() {
    let path = TestFixture::big_log().unwrap();
    let mut harness =
        PagerTestHarness::with_config(&path, small_buffer_config(100), 100, 151).unwrap();

    for page in 1..=3 {
        harness.press(KeyCode::PageDown);
        assert_eq!(harness.highlighted_text(), Some(big_log_line(page * 150)));
        assert!(harness.resident_lines() <= 150);
    }

    harness.assert_screen_contains(&big_log_line(450));
    assert!(!harness.screen_row(149).is_empty());
}

/// Scrolling up from the end reads backward through the file
#[test]
fn test_big_log_scroll_up_from_end() {
    let path = TestFixture::big_log().unwrap();
    let mut harness =
        PagerTestHarness::with_config(&path, small_buffer_config(500), 100, 11).unwrap();

    harness.press(KeyCode::End);
    for _ in 0..1500 {
        harness.press(KeyCode::Up);
    }
    assert_eq!(
        harness.highlighted_text(),
        Some(big_log_line(BIG_LOG_LINES - 1501))
    );
    assert!(harness.resident_lines() <= 500);
}

#[test]
fn test_vim_keys() {
    let fixture = TestFixture::numbered_log("app.log", 100).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();

    for _ in 0..3 {
        harness.press(KeyCode::Char('j'));
    }
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 3"));
    harness.press(KeyCode::Char('k'));
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 2"));

    harness.send_key(KeyCode::Char('G'), KeyModifiers::SHIFT);
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 99"));
    harness.press(KeyCode::Char('b'));
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 88"));
    harness.press(KeyCode::Char(' '));
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 99"));
    harness.press(KeyCode::Char('g'));
    assert_eq!(harness.highlighted_text().as_deref(), Some("line 0"));
}

#[test]
fn test_resize_keeps_highlight_visible() {
    let fixture = TestFixture::numbered_log("app.log", 100).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    for _ in 0..10 {
        harness.press(KeyCode::Down);
    }
    harness.assert_screen_contains("line 10");

    harness.resize(40, 4);
    harness.assert_screen_contains("line 10");
    assert_eq!(harness.screen_row(2), "line 10");

    harness.resize(40, 30);
    harness.assert_screen_contains("line 10");
    harness.assert_screen_contains("line 36");
}

#[test]
fn test_quit() {
    let fixture = TestFixture::numbered_log("app.log", 5).unwrap();
    let mut harness = PagerTestHarness::open(&fixture.path, 40, 12).unwrap();
    assert!(!harness.pager().should_quit());
    harness.press(KeyCode::Char('q'));
    assert!(harness.pager().should_quit());
}
