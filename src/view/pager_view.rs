//! Drawing the visible lines and the status line
//!
//! Rendering is split in two: [`ViewSnapshot::capture`] reads everything it
//! needs out of the navigator (escaped, scrolled text plus flags), and
//! [`render`] draws a snapshot. The snapshot holds no references into the
//! window, so a frame never observes a half-updated buffer.

use super::display_text::{char_width, display_line};
use crate::chunk_reader::ChunkReader;
use crate::navigation::Navigator;
use crate::theme::Theme;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// A transient message shown in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Where the screen sits in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The whole file is on screen
    All,
    Top,
    Bottom,
    /// Percentage of the file (by bytes) up to the end of the highlighted line
    Percent(u8),
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::All => write!(f, "ALL"),
            Position::Top => write!(f, "TOP"),
            Position::Bottom => write!(f, "BOT"),
            Position::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// Display-ready text of the visible lines, top to bottom
    pub lines: Vec<String>,

    /// Row of the highlighted line within `lines`
    pub highlight_row: Option<usize>,

    /// The first resident line starts at byte 0
    pub show_top_marker: bool,

    /// The last resident line ends at the known file size
    pub show_bottom_marker: bool,

    pub file_name: String,

    /// Byte offset of the highlighted line
    pub offset: Option<u64>,

    pub position: Position,
    pub following: bool,
    pub message: Option<StatusMessage>,
}

impl ViewSnapshot {
    pub fn capture<R: ChunkReader>(
        nav: &Navigator<R>,
        file_name: &str,
        tab_width: usize,
        following: bool,
        message: Option<&StatusMessage>,
    ) -> Self {
        let window = nav.window();
        let viewport = nav.viewport();
        let cursor = nav.cursor();
        let width = viewport.width as usize;

        let lines: Vec<String> = window
            .range(cursor.top, nav.page_size())
            .map(|record| display_line(&record.text, viewport.left_column, width, tab_width))
            .collect();

        let highlight_row = viewport
            .line_to_screen_row(cursor.top, cursor.highlight)
            .map(usize::from)
            .filter(|row| *row < lines.len());

        let show_top_marker = window.first().map_or(true, |first| first.start == 0);
        let show_bottom_marker = window.at_end();
        let highlighted = window.get(cursor.highlight);

        let at_top = show_top_marker && cursor.top == 0;
        let at_bottom = show_bottom_marker && cursor.top + nav.page_size() >= window.len();
        let position = match (at_top, at_bottom) {
            (true, true) => Position::All,
            (true, false) => Position::Top,
            (false, true) => Position::Bottom,
            (false, false) => {
                let end = highlighted.map_or(0, |record| record.end);
                let size = window.file_size().max(1);
                Position::Percent((end.saturating_mul(100) / size).min(100) as u8)
            }
        };

        Self {
            lines,
            highlight_row,
            show_top_marker,
            show_bottom_marker,
            file_name: file_name.to_string(),
            offset: highlighted.map(|record| record.start),
            position,
            following,
            message: message.cloned(),
        }
    }

    fn location_text(&self) -> String {
        let mut text = format!(" {}", self.file_name);
        if let Some(offset) = self.offset {
            text.push_str(&format!("  byte {}", offset));
        }
        text
    }

    /// A file boundary is on screen
    fn at_boundary(&self) -> bool {
        !matches!(self.position, Position::Percent(_))
    }
}

const FOLLOW_TAG: &str = "  [FOLLOW]";

/// Draw `snapshot` into `area`: file lines on top, one status row below
pub fn render(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let [content_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    render_lines(frame, content_area, snapshot, theme);
    render_status(frame, status_area, snapshot, theme);
}

fn render_lines(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot, theme: &Theme) {
    let normal = Style::default().fg(theme.text_fg).bg(theme.text_bg);
    let highlight = Style::default()
        .fg(theme.highlight_fg)
        .bg(theme.highlight_bg);
    let width = area.width as usize;

    let lines: Vec<Line> = snapshot
        .lines
        .iter()
        .enumerate()
        .map(|(row, text)| {
            if snapshot.highlight_row == Some(row) {
                // Pad so the highlight spans the full row.
                let used: usize = text.chars().map(char_width).sum();
                let padded = format!("{}{}", text, " ".repeat(width.saturating_sub(used)));
                Line::from(Span::styled(padded, highlight))
            } else {
                Line::from(Span::styled(text.clone(), normal))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(normal), area);
}

fn render_status(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot, theme: &Theme) {
    let base = Style::default()
        .fg(theme.status_bar_fg)
        .bg(theme.status_bar_bg);

    let position_style = if snapshot.at_boundary() {
        base.fg(theme.marker_fg)
    } else {
        base
    };
    let mut spans = vec![
        Span::styled(snapshot.location_text(), base),
        Span::styled(format!("  {}", snapshot.position), position_style),
    ];
    if snapshot.following {
        spans.push(Span::styled(
            FOLLOW_TAG,
            base.fg(theme.follow_fg).add_modifier(Modifier::BOLD),
        ));
    }

    match &snapshot.message {
        Some(StatusMessage::Info(msg)) => {
            spans.push(Span::styled(format!("  {}", msg), base));
        }
        Some(StatusMessage::Error(msg)) => {
            spans.push(Span::styled(
                format!("  {}", msg),
                base.fg(theme.status_error_fg).add_modifier(Modifier::BOLD),
            ));
        }
        None => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}
