//! The bounded, contiguous window of materialized lines
//!
//! Logical indices handed out by the window are relative to its current
//! contents: prepending lines or pruning from the front moves every index.
//! Operations that can do so report the movement as [`Growth::shift`] and
//! keep the [`Cursor`] pointing at the same records.

use crate::chunk_reader::ChunkReader;
use crate::error::Result;
use crate::line_scanner::{scan_backward, scan_forward, LineRecord};
use std::collections::VecDeque;

/// Default cap on the number of resident lines
pub const DEFAULT_MAX_LINE_BUFFER: usize = 10_000;

/// Selected line and first visible line, as logical window indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub highlight: usize,
    pub top: usize,
}

/// Result of a single grow operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Growth {
    /// Records produced by the scan (a rescanned partial last line counts)
    pub scanned: usize,

    /// How far logical indices of records already in the window moved
    pub shift: isize,
}

/// Sliding buffer of [`LineRecord`]s over a single file
pub struct LineWindow<R: ChunkReader> {
    reader: R,
    records: VecDeque<LineRecord>,
    cursor: Cursor,
    file_size: u64,
    max_lines: usize,
    chunk_size: usize,
}

impl<R: ChunkReader> LineWindow<R> {
    /// Create an empty window over `reader`, recording its current size
    pub fn new(mut reader: R, max_lines: usize, chunk_size: usize) -> Result<Self> {
        let file_size = reader.size()?;
        Ok(Self {
            reader,
            records: VecDeque::new(),
            cursor: Cursor::default(),
            file_size,
            max_lines: max_lines.max(1),
            chunk_size: chunk_size.max(1),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineRecord> {
        self.records.get(index)
    }

    pub fn first(&self) -> Option<&LineRecord> {
        self.records.front()
    }

    pub fn last(&self) -> Option<&LineRecord> {
        self.records.back()
    }

    /// Records `[from, from + count)`, cut short at the end of the window
    pub fn range(&self, from: usize, count: usize) -> impl Iterator<Item = &LineRecord> {
        let start = from.min(self.records.len());
        let end = from.saturating_add(count).min(self.records.len());
        self.records.range(start..end)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Raise the cap to at least `lines`, so one screen of lines always fits
    pub fn reserve(&mut self, lines: usize) {
        if lines > self.max_lines {
            tracing::debug!("line cap raised from {} to {}", self.max_lines, lines);
            self.max_lines = lines;
        }
    }

    /// Last observed size of the file
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn set_file_size(&mut self, size: u64) {
        self.file_size = size;
    }

    /// Re-stat the file without touching the window
    pub fn stat(&mut self) -> Result<u64> {
        Ok(self.reader.size()?)
    }

    /// Re-stat the file and remember the new size
    pub fn refresh_file_size(&mut self) -> Result<u64> {
        self.file_size = self.stat()?;
        Ok(self.file_size)
    }

    /// Whether the window begins at the start of the file
    pub fn at_start(&self) -> bool {
        match self.records.front() {
            Some(first) => first.start == 0,
            None => self.file_size == 0,
        }
    }

    /// Whether the window reaches the last observed end of the file
    pub fn at_end(&self) -> bool {
        match self.records.back() {
            Some(last) => last.end >= self.file_size,
            None => self.file_size == 0,
        }
    }

    /// Append at least `min_lines` lines after the window (fewer at EOF).
    ///
    /// An empty window is filled from offset 0. If the last record was an
    /// unterminated line and the file has grown since, that line is scanned
    /// again from its start so appended text joins it.
    pub fn grow_forward(&mut self, min_lines: usize) -> Result<Growth> {
        self.grow_forward_toward(min_lines, None)
    }

    /// `grow_forward`, pruning away from `focus` (an index into the grown
    /// window) instead of the highlight when given
    fn grow_forward_toward(&mut self, min_lines: usize, focus: Option<isize>) -> Result<Growth> {
        let scanned = self.extend_forward(min_lines)?;
        if scanned == 0 {
            return Ok(Growth::default());
        }

        let focus = focus.map_or(self.cursor.highlight, |f| f.max(0) as usize);
        let removed_front = self.prune_around(focus);
        Ok(Growth {
            scanned,
            shift: -(removed_front as isize),
        })
    }

    /// Append lines like [`grow_forward`](Self::grow_forward) and move the
    /// highlight onto the new last line before pruning, so the oldest
    /// records are the ones dropped.
    pub fn follow_forward(&mut self, min_lines: usize) -> Result<Growth> {
        let scanned = self.extend_forward(min_lines)?;
        if scanned == 0 {
            return Ok(Growth::default());
        }

        self.cursor.highlight = self.records.len() - 1;
        let removed_front = self.prune();
        Ok(Growth {
            scanned,
            shift: -(removed_front as isize),
        })
    }

    /// Scan past the last record and append the result without pruning.
    /// Returns the number of records added (a rescanned tail counts once).
    fn extend_forward(&mut self, min_lines: usize) -> Result<usize> {
        let (start, rescan_tail) = match self.records.back() {
            None => (0, false),
            Some(last) if last.end >= self.file_size => return Ok(0),
            Some(last) if !last.terminated => (last.start, true),
            Some(last) => (last.end, false),
        };
        if start >= self.file_size {
            return Ok(0);
        }

        let lines = scan_forward(
            &mut self.reader,
            start,
            min_lines,
            self.file_size,
            self.chunk_size,
        )?;
        if lines.is_empty() {
            return Ok(0);
        }
        if rescan_tail {
            self.records.pop_back();
        }

        let scanned = lines.len();
        tracing::debug!(
            "grow_forward: {} lines from offset {} (window {} -> {})",
            scanned,
            start,
            self.records.len(),
            self.records.len() + scanned
        );
        self.records.extend(lines);
        Ok(scanned)
    }

    /// Prepend at least `min_lines` lines before the window (fewer at BOF).
    ///
    /// An empty window is filled backward from the end of the file, with the
    /// cursor placed on the last line read.
    pub fn grow_backward(&mut self, min_lines: usize) -> Result<Growth> {
        self.grow_backward_toward(min_lines, None)
    }

    /// `grow_backward`, pruning away from `focus` (an index into the window
    /// as it was before the grow) instead of the highlight when given
    fn grow_backward_toward(&mut self, min_lines: usize, focus: Option<isize>) -> Result<Growth> {
        let end = match self.records.front() {
            None => self.file_size,
            Some(first) => first.start,
        };
        if end == 0 {
            return Ok(Growth::default());
        }

        let lines = scan_backward(&mut self.reader, end, min_lines, self.chunk_size)?;
        if lines.is_empty() {
            return Ok(Growth::default());
        }

        let scanned = lines.len();
        let was_empty = self.records.is_empty();
        tracing::debug!(
            "grow_backward: {} lines before offset {} (window {} -> {})",
            scanned,
            end,
            self.records.len(),
            self.records.len() + scanned
        );
        for line in lines.into_iter().rev() {
            self.records.push_front(line);
        }

        let prepended = if was_empty {
            let newest = self.records.len() - 1;
            self.cursor = Cursor {
                highlight: newest,
                top: newest,
            };
            0
        } else {
            self.cursor.highlight += scanned;
            self.cursor.top += scanned;
            scanned
        };

        let focus = focus.map_or(self.cursor.highlight, |f| {
            (f + prepended as isize).max(0) as usize
        });
        let removed_front = self.prune_around(focus);
        Ok(Growth {
            scanned,
            shift: prepended as isize - removed_front as isize,
        })
    }

    /// Trim the window back to `max_lines`, discarding the side farthest
    /// from the highlighted line. Returns how many records were removed
    /// from the front.
    ///
    /// With the highlight in the lower half, records go from the front and
    /// both cursor indices move down with them. Otherwise they go from the
    /// back and the cursor is left alone. The highlighted record itself is
    /// never removed; if the preferred side cannot give up enough records,
    /// the rest come from the other side.
    pub fn prune(&mut self) -> usize {
        self.prune_around(self.cursor.highlight)
    }

    /// Prune choosing the side by `focus` rather than the highlight.
    ///
    /// Records between the highlight and `focus` are kept when they fit in
    /// the cap. When they do not, `focus` wins: the window is kept around it
    /// and the highlight moves onto it.
    fn prune_around(&mut self, focus: usize) -> usize {
        let len = self.records.len();
        if len <= self.max_lines {
            return 0;
        }

        let excess = len - self.max_lines;
        let half = len / 2;
        let highlight = self.cursor.highlight.min(len - 1);
        let focus = focus.min(len - 1);
        let keeps_highlight = highlight.abs_diff(focus) < self.max_lines;
        let (lo, hi) = if keeps_highlight {
            (highlight.min(focus), highlight.max(focus))
        } else {
            (focus, focus)
        };

        let (front, back) = if focus >= half {
            let front = excess.min(lo);
            (front, excess - front)
        } else {
            let back = excess.min(len - 1 - hi);
            (excess - back, back)
        };

        self.records.drain(..front);
        self.records.truncate(self.records.len() - back);

        if keeps_highlight {
            if front > 0 {
                self.cursor.highlight = self.cursor.highlight.saturating_sub(front);
                self.cursor.top = self.cursor.top.saturating_sub(front);
            }
        } else {
            let highlight = focus - front;
            self.cursor = Cursor {
                highlight,
                top: self.cursor.top.saturating_sub(front).min(highlight),
            };
        }

        tracing::debug!(
            "prune: removed {} from front, {} from back, {} lines resident",
            front,
            back,
            self.records.len()
        );
        front
    }

    /// Make `index` a valid logical index if the file allows it.
    ///
    /// Grows backward for negative indices and forward for indices past the
    /// end, pruning away from `index` rather than the highlight. Returns
    /// `index` re-expressed against the window as it is after the call; it is
    /// still out of range only at a file boundary.
    pub fn ensure(&mut self, index: isize) -> Result<isize> {
        let mut target = index;

        while target < 0 && !self.records.is_empty() && !self.at_start() {
            let start_before = self.records.front().map(|r| r.start);
            let growth = self.grow_backward_toward(target.unsigned_abs(), Some(target))?;
            target += growth.shift;
            if growth.scanned == 0 || self.records.front().map(|r| r.start) == start_before {
                break;
            }
        }

        while target >= self.records.len() as isize && !self.at_end() {
            let end_before = self.records.back().map(|r| r.end);
            let needed = (target - self.records.len() as isize + 1) as usize;
            let growth = self.grow_forward_toward(needed, Some(target))?;
            target += growth.shift;
            // Pruning from the back can undo the growth; stop rather than spin.
            if growth.scanned == 0 || self.records.back().map(|r| r.end) == end_before {
                break;
            }
        }

        Ok(target)
    }

    /// Drop every record and zero the cursor
    pub fn reset(&mut self) {
        tracing::debug!("reset: dropping {} lines", self.records.len());
        self.records.clear();
        self.cursor = Cursor::default();
    }
}
