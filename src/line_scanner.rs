//! Lazy line discovery over byte ranges of the paged file
//!
//! Lines are only ever split at `\n` bytes and decoded whole. Since `\n`
//! never occurs inside a multi-byte UTF-8 sequence, a character that
//! straddles a chunk seam simply stays in the pending bytes until its line
//! is complete; nothing is decoded from a partial sequence.

use crate::chunk_reader::ChunkReader;
use std::io;

/// Default size of a single read issued by the scanner
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// One line of the file together with the byte range it occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Line content without the terminating newline
    pub text: String,

    /// Offset of the first byte of the line
    pub start: u64,

    /// Offset of the first byte after the line's terminator
    /// (or the end of the data for an unterminated last line)
    pub end: u64,

    /// Whether the line ended with `\n` when it was scanned
    pub terminated: bool,
}

impl LineRecord {
    fn from_bytes(bytes: &[u8], start: u64, end: u64, terminated: bool) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
            start,
            end,
            terminated,
        }
    }
}

/// Split `bytes` (which begin at file offset `base`) into complete lines.
///
/// Returns the terminated lines found and how many bytes they consumed;
/// anything after the last newline is left for the caller.
pub fn split_lines(bytes: &[u8], base: u64) -> (Vec<LineRecord>, usize) {
    let mut records = Vec::new();
    let mut line_start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'\n' {
            continue;
        }
        records.push(LineRecord::from_bytes(
            &bytes[line_start..i],
            base + line_start as u64,
            base + i as u64 + 1,
            true,
        ));
        line_start = i + 1;
    }

    (records, line_start)
}

/// Split `bytes` into lines, treating the end of the slice as the end of
/// the data: trailing bytes without a newline become an unterminated line.
pub fn split_all(bytes: &[u8], base: u64) -> Vec<LineRecord> {
    let (mut records, consumed) = split_lines(bytes, base);
    if consumed < bytes.len() {
        records.push(LineRecord::from_bytes(
            &bytes[consumed..],
            base + consumed as u64,
            base + bytes.len() as u64,
            false,
        ));
    }
    records
}

/// Split the lines of `bytes` whose start is known when scanning backward.
///
/// `bytes` begin at offset `base` and end at a line boundary. Everything up
/// to and including the first newline may belong to a line that started in
/// an earlier chunk, so it is returned as a head length for the caller to
/// prepend to the next (earlier) read. The lines after it are returned in
/// ascending order.
pub fn split_backward(bytes: &[u8], base: u64) -> (Vec<LineRecord>, usize) {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(first_newline) => {
            let head = first_newline + 1;
            (split_all(&bytes[head..], base + head as u64), head)
        }
        None => (Vec::new(), bytes.len()),
    }
}

/// Scan forward from `start` until at least `min_lines` complete lines have
/// been found or `file_size` is reached.
///
/// A fragment left at `file_size` without a newline becomes a final,
/// unterminated record. A fragment left when the scan stops early is
/// dropped; the next scan starts at the last returned record's `end`.
pub fn scan_forward<R: ChunkReader + ?Sized>(
    reader: &mut R,
    start: u64,
    min_lines: usize,
    file_size: u64,
    chunk_size: usize,
) -> io::Result<Vec<LineRecord>> {
    let min_lines = min_lines.max(1);
    let chunk_size = chunk_size.max(1);

    let mut records = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut pending_start = start;
    let mut pos = start;

    while pos < file_size {
        let want = chunk_size.min((file_size - pos) as usize);
        let chunk = reader.read_at(pos, want)?;
        if chunk.is_empty() {
            // The file got shorter than we were told; whatever we have is all there is.
            break;
        }
        pos += chunk.len() as u64;
        pending.extend_from_slice(&chunk);

        let (lines, consumed) = split_lines(&pending, pending_start);
        records.extend(lines);
        pending.drain(..consumed);
        pending_start += consumed as u64;

        if records.len() >= min_lines {
            return Ok(records);
        }
    }

    records.extend(split_all(&pending, pending_start));
    Ok(records)
}

/// Scan backward from `end` toward offset 0 until at least `min_lines`
/// complete lines have been found or the start of the file is reached.
///
/// `end` must be a line boundary (0, a line start, or the file size).
/// Records are returned in ascending offset order.
pub fn scan_backward<R: ChunkReader + ?Sized>(
    reader: &mut R,
    end: u64,
    min_lines: usize,
    chunk_size: usize,
) -> io::Result<Vec<LineRecord>> {
    let min_lines = min_lines.max(1);
    let chunk_size = chunk_size.max(1);

    // Each batch is ascending; batches are collected newest-first.
    let mut batches: Vec<Vec<LineRecord>> = Vec::new();
    let mut found = 0;
    let mut pending: Vec<u8> = Vec::new();
    let mut pos = end;

    while pos > 0 {
        let want = chunk_size.min(pos as usize);
        let from = pos - want as u64;
        let mut chunk = reader.read_at(from, want)?;
        if chunk.len() < want {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file shrank below offset {} during backward scan", pos),
            ));
        }
        pos = from;
        chunk.extend_from_slice(&pending);
        pending = chunk;

        if pos == 0 {
            break;
        }

        let (lines, head) = split_backward(&pending, pos);
        pending.truncate(head);
        found += lines.len();
        batches.push(lines);

        if found >= min_lines {
            break;
        }
    }

    if pos == 0 && !pending.is_empty() {
        batches.push(split_all(&pending, 0));
    }

    Ok(batches.into_iter().rev().flatten().collect())
}
