//! Scan state over a sentinel-terminated buffer.
//!
//! A token occupies `begin..end`. The tokenizer moves `end` while it
//! classifies a token and only [`Cursor::accept`] commits it by moving
//! `begin` forward, so a caller can inspect a token before deciding to
//! consume it. `line` counts line breaks consumed so far (starting at 1)
//! and `head_line` remembers where the current line began, for error
//! snippets.
//!
//! Reads past the sentinel return `0x00`: the lookahead used by the
//! tokenizer is never more than a few bytes, and the cache-line padding of
//! [`SourceBuffer`](crate::SourceBuffer) covers it, but `byte()` clamps
//! regardless so arbitrary positions are safe.

/// Scan position and line bookkeeping.
///
/// [`Copy`] so that callers can snapshot and restore state cheaply.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    source_len: u32,
    begin: u32,
    end: u32,
    line: u32,
    head_line: u32,
}

/// &[u8] = 16, five u32 = 20 => 40 bytes after alignment.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 40);

impl<'a> Cursor<'a> {
    /// Create a cursor at byte 0, line 1.
    ///
    /// `buf[source_len]` must be `0x00`; `SourceBuffer::new` guarantees it.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            source_len,
            begin: 0,
            end: 0,
            line: 1,
            head_line: 0,
        }
    }

    /// The byte at `pos`, or `0x00` at and beyond the sentinel.
    #[inline]
    pub fn byte(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Start of the current token.
    #[inline]
    pub fn begin(&self) -> u32 {
        self.begin
    }

    /// One past the last byte of the current token.
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    #[inline]
    pub fn set_begin(&mut self, pos: u32) {
        self.begin = pos;
    }

    #[inline]
    pub fn set_end(&mut self, pos: u32) {
        self.end = pos;
    }

    /// Commit the current token: the next scan starts where it ended.
    #[inline]
    pub fn accept(&mut self) {
        self.begin = self.end;
    }

    /// Current 1-based line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn add_lines(&mut self, count: u32) {
        self.line += count;
    }

    #[inline]
    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    /// Offset at which the current line starts.
    #[inline]
    pub fn head_line(&self) -> u32 {
        self.head_line
    }

    #[inline]
    pub fn set_head_line(&mut self, pos: u32) {
        self.head_line = pos;
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// True once `begin` sits on the end-of-input byte.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.byte(self.begin) == 0
    }

    /// Source content without sentinel or padding.
    pub fn source_bytes(&self) -> &'a [u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Bytes `start..end`, clamped to the source content.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        let len = self.source_len;
        let start = start.min(len) as usize;
        let end = end.min(len) as usize;
        if start >= end {
            return &[];
        }
        &self.buf[start..end]
    }

    /// The bytes of the current token.
    pub fn token_bytes(&self) -> &'a [u8] {
        self.slice(self.begin, self.end)
    }

    /// Position of the first LF, CR, or NUL at or after `pos`.
    ///
    /// Returns `source_len` when the rest of the source has no line break.
    pub fn line_end_from(&self, pos: u32) -> u32 {
        let rest = self.slice(pos, self.source_len);
        match memchr::memchr3(b'\n', b'\r', 0, rest) {
            #[allow(clippy::cast_possible_truncation, reason = "rest.len() <= u32::MAX")]
            Some(offset) => pos + offset as u32,
            None => self.source_len.max(pos),
        }
    }

    /// Text of the line starting at `from`, with leading space skipped,
    /// up to (not including) the next line break.
    pub fn line_text(&self, from: u32) -> &'a [u8] {
        let mut start = from;
        while start < self.source_len && crate::lex_class::is_space(self.byte(start)) {
            start += 1;
        }
        self.slice(start, self.line_end_from(start))
    }
}

#[cfg(test)]
mod tests;
