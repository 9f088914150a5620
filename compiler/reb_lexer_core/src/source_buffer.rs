//! Sentinel-terminated source buffer.
//!
//! The scanner treats a `0x00` byte as end-of-input, so the buffer always
//! carries a `0x00` sentinel after the source bytes. The total size is
//! rounded up to the next 64-byte boundary, which leaves zero padding for
//! the tokenizer's short lookahead reads (`cp[1]`..`cp[3]`) near the end.
//!
//! A leading UTF-8 byte order mark is measured here and skipped by the
//! scanner entry points. A NUL before the sentinel is not end of input:
//! the tokenizer reports it as a malformed token.

use crate::Cursor;

/// Allocation granularity; keeps a few zero bytes past the sentinel.
const PAD_TO: usize = 64;

/// Script bytes followed by a NUL sentinel and zero padding.
///
/// ```text
/// [script..., 0x00, 0x00...]
///             ^ source_len
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
    bom_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded buffer. UTF-8 is not validated here;
    /// bad sequences surface as malformed tokens. Input past `u32::MAX`
    /// bytes is ignored.
    pub fn new(source: &[u8]) -> Self {
        let source_len_u32 = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let source = &source[..source_len_u32 as usize];
        let source_len = source.len();

        let padded_len = (source_len + 1 + PAD_TO - 1) & !(PAD_TO - 1);

        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let bom_len = if source.starts_with(&[0xEF, 0xBB, 0xBF]) { 3 } else { 0 };

        Self {
            buf,
            source_len: source_len_u32,
            bom_len,
        }
    }

    /// The script bytes alone.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Script bytes, sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Cursor at byte 0, line 1. Scanners start after [`Self::bom_len`].
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Number of leading bytes taken by a UTF-8 byte order mark (0 or 3).
    pub fn bom_len(&self) -> u32 {
        self.bom_len
    }
}
