//! Locating a `REBOL [...]` header in arbitrary leading text.
//!
//! Scripts may start with any amount of prose, comments or shell lines.
//! The header is the word `REBOL` (any case) followed, possibly across
//! line breaks and comments, by `[`. A `[` just before `REBOL` makes the
//! whole script an embedded block such as `[REBOL [...] ...]`.

use reb_lexer_core::lex_class::is_space;
use reb_lexer_core::Cursor;
use tracing::trace;

/// How the header was introduced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeaderKind {
    /// `REBOL [`
    Header,
    /// `[REBOL [`
    Embedded,
}

/// A located header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeaderMatch {
    pub kind: HeaderKind,
    /// Start of the script proper: the `REBOL` word, or the `[` before it
    /// for an embedded header.
    pub offset: u32,
    /// Position of the `[` opening the header block.
    pub block: u32,
    /// Line of the header block's `[`.
    pub line: u32,
}

const REBOL: &[u8] = b"REBOL";

/// Find the header starting from the cursor's `begin`.
///
/// On success the cursor is left just inside the header block, with its
/// line count advanced past the skipped lines.
pub(crate) fn scan_head(cursor: &mut Cursor<'_>) -> Option<HeaderMatch> {
    let mut cp = cursor.begin();
    let mut line = cursor.line();
    let mut rebol: Option<u32> = None;
    let mut open: Option<u32> = None;

    loop {
        while is_space(cursor.byte(cp)) {
            cp += 1;
        }
        let b = cursor.byte(cp);
        match b {
            0 => return None,
            b'[' => {
                if let Some(word) = rebol {
                    let (kind, offset) = match open {
                        Some(bracket) => (HeaderKind::Embedded, bracket),
                        None => (HeaderKind::Header, word),
                    };
                    trace!(?kind, offset, block = cp, line, "header found");
                    cursor.set_begin(cp + 1);
                    cursor.set_end(cp + 1);
                    cursor.set_line(line);
                    return Some(HeaderMatch {
                        kind,
                        offset,
                        block: cp,
                        line,
                    });
                }
                trace!(pos = cp, "header candidate bracket");
                open = Some(cp);
                cp += 1;
                continue;
            }
            b'R' | b'r' if cursor.slice(cp, cp + 5).eq_ignore_ascii_case(REBOL) => {
                trace!(pos = cp, "header candidate word");
                rebol = Some(cp);
                cp += 5;
                continue;
            }
            b';' | b'\n' | b'\r' => {}
            _ => {
                if rebol.is_some() || open.is_some() {
                    trace!(pos = cp, "header candidate dropped");
                }
                rebol = None;
                open = None;
            }
        }

        // Skip the rest of the line.
        while !matches!(cursor.byte(cp), b'\n' | b'\r' | 0) {
            cp += 1;
        }
        if cursor.byte(cp) == b'\r' && cursor.byte(cp + 1) == b'\n' {
            cp += 1;
        }
        if cursor.byte(cp) != 0 {
            cp += 1;
        }
        line += 1;
    }
}
