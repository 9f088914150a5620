//! Token classification.
//!
//! [`Tokenizer::scan_token`] prescans the next run of bytes and decides its
//! [`TokenKind`] from the first byte plus the special characters the run
//! contains. Classification is purely lexical: a token's text is checked
//! only as far as needed to tell kinds apart (quoted strings, tags and
//! characters are scanned in full, numbers and dates are not parsed).
//!
//! Scanning a token does not consume it. The cursor's `begin..end` covers
//! the token until [`Tokenizer::accept`] moves `begin` past it, which lets
//! the block scanner look one byte beyond a token and re-scan it in a
//! different mode (paths, dates).

use crate::escape::scan_char;
use crate::lex_class::{
    is_any_space, is_delimiter, is_not_delimiter, is_not_newline, is_number, is_special,
    is_word_or_number, Delimiter, Lex, LexClass, Special,
};
use crate::prescan::{prescan, LexFlags};
use crate::quoted::{scan_quote, QuoteScan};
use crate::{Cursor, SourceBuffer, Token, TokenKind};

/// Provisional classification: `Err` carries the kind of a malformed token.
type Classified = Result<TokenKind, TokenKind>;

/// `base + len` for a length measured within the source buffer.
#[inline]
fn advance(base: u32, len: usize) -> u32 {
    base.saturating_add(u32::try_from(len).unwrap_or(u32::MAX))
}

/// Token scanner over one source buffer.
///
/// Owns the scratch buffer that quoted-string scans decode into. The
/// decoded text of the last `"..."`/`{...}` token stays there until the
/// next quoted scan; [`Tokenizer::take_scratch`] moves it out.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    scratch: String,
}

impl<'a> Tokenizer<'a> {
    /// Start scanning `buf` at its first byte, after any UTF-8 BOM.
    pub fn new(buf: &'a SourceBuffer) -> Self {
        let mut cursor = buf.cursor();
        let start = buf.bom_len();
        cursor.set_begin(start);
        cursor.set_end(start);
        cursor.set_head_line(start);
        Tokenizer {
            cursor,
            scratch: String::new(),
        }
    }

    #[inline]
    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    #[inline]
    pub fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    /// Text decoded by the most recent quoted-string scan.
    pub fn scratch(&self) -> &str {
        &self.scratch
    }

    /// Move the decoded text out, leaving the scratch buffer empty.
    pub fn take_scratch(&mut self) -> String {
        std::mem::take(&mut self.scratch)
    }

    /// Commit the current token.
    #[inline]
    pub fn accept(&mut self) {
        self.cursor.accept();
    }

    /// Classify the token starting at `begin` (after leading space).
    pub fn scan_token(&mut self) -> Token {
        let flags = prescan(&mut self.cursor);
        let classified = self.classify(flags);
        let (start, end) = (self.cursor.begin(), self.cursor.end());
        match classified {
            Ok(kind) => Token::new(kind, start, end),
            Err(kind) => Token::malformed(kind, start, end),
        }
    }

    fn byte(&self, pos: u32) -> u8 {
        self.cursor.byte(pos)
    }

    fn set_end(&mut self, pos: u32) {
        self.cursor.set_end(pos);
    }

    /// First occurrence of `needle` in `from..to`.
    fn skip_to(&self, from: u32, to: u32, needle: u8) -> Option<u32> {
        let hay = self.cursor.slice(from, to);
        memchr::memchr(needle, hay).map(|i| advance(from, i))
    }

    /// Source bytes from `pos` to the end of input.
    fn rest(&self, pos: u32) -> &'a [u8] {
        self.cursor.slice(pos, self.cursor.source_len())
    }

    /// Position of the next line break or end of input after `from`, used
    /// to resynchronize after a malformed quoted token.
    fn recover_from(&self, from: u32) -> u32 {
        let mut cp = from;
        while cp < self.cursor.source_len() && is_not_newline(self.byte(cp)) {
            cp += 1;
        }
        cp
    }

    fn classify(&mut self, flags: LexFlags) -> Classified {
        let begin = self.cursor.begin();
        let first = Lex::of(self.byte(begin));
        match first.class() {
            LexClass::Delimiter => self.delimiter(begin, first.delimiter()),
            LexClass::Special => {
                if flags.contains(LexFlags::AT) && self.byte(begin) != b'<' {
                    return Ok(TokenKind::Email);
                }
                self.special(begin, flags)
            }
            LexClass::Word => {
                if flags.is_only_word() {
                    Ok(TokenKind::Word)
                } else {
                    self.word_tail(TokenKind::Word, begin, flags)
                }
            }
            LexClass::Number => self.number(begin, flags),
        }
    }

    fn delimiter(&mut self, begin: u32, delimiter: Option<Delimiter>) -> Classified {
        match delimiter {
            Some(Delimiter::Space | Delimiter::Semicolon) => {
                let cp = self.cursor.line_end_from(begin);
                match self.byte(cp) {
                    0 => {
                        self.set_end(cp);
                        Ok(TokenKind::LineBreak)
                    }
                    _ => Ok(self.line_break(cp)),
                }
            }
            Some(Delimiter::LineFeed | Delimiter::Return) => Ok(self.line_break(begin)),
            Some(Delimiter::LeftBracket) => Ok(TokenKind::BlockStart),
            Some(Delimiter::RightBracket) => Ok(TokenKind::BlockEnd),
            Some(Delimiter::LeftParen) => Ok(TokenKind::ParenStart),
            Some(Delimiter::RightParen) => Ok(TokenKind::ParenEnd),
            Some(Delimiter::Quote | Delimiter::LeftBrace) => {
                match scan_quote(self.rest(begin), &mut self.scratch) {
                    Some(scan) => {
                        self.set_end(advance(begin, scan.len));
                        self.cross_lines(begin, scan);
                        Ok(TokenKind::String)
                    }
                    None => {
                        let end = self.recover_from(begin + 1);
                        self.set_end(end);
                        Err(TokenKind::String)
                    }
                }
            }
            Some(Delimiter::RightBrace) => Err(TokenKind::String),
            Some(Delimiter::Slash) => self.slash(begin),
            Some(Delimiter::End) if begin < self.cursor.source_len() => {
                self.set_end(begin + 1);
                Err(TokenKind::Word)
            }
            Some(Delimiter::End) => {
                self.set_end(begin);
                Ok(TokenKind::Eof)
            }
            Some(Delimiter::Utf8Error) | None => Err(TokenKind::Word),
        }
    }

    /// Count the line breaks inside a multi-line string that starts at
    /// `base`, so error snippets show its last line.
    fn cross_lines(&mut self, base: u32, scan: QuoteScan) {
        if scan.lines > 0 {
            self.cursor.add_lines(scan.lines);
            self.cursor.set_head_line(advance(base, scan.head));
        }
    }

    /// LF, CR, or CR LF at `cp`: count one line.
    fn line_break(&mut self, cp: u32) -> TokenKind {
        let end = if self.byte(cp) == b'\r' && self.byte(cp + 1) == b'\n' {
            cp + 2
        } else {
            cp + 1
        };
        self.cursor.add_lines(1);
        self.set_end(end);
        TokenKind::LineBreak
    }

    /// `/`, `//`, `/word`.
    fn slash(&mut self, begin: u32) -> Classified {
        let mut cp = begin;
        while self.byte(cp) == b'/' {
            cp += 1;
        }
        let next = self.byte(cp);
        if is_word_or_number(next) || matches!(next, b'+' | b'-' | b'.') {
            if begin + 1 != cp {
                self.set_end(cp);
                return Err(TokenKind::Refinement);
            }
            self.cursor.set_begin(cp);
            let flags = prescan(&mut self.cursor);
            self.cursor.set_begin(begin);
            if flags.is_only_word() {
                return Ok(TokenKind::Refinement);
            }
            return self.word_tail(TokenKind::Refinement, cp, flags);
        }
        if matches!(next, b'<' | b'>') {
            self.set_end(cp + 1);
            return Err(TokenKind::Refinement);
        }
        self.set_end(cp);
        Ok(TokenKind::Word)
    }

    /// Tokens whose first byte (at `cp`) is a special character.
    fn special(&mut self, cp: u32, mut flags: LexFlags) -> Classified {
        let Some(special) = Lex::of(self.byte(cp)).special() else {
            return Err(TokenKind::Word);
        };
        match special {
            Special::At => Err(TokenKind::Email),
            Special::Percent => self.file(),
            Special::Colon => {
                let next = self.byte(cp + 1);
                if is_number(next) {
                    return Ok(TokenKind::Time);
                }
                if flags.is_only_word() {
                    return Ok(TokenKind::GetWord);
                }
                if next == b'\'' {
                    return Err(TokenKind::Word);
                }
                if matches!(next, b'<' | b'>') {
                    return self.operator_word(cp, TokenKind::GetWord);
                }
                self.word_tail(TokenKind::GetWord, cp + 1, flags)
            }
            Special::Tick => {
                let next = self.byte(cp + 1);
                if is_number(next) || next == b':' {
                    return Err(TokenKind::LitWord);
                }
                if flags.is_only_word() {
                    return Ok(TokenKind::LitWord);
                }
                if next == b'\'' {
                    return Err(TokenKind::Word);
                }
                if matches!(next, b'<' | b'>') {
                    return self.operator_word(cp, TokenKind::LitWord);
                }
                self.word_tail(TokenKind::LitWord, cp, flags)
            }
            Special::Comma | Special::Period => {
                flags |= LexFlags::of(special);
                if is_number(self.byte(cp + 1)) {
                    return self.number(cp, flags);
                }
                if special == Special::Comma {
                    return Err(TokenKind::Word);
                }
                self.word_tail(TokenKind::Word, cp, flags)
            }
            Special::Greater | Special::Lesser => self.angle(cp, special),
            Special::Plus | Special::Minus => self.signed(cp, flags),
            Special::Pound => self.pound(cp),
            Special::Dollar => {
                if flags.contains(LexFlags::AT) {
                    Ok(TokenKind::Email)
                } else {
                    Ok(TokenKind::Money)
                }
            }
            Special::Backslash | Special::Tilde | Special::Word => Err(TokenKind::Word),
        }
    }

    /// `%file`, `%dir/file`, `%"quoted file"`.
    fn file(&mut self) -> Classified {
        let mut cp = self.cursor.end();
        if self.byte(cp) == b'"' {
            return match scan_quote(self.rest(cp), &mut self.scratch) {
                Some(scan) => {
                    self.set_end(advance(cp, scan.len));
                    Ok(TokenKind::File)
                }
                None => Err(TokenKind::File),
            };
        }
        while self.byte(cp) == b'/' {
            cp += 1;
            while is_not_delimiter(self.byte(cp)) {
                cp += 1;
            }
        }
        self.set_end(cp);
        Ok(TokenKind::File)
    }

    /// `:<`, `:<=`, `'>>`, and similar operator words after a `:` or `'`
    /// at `cp`.
    fn operator_word(&mut self, cp: u32, kind: TokenKind) -> Classified {
        let mut cp = cp + 1;
        if matches!(self.byte(cp + 1), b'<' | b'>' | b'=') {
            cp += 1;
        }
        if !is_delimiter(self.byte(cp + 1)) {
            return Err(kind);
        }
        self.set_end(cp + 1);
        Ok(kind)
    }

    /// `<`, `>`, `<<`, `<=`, `<>`, `>=`, `>>` as words, or a `<tag>`.
    fn angle(&mut self, cp: u32, special: Special) -> Classified {
        let next = self.byte(cp + 1);
        if special == Special::Greater {
            if is_delimiter(next) {
                return Ok(TokenKind::Word);
            }
            if next == b'>' {
                return if is_delimiter(self.byte(cp + 2)) {
                    Ok(TokenKind::Word)
                } else {
                    Err(TokenKind::Word)
                };
            }
        }
        if is_any_space(next) || next == b']' {
            return Ok(TokenKind::Word);
        }
        if (special == Special::Lesser && next == b'<') || matches!(next, b'=' | b'>') {
            return if is_delimiter(self.byte(cp + 2)) {
                Ok(TokenKind::Word)
            } else {
                Err(TokenKind::Word)
            };
        }
        if special == Special::Greater {
            return Err(TokenKind::Word);
        }
        match crate::quoted::skip_tag(self.rest(cp)) {
            Some(len) => {
                self.set_end(advance(cp, len));
                Ok(TokenKind::Tag)
            }
            None => Err(TokenKind::Tag),
        }
    }

    /// Leading `+` or `-` at `cp`.
    fn signed(&mut self, cp: u32, flags: LexFlags) -> Classified {
        let begin = self.cursor.begin();
        let end = self.cursor.end();
        if flags.contains(LexFlags::AT) {
            return Ok(TokenKind::Email);
        }
        if flags.contains(LexFlags::DOLLAR) {
            return Ok(TokenKind::Money);
        }
        if flags.contains(LexFlags::COLON) {
            // A colon anywhere but the last byte makes a signed time.
            if self.skip_to(cp, end, b':').is_some_and(|colon| colon + 1 != end) {
                return Ok(TokenKind::Time);
            }
            if self.byte(begin + 1) == b':' {
                return self.word_tail(TokenKind::Word, begin, flags);
            }
            return Err(TokenKind::Time);
        }
        let next_cp = cp + 1;
        let next = self.byte(next_cp);
        if is_number(next) {
            return self.number(next_cp, flags);
        }
        if is_special(next) {
            if Lex::of(next).special().is_some_and(|s| s >= Special::Period) {
                return self.special(next_cp, flags);
            }
            if matches!(next, b'+' | b'-') {
                return self.word_tail(TokenKind::Word, next_cp, flags);
            }
            return Err(TokenKind::Word);
        }
        self.word_tail(TokenKind::Word, next_cp, flags)
    }

    /// `#` at `cp`: construct, char, binary, or issue.
    fn pound(&mut self, cp: u32) -> Classified {
        let begin = self.cursor.begin();
        let p = cp + 1;
        match self.byte(p) {
            b'[' => {
                self.set_end(p + 1);
                Ok(TokenKind::Construct)
            }
            b'"' => {
                let body = p + 1;
                let closed = scan_char(self.rest(body)).and_then(|(_, width)| {
                    let after = advance(body, width);
                    (self.byte(after) == b'"').then_some(after)
                });
                match closed {
                    Some(after) => {
                        self.set_end(after + 1);
                        Ok(TokenKind::Char)
                    }
                    None => {
                        let end = self.recover_from(begin + 1);
                        self.set_end(end);
                        Err(TokenKind::Char)
                    }
                }
            }
            b'{' => {
                match scan_quote(self.rest(p), &mut self.scratch) {
                    Some(scan) => {
                        self.set_end(advance(p, scan.len));
                        self.cross_lines(p, scan);
                        Ok(TokenKind::Binary)
                    }
                    None => {
                        let end = self.recover_from(begin + 1);
                        self.set_end(end);
                        Err(TokenKind::Binary)
                    }
                }
            }
            _ if cp == begin => Ok(TokenKind::Issue),
            _ => Err(TokenKind::Integer),
        }
    }

    /// Number-led tokens, with `cp` at the first digit (or the `.`/`,`
    /// radix point of `.5`).
    fn number(&mut self, cp: u32, flags: LexFlags) -> Classified {
        let begin = self.cursor.begin();
        let end = self.cursor.end();
        if flags.is_empty() {
            return Ok(TokenKind::Integer);
        }
        if flags.contains(LexFlags::AT) {
            return Ok(TokenKind::Email);
        }
        if flags.contains(LexFlags::POUND) {
            if cp == begin {
                let head = [
                    self.byte(cp),
                    self.byte(cp + 1),
                    self.byte(cp + 2),
                    self.byte(cp + 3),
                ];
                match head {
                    [b'6', b'4', b'#', b'{'] | [b'1', b'6', b'#', b'{'] => {
                        return self.pound(cp + 2);
                    }
                    [b'2', b'#', b'{', _] => return self.pound(cp + 1),
                    _ => {}
                }
            }
            return Err(TokenKind::Integer);
        }
        if flags.contains(LexFlags::COLON) {
            return Ok(TokenKind::Time);
        }
        if flags.contains(LexFlags::PERIOD) {
            if self.skip_to(cp, end, b'x').is_some() {
                return Ok(TokenKind::Pair);
            }
            let first_dot = self.skip_to(cp, end, b'.').unwrap_or(cp);
            if !flags.contains(LexFlags::COMMA) && self.skip_to(first_dot + 1, end, b'.').is_some()
            {
                return Ok(TokenKind::Tuple);
            }
            return Ok(TokenKind::Decimal);
        }
        if flags.contains(LexFlags::COMMA) {
            if self.skip_to(cp, end, b'x').is_some() {
                return Ok(TokenKind::Pair);
            }
            return Ok(TokenKind::Decimal);
        }
        // Dates like 1/2/1998 cannot be seen here: inside a path they are
        // not dates, so the block scanner extends integers followed by `/`.
        for pos in cp..end {
            match self.byte(pos) {
                b'-' => return Ok(TokenKind::Date),
                b'x' | b'X' => return Ok(TokenKind::Pair),
                b'e' | b'E' => {
                    return if self.skip_to(pos, end, b'x').is_some() {
                        Ok(TokenKind::Pair)
                    } else {
                        Ok(TokenKind::Decimal)
                    };
                }
                b'%' => return Ok(TokenKind::Percent),
                _ => {}
            }
        }
        if flags.contains(LexFlags::TICK) {
            return Ok(TokenKind::Integer);
        }
        Err(TokenKind::Integer)
    }

    /// Shared disambiguation for word-like tokens of provisional `kind`,
    /// with `cp` at the first byte after any prefix.
    fn word_tail(&mut self, kind: TokenKind, cp: u32, mut flags: LexFlags) -> Classified {
        let end = self.cursor.end();
        if flags.contains(LexFlags::COLON) {
            if kind != TokenKind::Word {
                // Only a single trailing colon, which belongs to a path.
                let colon = self.skip_to(cp, end, b':');
                if kind == TokenKind::Refinement || colon != Some(end - 1) {
                    return Err(kind);
                }
                flags.remove(LexFlags::COLON);
            } else {
                let colon = self.skip_to(cp, end, b':').unwrap_or(end);
                let after = self.byte(colon + 1);
                if after != b'/' && is_delimiter(after) {
                    if flags.intersects(LexFlags::ILLEGAL_IN_WORD.difference(LexFlags::COLON)) {
                        return Err(TokenKind::Word);
                    }
                    return Ok(TokenKind::SetWord);
                }
                let mut cp = end;
                while self.byte(cp) == b'/' {
                    cp += 1;
                    while is_not_delimiter(self.byte(cp)) || self.byte(cp) == b'/' {
                        cp += 1;
                    }
                }
                self.set_end(cp);
                return Ok(TokenKind::Url);
            }
        }
        if flags.contains(LexFlags::AT) {
            return Ok(TokenKind::Email);
        }
        if flags.contains(LexFlags::DOLLAR) {
            return Ok(TokenKind::Money);
        }
        if flags.intersects(LexFlags::ILLEGAL_IN_WORD) {
            return Err(kind);
        }
        if flags.contains(LexFlags::LESSER) {
            // word<tag> and word</tag>, but not word< word<= word<>
            let lt = self.skip_to(cp, end, b'<').unwrap_or(end);
            let after = self.byte(lt + 1);
            if matches!(after, b'<' | b'>' | b'=')
                || is_any_space(after)
                || (after != b'/' && is_delimiter(after))
            {
                return Err(kind);
            }
            self.set_end(lt);
        } else if flags.contains(LexFlags::GREATER) {
            return Err(kind);
        }
        Ok(kind)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Scan and accept the next token; `None` at end of input.
    fn next(&mut self) -> Option<Token> {
        let mut token = self.scan_token();
        if token.kind == TokenKind::Eof {
            return None;
        }
        if token.end <= token.start {
            // Always make progress.
            token.end = token.start + 1;
            self.cursor.set_end(token.end);
        }
        self.accept();
        Some(token)
    }
}
