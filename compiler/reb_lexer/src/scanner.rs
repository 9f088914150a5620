//! Structural block scanner.
//!
//! Drives the [`Tokenizer`] and turns each token into a [`Value`],
//! recursing for blocks, parens, paths and `#[...]` constructs. A token is
//! scanned first and accepted only once the scanner knows what it is, so a
//! word followed by `/` can be re-scanned as the head of a path and an
//! integer followed by `/` as the start of a date.
//!
//! Malformed input aborts the scan unless errors are relaxed, in which case
//! each problem becomes a [`Value::Error`] in place and scanning resumes
//! after it. Exceeding the nesting limit always aborts.

use reb_ir::{
    Block, BlockKind, ScanError, ScanErrorKind, ScannedValue, Span, SymbolTable, Value, WordKind,
};
use reb_lexer_core::lex_class::{is_delimiter, is_not_delimiter};
use reb_lexer_core::{Token, TokenKind, Tokenizer};
use reb_stack::ensure_sufficient_stack;
use tracing::{trace, warn};

use crate::binary::parse_binary;
use crate::construct::Construct;
use crate::literal;
use crate::ScanOptions;

/// Longest date/time text collected across `/` separators.
const MAX_DATE_LEN: u32 = 50;

/// What the current nesting level is collecting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Top,
    Block,
    Paren,
    Path,
}

impl Mode {
    fn of(open: TokenKind) -> Mode {
        if open == TokenKind::ParenStart {
            Mode::Paren
        } else {
            Mode::Block
        }
    }

    fn close(self) -> char {
        match self {
            Mode::Paren => ')',
            Mode::Path => '/',
            Mode::Top | Mode::Block => ']',
        }
    }
}

/// Outcome of converting one token.
enum Step {
    Value(Value),
    /// Empty leading slot of a path like `/a/b`.
    Slot,
    LineBreak,
    /// Comment running into end of input.
    Skip,
}

/// Line position used to report an error.
#[derive(Copy, Clone)]
struct Site {
    line: u32,
    head: u32,
}

/// One scan session.
pub(crate) struct Scanner<'a, 's> {
    tok: Tokenizer<'a>,
    symbols: &'s SymbolTable,
    constructor: &'s dyn Construct,
    options: ScanOptions,
    depth: u32,
    error_count: u32,
    errors: Vec<ScanError>,
}

impl<'a, 's> Scanner<'a, 's> {
    pub(crate) fn new(
        tok: Tokenizer<'a>,
        symbols: &'s SymbolTable,
        constructor: &'s dyn Construct,
        options: ScanOptions,
    ) -> Self {
        Scanner {
            tok,
            symbols,
            constructor,
            options,
            depth: 0,
            error_count: 0,
            errors: Vec::new(),
        }
    }

    /// Errors recorded so far, including a fatal one.
    pub(crate) fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Errors recorded in relaxed mode.
    pub(crate) fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    /// Byte offset where scanning stopped.
    pub(crate) fn position(&self) -> u32 {
        self.tok.cursor().begin()
    }

    /// Scan values until end of input, or until the first value when the
    /// options ask for one.
    pub(crate) fn scan_top(&mut self) -> Result<Block, ScanError> {
        self.scan_block(Mode::Top)
    }

    fn byte(&self, pos: u32) -> u8 {
        self.tok.cursor().byte(pos)
    }

    fn site(&self) -> Site {
        let cursor = self.tok.cursor();
        Site {
            line: cursor.line(),
            head: cursor.head_line(),
        }
    }

    /// Move the cursor to `pos` and commit everything before it.
    fn accept_to(&mut self, pos: u32) {
        self.tok.cursor_mut().set_end(pos);
        self.tok.accept();
    }

    fn error_at(
        &mut self,
        kind: ScanErrorKind,
        token: TokenKind,
        start: u32,
        end: u32,
        site: Site,
    ) -> ScanError {
        self.error_count += 1;
        let cursor = self.tok.cursor();
        ScanError {
            kind,
            token,
            bytes: String::from_utf8_lossy(cursor.slice(start, end)).into_owned(),
            span: Span::new(start, end),
            line: site.line,
            near: String::from_utf8_lossy(cursor.line_text(site.head)).into_owned(),
        }
    }

    fn invalid(&mut self, token: TokenKind, start: u32, end: u32) -> ScanError {
        let site = self.site();
        self.error_at(ScanErrorKind::Invalid { token }, token, start, end, site)
    }

    /// Keep `err` as an error value in relaxed mode; otherwise abort.
    fn record(
        &mut self,
        err: ScanError,
        block: &mut Block,
        new_line: &mut bool,
    ) -> Result<(), ScanError> {
        if !self.options.relax_errors || err.is_fatal() {
            return Err(err);
        }
        warn!(line = err.line, error = %err, "recorded malformed input");
        let span = err.span;
        self.errors.push(err.clone());
        push(block, Value::Error(Box::new(err)), span, new_line);
        Ok(())
    }

    /// Scan a nested level, guarding depth and stack.
    fn nested(&mut self, mode: Mode, start: u32) -> Result<Block, ScanError> {
        if self.depth >= self.options.max_depth {
            let end = self.tok.cursor().end();
            let site = self.site();
            warn!(
                depth = self.depth,
                remaining_stack = ?reb_stack::remaining_stack(),
                "nesting limit reached"
            );
            return Err(self.error_at(
                ScanErrorKind::TooDeep,
                TokenKind::BlockStart,
                start,
                end,
                site,
            ));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.scan_block(mode));
        self.depth -= 1;
        result
    }

    fn scan_block(&mut self, mode: Mode) -> Result<Block, ScanError> {
        let open = self.site();
        let mut block = Block::default();
        let mut new_line = false;

        loop {
            let token = self.tok.scan_token();
            trace!(
                kind = %token.kind,
                start = token.start,
                end = token.end,
                malformed = token.malformed,
                ?mode,
                "token"
            );

            match token.kind {
                TokenKind::Eof => {
                    if matches!(mode, Mode::Block | Mode::Paren) {
                        let err = self.missing(mode, token, open);
                        self.record(err, &mut block, &mut new_line)?;
                    }
                    break;
                }
                TokenKind::BlockEnd | TokenKind::ParenEnd if !token.malformed => {
                    let close = if token.kind == TokenKind::BlockEnd { ']' } else { ')' };
                    match mode {
                        Mode::Path => break,
                        Mode::Top => {
                            self.accept_to(token.end);
                            let site = self.site();
                            let err = self.error_at(
                                ScanErrorKind::Extra { close },
                                token.kind,
                                token.start,
                                token.end,
                                site,
                            );
                            self.record(err, &mut block, &mut new_line)?;
                            if self.options.stops_after_value() {
                                break;
                            }
                            continue;
                        }
                        Mode::Block | Mode::Paren if mode.close() == close => {
                            self.accept_to(token.end);
                            break;
                        }
                        Mode::Block | Mode::Paren => {
                            // Leave the closer for an enclosing level.
                            let err = self.missing(mode, token, open);
                            self.record(err, &mut block, &mut new_line)?;
                            break;
                        }
                    }
                }
                _ => {}
            }

            let start = token.start;
            match self.step(token, mode) {
                Ok(Step::LineBreak) => {
                    new_line = true;
                    continue;
                }
                Ok(Step::Skip) => continue,
                Ok(Step::Slot) => {
                    // The `/` was the separator; the segment follows.
                    let end = self.tok.cursor().begin();
                    push(&mut block, Value::None, Span::new(start, end), &mut new_line);
                    continue;
                }
                Ok(Step::Value(value)) => {
                    let end = self.tok.cursor().begin();
                    push(&mut block, value, Span::new(start, end), &mut new_line);
                }
                Err(err) => {
                    self.record(err, &mut block, &mut new_line)?;
                    if mode == Mode::Path {
                        break;
                    }
                }
            }

            if mode == Mode::Path {
                if !self.path_separator(start, &mut block, &mut new_line)? {
                    break;
                }
                continue;
            }
            if mode == Mode::Top && self.options.stops_after_value() {
                break;
            }
        }

        block.tail_new_line = new_line;
        Ok(block)
    }

    /// After a path segment: consume a following `/` and report whether
    /// another segment follows.
    fn path_separator(
        &mut self,
        segment: u32,
        block: &mut Block,
        new_line: &mut bool,
    ) -> Result<bool, ScanError> {
        let end = self.tok.cursor().end();
        if self.byte(end) != b'/' {
            return Ok(false);
        }
        let next = end + 1;
        self.accept_to(next);
        let after = self.byte(next);
        if after != b'(' && is_delimiter(after) {
            let err = self.invalid(TokenKind::Path, segment, next);
            self.record(err, block, new_line)?;
            return Ok(false);
        }
        Ok(true)
    }

    fn missing(&mut self, mode: Mode, token: Token, open: Site) -> ScanError {
        self.error_at(
            ScanErrorKind::Missing { close: mode.close() },
            token.kind,
            token.start,
            token.end,
            open,
        )
    }

    /// Convert one token, accepting it.
    fn step(&mut self, token: Token, mode: Mode) -> Result<Step, ScanError> {
        let bp = token.start;
        let mut ep = token.end;
        let kind = token.kind;

        if token.malformed {
            self.accept_to(ep.max(bp + 1));
            return Err(self.invalid(kind, bp, ep.max(bp + 1)));
        }

        if mode != Mode::Path
            && (kind == TokenKind::Path
                || (matches!(
                    kind,
                    TokenKind::Word
                        | TokenKind::LitWord
                        | TokenKind::GetWord
                        | TokenKind::Refinement
                ) && self.byte(ep) == b'/'))
        {
            return self.path(kind, bp).map(Step::Value);
        }

        if mode == Mode::Path && self.byte(bp) == b'/' {
            self.accept_to(bp + 1);
            return Ok(Step::Slot);
        }

        // In a path the colon of `a/b:` belongs to the path.
        let mut kind = kind;
        if mode == Mode::Path && kind == TokenKind::SetWord {
            ep -= 1;
            kind = TokenKind::Word;
        }
        self.accept_to(ep);

        let value = match kind {
            TokenKind::LineBreak => {
                if !matches!(self.byte(ep - 1), b'\n' | b'\r') {
                    return Ok(Step::Skip);
                }
                self.tok.cursor_mut().set_head_line(ep);
                return Ok(Step::LineBreak);
            }
            TokenKind::Word => self.word(WordKind::Word, kind, bp, bp, ep)?,
            TokenKind::SetWord => self.word(WordKind::SetWord, kind, bp, bp, ep - 1)?,
            TokenKind::GetWord | TokenKind::LitWord => {
                let word_kind = if kind == TokenKind::GetWord {
                    WordKind::GetWord
                } else {
                    WordKind::LitWord
                };
                if self.byte(ep - 1) == b':' {
                    if ep - bp == 1 || mode != Mode::Path {
                        return Err(self.invalid(kind, bp, ep));
                    }
                    ep -= 1;
                    self.accept_to(ep);
                }
                self.word(word_kind, kind, bp, bp + 1, ep)?
            }
            TokenKind::Refinement => self.word(WordKind::Refinement, kind, bp, bp + 1, ep)?,
            TokenKind::Issue => {
                if ep - bp == 1 {
                    if self.byte(bp + 1) == b'(' {
                        return Err(self.invalid(TokenKind::Construct, bp, ep + 1));
                    }
                    Value::None
                } else {
                    let text = self.tok.cursor().slice(bp + 1, ep);
                    if !literal::is_issue_text(text) {
                        return Err(self.invalid(kind, bp, ep));
                    }
                    let name = self.text(kind, bp, ep, bp + 1)?;
                    Value::Issue(self.symbols.intern(name))
                }
            }
            TokenKind::BlockStart | TokenKind::ParenStart => {
                if self.options.single_value_only {
                    let site = self.site();
                    return Err(self.error_at(
                        ScanErrorKind::NotAllowed { token: kind },
                        kind,
                        bp,
                        ep,
                        site,
                    ));
                }
                let block_kind = if kind == TokenKind::BlockStart {
                    BlockKind::Block
                } else {
                    BlockKind::Paren
                };
                Value::Block(block_kind, self.nested(Mode::of(kind), bp)?)
            }
            TokenKind::Integer => {
                if self.byte(ep) == b'/' && mode != Mode::Path {
                    // 1/2/2021
                    while self.byte(ep) == b'/' || is_not_delimiter(self.byte(ep)) {
                        ep += 1;
                    }
                    self.accept_to(ep);
                    self.date(bp, ep, mode)?
                } else {
                    let text = self.tok.cursor().slice(bp, ep);
                    match literal::parse_integer(text) {
                        Some(n) => Value::Integer(n),
                        None => return Err(self.invalid(kind, bp, ep)),
                    }
                }
            }
            TokenKind::Date => self.date(bp, ep, mode)?,
            TokenKind::Decimal | TokenKind::Percent | TokenKind::Money => {
                if self.byte(ep) == b'/' {
                    self.accept_to(ep + 1);
                    return Err(self.invalid(kind, bp, ep + 1));
                }
                let text = self.tok.cursor().slice(bp, ep);
                let parsed = match kind {
                    TokenKind::Decimal => literal::parse_decimal(text).map(Value::Decimal),
                    TokenKind::Percent => literal::parse_percent(text).map(Value::Percent),
                    _ => literal::parse_money(text).map(Value::Money),
                };
                match parsed {
                    Some(value) => value,
                    None => return Err(self.invalid(kind, bp, ep)),
                }
            }
            TokenKind::Time => {
                if self.byte(ep - 1) == b':' && mode == Mode::Path {
                    // a/10: is a set-path with an integer segment
                    ep -= 1;
                    self.accept_to(ep);
                    match literal::parse_integer(self.tok.cursor().slice(bp, ep)) {
                        Some(n) => Value::Integer(n),
                        None => return Err(self.invalid(TokenKind::Integer, bp, ep)),
                    }
                } else {
                    match literal::parse_time(self.tok.cursor().slice(bp, ep)) {
                        Some(time) => Value::Time(time),
                        None => return Err(self.invalid(kind, bp, ep)),
                    }
                }
            }
            TokenKind::Pair => match literal::parse_pair(self.tok.cursor().slice(bp, ep)) {
                Some((x, y)) => Value::Pair { x, y },
                None => return Err(self.invalid(kind, bp, ep)),
            },
            TokenKind::Tuple => match literal::parse_tuple(self.tok.cursor().slice(bp, ep)) {
                Some(tuple) => Value::Tuple(tuple),
                None => return Err(self.invalid(kind, bp, ep)),
            },
            TokenKind::String => Value::String(self.tok.take_scratch()),
            TokenKind::Binary => match parse_binary(self.tok.cursor().slice(bp, ep)) {
                Some(bytes) => Value::Binary(bytes),
                None => return Err(self.invalid(kind, bp, ep)),
            },
            TokenKind::Char => match literal::parse_char(self.tok.cursor().slice(bp, ep)) {
                Some(ch) => Value::Char(ch),
                None => return Err(self.invalid(kind, bp, ep)),
            },
            TokenKind::File | TokenKind::Email | TokenKind::Url | TokenKind::Tag => {
                let text = self.tok.cursor().slice(bp, ep);
                let parsed = match kind {
                    TokenKind::File => literal::parse_file(text).map(Value::File),
                    TokenKind::Email => literal::parse_email(text).map(Value::Email),
                    TokenKind::Url => literal::parse_url(text).map(Value::Url),
                    _ => literal::parse_tag(text).map(Value::Tag),
                };
                match parsed {
                    Some(value) => value,
                    None => return Err(self.invalid(kind, bp, ep)),
                }
            }
            TokenKind::Construct => {
                let spec = self.nested(Mode::Block, bp)?;
                let end = self.tok.cursor().begin();
                match self.constructor.construct(&spec.items, self.symbols) {
                    Some(value) => value,
                    None => {
                        let site = self.site();
                        return Err(self.error_at(
                            ScanErrorKind::MalformedConstruct,
                            kind,
                            bp,
                            end,
                            site,
                        ));
                    }
                }
            }
            TokenKind::Path
            | TokenKind::Eof
            | TokenKind::BlockEnd
            | TokenKind::ParenEnd => return Err(self.invalid(kind, bp, ep)),
        };
        Ok(Step::Value(value))
    }

    /// Source text `from..end` of a token spanning `bp..end`, as UTF-8.
    fn text(
        &mut self,
        kind: TokenKind,
        bp: u32,
        end: u32,
        from: u32,
    ) -> Result<&'a str, ScanError> {
        let bytes = self.tok.cursor().slice(from, end);
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(_) => Err(self.invalid(kind, bp, end)),
        }
    }

    /// A word-family value named by `from..end`.
    fn word(
        &mut self,
        word_kind: WordKind,
        kind: TokenKind,
        bp: u32,
        from: u32,
        end: u32,
    ) -> Result<Value, ScanError> {
        if end <= from {
            return Err(self.invalid(kind, bp, end.max(bp + 1)));
        }
        let name = self.text(kind, bp, end, from)?;
        Ok(Value::Word(word_kind, self.symbols.intern(name)))
    }

    /// A date starting at `bp`, extended over `/time` suffixes outside
    /// paths.
    fn date(&mut self, bp: u32, mut ep: u32, mode: Mode) -> Result<Value, ScanError> {
        while self.byte(ep) == b'/' && mode != Mode::Path {
            let mut cp = ep + 1;
            while is_not_delimiter(self.byte(cp)) {
                cp += 1;
            }
            if cp - bp > MAX_DATE_LEN {
                break;
            }
            ep = cp;
        }
        self.accept_to(ep);
        match literal::parse_date(self.tok.cursor().slice(bp, ep)) {
            Some(date) => Ok(Value::Date(date)),
            None => Err(self.invalid(TokenKind::Date, bp, ep)),
        }
    }

    /// A path whose first segment starts at `bp`.
    fn path(&mut self, head: TokenKind, bp: u32) -> Result<Value, ScanError> {
        let mut segments = self.nested(Mode::Path, bp)?;
        let end = self.tok.cursor().end();

        let first = segments.items.first_mut().map(|item| &mut item.value);
        let kind = if head == TokenKind::LitWord {
            if let Some(Value::Word(word_kind, _)) = first {
                *word_kind = WordKind::Word;
            }
            BlockKind::LitPath
        } else if let Some(Value::Word(word_kind @ WordKind::GetWord, _)) = first {
            *word_kind = WordKind::Word;
            if self.byte(end) == b':' {
                self.accept_to(end + 1);
                return Err(self.invalid(TokenKind::Path, bp, end + 1));
            }
            BlockKind::GetPath
        } else if self.byte(end) == b':' {
            self.accept_to(end + 1);
            BlockKind::SetPath
        } else {
            BlockKind::Path
        };
        Ok(Value::Block(kind, segments))
    }
}

/// Append a value, attaching and clearing the pending line break.
fn push(block: &mut Block, value: Value, span: Span, new_line: &mut bool) {
    block.items.push(ScannedValue {
        value,
        new_line: std::mem::take(new_line),
        span,
    });
}

#[cfg(test)]
mod tests;
