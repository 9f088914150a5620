//! Lexical classification table.
//!
//! Every byte maps to one packed entry: the top bits hold the [`LexClass`]
//! and the low five bits a class-specific value. For delimiters the value
//! is a [`Delimiter`], for specials a [`Special`], and for word and number
//! bytes the hexadecimal digit value (`0`-`9`, `A`-`F`, `a`-`f`; zero for
//! every other word byte) so hex scanning can reuse the same lookup.
//!
//! The table is built at compile time and never mutated.

/// Bit position of the class within a packed entry.
const CLASS_SHIFT: u8 = 5;

/// Mask for the class-specific value.
const VALUE_MASK: u8 = 0x1F;

/// Coarse lexical class. Ordering is significant: scanning loops test
/// "at least word" and similar ranges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LexClass {
    Delimiter = 0,
    Special = 1,
    Word = 2,
    Number = 3,
}

/// Delimiter sub-codes. `Space` must stay zero: a packed entry of `0`
/// means "skippable whitespace".
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Delimiter {
    Space = 0,
    End,
    LineFeed,
    Return,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Quote,
    Slash,
    Semicolon,
    Utf8Error,
}

/// Special-character sub-codes. The discriminant doubles as the bit index
/// in [`LexFlags`](crate::LexFlags).
///
/// Order matters: everything from [`Special::Period`] on may directly
/// follow a leading `+` or `-`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Special {
    At = 0,
    Percent,
    Backslash,
    Colon,
    Tick,
    Lesser,
    Greater,
    Plus,
    Minus,
    /// Reserved; `~` is classified as a word byte.
    Tilde,
    Period,
    Comma,
    Pound,
    Dollar,
    /// Not a byte class: marks "a word byte was seen" in prescan flags.
    Word,
}

impl Delimiter {
    const ALL: [Delimiter; 14] = [
        Delimiter::Space,
        Delimiter::End,
        Delimiter::LineFeed,
        Delimiter::Return,
        Delimiter::LeftParen,
        Delimiter::RightParen,
        Delimiter::LeftBracket,
        Delimiter::RightBracket,
        Delimiter::LeftBrace,
        Delimiter::RightBrace,
        Delimiter::Quote,
        Delimiter::Slash,
        Delimiter::Semicolon,
        Delimiter::Utf8Error,
    ];
}

impl Special {
    const ALL: [Special; 15] = [
        Special::At,
        Special::Percent,
        Special::Backslash,
        Special::Colon,
        Special::Tick,
        Special::Lesser,
        Special::Greater,
        Special::Plus,
        Special::Minus,
        Special::Tilde,
        Special::Period,
        Special::Comma,
        Special::Pound,
        Special::Dollar,
        Special::Word,
    ];
}

const fn pack(class: LexClass, value: u8) -> u8 {
    ((class as u8) << CLASS_SHIFT) | value
}

const fn delim(d: Delimiter) -> u8 {
    pack(LexClass::Delimiter, d as u8)
}

const fn special(s: Special) -> u8 {
    pack(LexClass::Special, s as u8)
}

const WORD: u8 = pack(LexClass::Word, 0);
const SPACE: u8 = delim(Delimiter::Space);

const fn entry(b: u8) -> u8 {
    match b {
        0x00 => delim(Delimiter::End),
        b'\n' => delim(Delimiter::LineFeed),
        b'\r' => delim(Delimiter::Return),
        b' ' => SPACE,
        b'"' => delim(Delimiter::Quote),
        b'(' => delim(Delimiter::LeftParen),
        b')' => delim(Delimiter::RightParen),
        b'[' => delim(Delimiter::LeftBracket),
        b']' => delim(Delimiter::RightBracket),
        b'{' => delim(Delimiter::LeftBrace),
        b'}' => delim(Delimiter::RightBrace),
        b'/' => delim(Delimiter::Slash),
        b';' => delim(Delimiter::Semicolon),

        b'@' => special(Special::At),
        b'%' => special(Special::Percent),
        b'\\' => special(Special::Backslash),
        b':' => special(Special::Colon),
        b'\'' => special(Special::Tick),
        b'<' => special(Special::Lesser),
        b'>' => special(Special::Greater),
        b'+' => special(Special::Plus),
        b'-' => special(Special::Minus),
        b'.' => special(Special::Period),
        b',' => special(Special::Comma),
        b'#' => special(Special::Pound),
        b'$' => special(Special::Dollar),

        b'0'..=b'9' => pack(LexClass::Number, b - b'0'),
        b'A'..=b'F' => pack(LexClass::Word, b - b'A' + 10),
        b'a'..=b'f' => pack(LexClass::Word, b - b'a' + 10),
        b'G'..=b'Z' | b'g'..=b'z' => WORD,
        b'!' | b'&' | b'*' | b'=' | b'?' | b'^' | b'_' | b'`' | b'|' | b'~' => WORD,

        // Can never start a valid UTF-8 sequence (overlong two-byte leads).
        0xC0 | 0xC1 => delim(Delimiter::Utf8Error),
        0x80..=0xFF => WORD,

        // Remaining control characters and DEL.
        _ => SPACE,
    }
}

const fn build() -> [u8; 256] {
    let mut map = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        #[allow(clippy::cast_possible_truncation, reason = "i < 256")]
        {
            map[i] = entry(i as u8);
        }
        i += 1;
    }
    map
}

/// The packed classification table, indexed by byte value.
pub static LEX_MAP: [u8; 256] = build();

/// A packed classification entry for one byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lex(u8);

impl Lex {
    /// Look up the classification of `byte`.
    #[inline]
    pub fn of(byte: u8) -> Self {
        Lex(LEX_MAP[byte as usize])
    }

    /// The packed entry.
    #[inline]
    pub fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn class(self) -> LexClass {
        match self.0 >> CLASS_SHIFT {
            0 => LexClass::Delimiter,
            1 => LexClass::Special,
            2 => LexClass::Word,
            _ => LexClass::Number,
        }
    }

    /// The class-specific value (sub-code or digit value).
    #[inline]
    pub fn value(self) -> u8 {
        self.0 & VALUE_MASK
    }

    pub fn delimiter(self) -> Option<Delimiter> {
        (self.class() == LexClass::Delimiter)
            .then(|| Delimiter::ALL.get(self.value() as usize).copied())
            .flatten()
    }

    pub fn special(self) -> Option<Special> {
        (self.class() == LexClass::Special)
            .then(|| Special::ALL.get(self.value() as usize).copied())
            .flatten()
    }

    /// Hexadecimal digit value for `0-9`, `A-F`, `a-f`.
    #[inline]
    pub fn hex_digit(self) -> Option<u8> {
        match self.class() {
            LexClass::Number => Some(self.value()),
            LexClass::Word if self.value() != 0 => Some(self.value()),
            _ => None,
        }
    }
}

/// Skippable whitespace: space, tab, and the other control bytes.
/// Line breaks and NUL are not included.
#[inline]
pub fn is_space(byte: u8) -> bool {
    LEX_MAP[byte as usize] == 0
}

/// Whitespace including line breaks and the end-of-input byte.
#[inline]
pub fn is_any_space(byte: u8) -> bool {
    LEX_MAP[byte as usize] <= Delimiter::Return as u8
}

#[inline]
pub fn is_delimiter(byte: u8) -> bool {
    Lex::of(byte).class() == LexClass::Delimiter
}

#[inline]
pub fn is_not_delimiter(byte: u8) -> bool {
    !is_delimiter(byte)
}

#[inline]
pub fn is_special(byte: u8) -> bool {
    Lex::of(byte).class() == LexClass::Special
}

#[inline]
pub fn is_word(byte: u8) -> bool {
    Lex::of(byte).class() == LexClass::Word
}

#[inline]
pub fn is_number(byte: u8) -> bool {
    Lex::of(byte).class() == LexClass::Number
}

#[inline]
pub fn is_word_or_number(byte: u8) -> bool {
    Lex::of(byte).class() >= LexClass::Word
}

/// Any byte that is not a line break, carriage return, or end of input.
#[inline]
pub fn is_not_newline(byte: u8) -> bool {
    !matches!(byte, b'\n' | b'\r' | 0)
}
