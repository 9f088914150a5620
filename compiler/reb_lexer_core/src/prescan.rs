//! First pass over a token: find its extent and record which special
//! characters it contains.

use bitflags::bitflags;

use crate::lex_class::{is_number, is_space, is_word_or_number, Lex, LexClass, Special};
use crate::Cursor;

bitflags! {
    /// Special characters seen while prescanning a token.
    ///
    /// Bit `n` corresponds to the [`Special`] with discriminant `n`. The
    /// first byte of a token is never flagged, so a leading `:` or `+`
    /// does not show up here.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LexFlags: u16 {
        const AT = 1 << Special::At as u16;
        const PERCENT = 1 << Special::Percent as u16;
        const BACKSLASH = 1 << Special::Backslash as u16;
        const COLON = 1 << Special::Colon as u16;
        const TICK = 1 << Special::Tick as u16;
        const LESSER = 1 << Special::Lesser as u16;
        const GREATER = 1 << Special::Greater as u16;
        const PLUS = 1 << Special::Plus as u16;
        const MINUS = 1 << Special::Minus as u16;
        const TILDE = 1 << Special::Tilde as u16;
        const PERIOD = 1 << Special::Period as u16;
        const COMMA = 1 << Special::Comma as u16;
        const POUND = 1 << Special::Pound as u16;
        const DOLLAR = 1 << Special::Dollar as u16;
        /// A word byte was seen.
        const WORD = 1 << Special::Word as u16;

        /// Specials that may not appear inside a plain word.
        const ILLEGAL_IN_WORD = Self::AT.bits()
            | Self::PERCENT.bits()
            | Self::BACKSLASH.bits()
            | Self::COMMA.bits()
            | Self::POUND.bits()
            | Self::DOLLAR.bits()
            | Self::COLON.bits();
    }
}

impl LexFlags {
    /// The flag bit for one special character.
    #[inline]
    pub fn of(special: Special) -> Self {
        Self::from_bits_truncate(1 << special as u16)
    }

    /// True when the token contained word bytes and nothing special.
    #[inline]
    pub fn is_only_word(self) -> bool {
        self == Self::WORD
    }
}

/// Skip leading space, set `begin` to the token start, and set `end` to
/// the first delimiter after it.
///
/// A token that starts with a delimiter spans just that byte.
pub fn prescan(cursor: &mut Cursor<'_>) -> LexFlags {
    let mut cp = cursor.begin();
    while is_space(cursor.byte(cp)) {
        cp += 1;
    }
    let begin = cp;
    cursor.set_begin(begin);

    let mut flags = LexFlags::empty();
    loop {
        let lex = Lex::of(cursor.byte(cp));
        match lex.class() {
            LexClass::Delimiter => {
                cursor.set_end(if cp == begin { cp + 1 } else { cp });
                return flags;
            }
            LexClass::Special => {
                if cp != begin {
                    if let Some(special) = lex.special() {
                        flags |= LexFlags::of(special);
                    }
                }
                cp += 1;
            }
            LexClass::Word => {
                flags |= LexFlags::WORD;
                while is_word_or_number(cursor.byte(cp)) {
                    cp += 1;
                }
            }
            LexClass::Number => {
                while is_number(cursor.byte(cp)) {
                    cp += 1;
                }
            }
        }
    }
}
