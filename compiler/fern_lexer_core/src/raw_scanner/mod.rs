//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! Operates on a sentinel-terminated [`Cursor`] and never allocates. It does
//! not resolve keywords or validate escapes; that is the cooking layer's job.
//! Malformed input becomes an error tag, never a `Result::Err`.

use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Context the parser supplies for the two lexically ambiguous characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LexMode {
    /// `/` is division, `>` stands alone.
    #[default]
    Normal,
    /// `/` may begin a regular expression literal.
    RegularExpression,
    /// `>` merges with following `>` and `=` into shift and comparison
    /// operators.
    GreaterThanCompound,
}

/// Allocation-free scanner producing one raw token per call.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    mode: LexMode,
}

#[inline]
fn is_ascii_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
fn is_ascii_ident_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[inline]
fn is_line_break_char(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
fn is_unicode_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && !is_line_break_char(c))
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>, mode: LexMode) -> Self {
        Self { cursor, mode }
    }

    /// Byte offset of the next lexeme.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Move back (or forward) to `pos`, undoing a peek.
    #[inline]
    pub fn reset_to(&mut self, pos: u32) {
        self.cursor.reset_to(pos);
    }

    #[inline]
    pub fn set_mode(&mut self, mode: LexMode) {
        self.mode = mode;
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted,
    /// and keeps returning it.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 if self.cursor.is_eof() => RawToken {
                tag: RawTag::Eof,
                len: 0,
            },
            b' ' | b'\t' | 0x0B | 0x0C => {
                self.cursor.eat_whitespace();
                self.finish(RawTag::Whitespace, start)
            }
            b'\n' => self.single(RawTag::Newline, start),
            b'\r' => {
                self.cursor.advance();
                if self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
                self.finish(RawTag::Newline, start)
            }
            b if is_ascii_ident_start(b) => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.string(start),
            b'/' => self.slash(start),
            b'.' => self.dot(start),
            b'{' => self.single(RawTag::LeftBrace, start),
            b'}' => self.single(RawTag::RightBrace, start),
            b'(' => self.single(RawTag::LeftParen, start),
            b')' => self.single(RawTag::RightParen, start),
            b'[' => self.single(RawTag::LeftBracket, start),
            b']' => self.single(RawTag::RightBracket, start),
            b';' => self.single(RawTag::Semicolon, start),
            b',' => self.single(RawTag::Comma, start),
            b'~' => self.single(RawTag::Tilde, start),
            b'?' => self.single(RawTag::Question, start),
            b':' => self.single(RawTag::Colon, start),
            b'<' => self.less(start),
            b'>' => self.greater(start),
            b'=' => self.equal(start),
            b'!' => self.bang(start),
            b'+' => self.doubled_or_assign(start, b'+', RawTag::Plus, RawTag::PlusPlus, RawTag::PlusEqual),
            b'-' => self.doubled_or_assign(start, b'-', RawTag::Minus, RawTag::MinusMinus, RawTag::MinusEqual),
            b'&' => self.doubled_or_assign(
                start,
                b'&',
                RawTag::Ampersand,
                RawTag::AmpersandAmpersand,
                RawTag::AmpersandEqual,
            ),
            b'|' => self.doubled_or_assign(start, b'|', RawTag::Pipe, RawTag::PipePipe, RawTag::PipeEqual),
            b'*' => self.with_assign(start, RawTag::Star, RawTag::StarEqual),
            b'%' => self.with_assign(start, RawTag::Percent, RawTag::PercentEqual),
            b'^' => self.with_assign(start, RawTag::Caret, RawTag::CaretEqual),
            0x80..=0xFF => self.non_ascii(start),
            // Interior nulls, other control characters, and `@ # \ \``.
            _ => self.single(RawTag::InvalidChar, start),
        }
    }

    #[inline]
    fn finish(&self, tag: RawTag, start: u32) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    #[inline]
    fn single(&mut self, tag: RawTag, start: u32) -> RawToken {
        self.cursor.advance();
        self.finish(tag, start)
    }

    fn with_assign(&mut self, start: u32, plain: RawTag, assign: RawTag) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == b'=' {
            self.cursor.advance();
            return self.finish(assign, start);
        }
        self.finish(plain, start)
    }

    fn doubled_or_assign(
        &mut self,
        start: u32,
        byte: u8,
        plain: RawTag,
        doubled: RawTag,
        assign: RawTag,
    ) -> RawToken {
        if self.cursor.peek() == byte {
            self.cursor.advance_n(2);
            return self.finish(doubled, start);
        }
        self.with_assign(start, plain, assign)
    }

    // ─── Identifiers ───────────────────────────────────────────────

    fn identifier(&mut self, start: u32) -> RawToken {
        self.eat_identifier_parts();
        self.finish(RawTag::Ident, start)
    }

    fn eat_identifier_parts(&mut self) {
        loop {
            let b = self.cursor.current();
            if is_ascii_ident_part(b) {
                self.cursor.advance();
            } else if b >= 0x80
                && self
                    .cursor
                    .current_char()
                    .is_some_and(char::is_alphanumeric)
            {
                self.cursor.advance_char();
            } else {
                return;
            }
        }
    }

    fn non_ascii(&mut self, start: u32) -> RawToken {
        let Some(c) = self.cursor.current_char() else {
            return self.single(RawTag::InvalidChar, start);
        };
        self.cursor.advance_char();
        if is_line_break_char(c) {
            self.finish(RawTag::Newline, start)
        } else if is_unicode_space(c) {
            self.finish(RawTag::Whitespace, start)
        } else if c.is_alphabetic() {
            self.eat_identifier_parts();
            self.finish(RawTag::Ident, start)
        } else {
            self.finish(RawTag::InvalidChar, start)
        }
    }

    // ─── Numbers ───────────────────────────────────────────────────

    fn number(&mut self, start: u32) -> RawToken {
        let mut valid = true;
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            let digits = self.cursor.pos();
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            valid = self.cursor.pos() > digits;
        } else {
            self.cursor.eat_while(|b| b.is_ascii_digit());
            if self.cursor.current() == b'.' {
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
            valid &= self.exponent();
        }
        self.finish_number(start, valid)
    }

    /// `.5`, `.5e3`: called with the cursor on the dot.
    fn fraction_number(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let valid = self.exponent();
        self.finish_number(start, valid)
    }

    /// Optional exponent; `false` if `e` is not followed by digits.
    fn exponent(&mut self) -> bool {
        if !matches!(self.cursor.current(), b'e' | b'E') {
            return true;
        }
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        let digits = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        self.cursor.pos() > digits
    }

    fn finish_number(&mut self, start: u32, valid: bool) -> RawToken {
        // An identifier may not immediately follow a number; swallow it so
        // `3in` is one bad token instead of two good ones.
        let b = self.cursor.current();
        let glued = is_ascii_ident_start(b)
            || (b >= 0x80 && self.cursor.current_char().is_some_and(char::is_alphabetic));
        if glued {
            self.eat_identifier_parts();
        }
        let tag = if valid && !glued {
            RawTag::Number
        } else {
            RawTag::InvalidNumber
        };
        self.finish(tag, start)
    }

    // ─── Strings ───────────────────────────────────────────────────

    fn string(&mut self, start: u32) -> RawToken {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            match self.cursor.skip_to_string_delim(quote) {
                b'\\' => {
                    self.cursor.advance();
                    if self.cursor.is_eof() {
                        return self.finish(RawTag::UnterminatedString, start);
                    }
                    if self.cursor.current() == b'\r' && self.cursor.peek() == b'\n' {
                        self.cursor.advance_n(2);
                    } else {
                        self.cursor.advance_char();
                    }
                }
                b'\n' | b'\r' | 0 => return self.finish(RawTag::UnterminatedString, start),
                _ => {
                    self.cursor.advance();
                    return self.finish(RawTag::String, start);
                }
            }
        }
    }

    // ─── Slash: comments, regex, division ──────────────────────────

    fn slash(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.eat_until_line_break();
                return self.finish(RawTag::LineComment, start);
            }
            b'*' => {
                self.cursor.advance_n(2);
                let tag = if self.cursor.eat_block_comment_body() {
                    RawTag::BlockComment
                } else {
                    RawTag::UnterminatedBlockComment
                };
                return self.finish(tag, start);
            }
            _ => {}
        }
        if self.mode == LexMode::RegularExpression {
            if let Some(token) = self.regex(start) {
                return token;
            }
        }
        self.with_assign(start, RawTag::Slash, RawTag::SlashEqual)
    }

    /// Regular expression body and flags, or `None` (cursor untouched) when
    /// no closing `/` appears before the end of the line.
    fn regex(&mut self, start: u32) -> Option<RawToken> {
        let saved = self.cursor;
        self.cursor.advance();
        let mut in_class = false;
        loop {
            if self.at_line_end() {
                self.cursor = saved;
                return None;
            }
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    if self.at_line_end() {
                        self.cursor = saved;
                        return None;
                    }
                    self.cursor.advance_char();
                }
                b'[' => {
                    in_class = true;
                    self.cursor.advance();
                }
                b']' => {
                    in_class = false;
                    self.cursor.advance();
                }
                b'/' if !in_class => {
                    self.cursor.advance();
                    break;
                }
                _ => self.cursor.advance_char(),
            }
        }
        self.eat_identifier_parts();
        Some(self.finish(RawTag::Regex, start))
    }

    fn at_line_end(&self) -> bool {
        self.cursor.is_eof()
            || matches!(self.cursor.current(), b'\n' | b'\r')
            || self.cursor.at_unicode_line_separator()
    }

    // ─── Other punctuation ─────────────────────────────────────────

    fn dot(&mut self, start: u32) -> RawToken {
        if self.cursor.peek().is_ascii_digit() {
            return self.fraction_number(start);
        }
        if self.cursor.peek() == b'.' && self.cursor.peek2() == b'.' {
            self.cursor.advance_n(3);
            return self.finish(RawTag::DotDotDot, start);
        }
        self.single(RawTag::Dot, start)
    }

    fn less(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() == b'<' {
            self.cursor.advance();
            return self.with_assign(start, RawTag::Shl, RawTag::ShlEqual);
        }
        self.with_assign(start, RawTag::Less, RawTag::LessEqual)
    }

    /// `>` stands alone unless the parser asked for compound operators.
    fn greater(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if self.mode != LexMode::GreaterThanCompound {
            return self.finish(RawTag::Greater, start);
        }
        match (self.cursor.current(), self.cursor.peek(), self.cursor.peek2()) {
            (b'>', b'>', b'=') => {
                self.cursor.advance_n(3);
                self.finish(RawTag::UnsignedShrEqual, start)
            }
            (b'>', b'>', _) => {
                self.cursor.advance_n(2);
                self.finish(RawTag::UnsignedShr, start)
            }
            (b'>', b'=', _) => {
                self.cursor.advance_n(2);
                self.finish(RawTag::ShrEqual, start)
            }
            (b'>', _, _) => {
                self.cursor.advance();
                self.finish(RawTag::Shr, start)
            }
            (b'=', _, _) => {
                self.cursor.advance();
                self.finish(RawTag::GreaterEqual, start)
            }
            _ => self.finish(RawTag::Greater, start),
        }
    }

    fn equal(&mut self, start: u32) -> RawToken {
        match (self.cursor.peek(), self.cursor.peek2()) {
            (b'=', b'=') => {
                self.cursor.advance_n(3);
                self.finish(RawTag::EqualEqualEqual, start)
            }
            (b'=', _) => {
                self.cursor.advance_n(2);
                self.finish(RawTag::EqualEqual, start)
            }
            (b'>', _) => {
                self.cursor.advance_n(2);
                self.finish(RawTag::FatArrow, start)
            }
            _ => self.single(RawTag::Equal, start),
        }
    }

    fn bang(&mut self, start: u32) -> RawToken {
        match (self.cursor.peek(), self.cursor.peek2()) {
            (b'=', b'=') => {
                self.cursor.advance_n(3);
                self.finish(RawTag::BangEqualEqual, start)
            }
            (b'=', _) => {
                self.cursor.advance_n(2);
                self.finish(RawTag::BangEqual, start)
            }
            _ => self.single(RawTag::Bang, start),
        }
    }
}

#[cfg(test)]
mod tests;
