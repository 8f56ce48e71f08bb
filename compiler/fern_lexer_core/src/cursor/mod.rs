//! Cursor over a sentinel-terminated buffer.
//!
//! The cursor advances byte by byte. End of input is the sentinel (`0x00`)
//! at a position at or past the source length; a null byte inside the
//! source is an ordinary (invalid) character.

/// Earliest of two optional offsets, for combining `memchr` searches.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// `Copy`, so saving a position is free.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position; `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// At the sentinel, as opposed to an interior null byte.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Jump to `pos`, clamped to the end of the source.
    #[inline]
    pub fn reset_to(&mut self, pos: u32) {
        self.pos = pos.min(self.source_len);
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Advance while `pred` holds. `pred(0)` must be `false`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Width of the UTF-8 sequence introduced by `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Decode the character at the current position.
    ///
    /// `None` at end of input.
    pub fn current_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let start = self.pos as usize;
        let end = (start + Self::utf8_char_width(self.current()) as usize)
            .min(self.source_len as usize);
        std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next())
    }

    /// Whether the bytes at the cursor encode U+2028 or U+2029.
    #[inline]
    pub fn at_unicode_line_separator(&self) -> bool {
        self.current() == 0xE2 && self.peek() == 0x80 && matches!(self.peek2(), 0xA8 | 0xA9)
    }

    /// Advance to the next line break (`\n`, `\r`, U+2028, U+2029) or the end.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn eat_until_line_break(&mut self) {
        loop {
            let remaining = &self.buf[self.pos as usize..self.source_len as usize];
            let Some(offset) = memchr::memchr3(b'\n', b'\r', 0xE2, remaining) else {
                self.pos = self.source_len;
                return;
            };
            self.pos += offset as u32;
            if self.current() != 0xE2 || self.at_unicode_line_separator() {
                return;
            }
            self.advance();
        }
    }

    /// Advance past ordinary string content to the next byte a string
    /// scanner must look at: `quote`, `\`, `\n` or `\r`.
    ///
    /// Returns the byte found, or 0 at end of input.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);
        if let Some(off) = earliest_of(primary, cr) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance past the `*/` closing a multi-line comment.
    ///
    /// Returns `false` (cursor at end of input) when the comment is
    /// unterminated.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn eat_block_comment_body(&mut self) -> bool {
        loop {
            let remaining = &self.buf[self.pos as usize..self.source_len as usize];
            let Some(offset) = memchr::memchr(b'*', remaining) else {
                self.pos = self.source_len;
                return false;
            };
            self.pos += offset as u32 + 1;
            if self.current() == b'/' {
                self.advance();
                return true;
            }
        }
    }

    /// Advance past spaces, tabs, vertical tabs and form feeds.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | 0x0B | 0x0C));
    }
}
