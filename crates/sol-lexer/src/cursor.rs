/// Character iterator over source text that tracks the byte offset.
pub struct Cursor<'src> {
    source: &'src str,
    pos: u32,
    chars: std::str::Chars<'src>,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            chars: source.chars(),
        }
    }

    /// The current character, not consumed.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// The character after the current one, not consumed.
    pub fn peek_next(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next()
    }

    /// Whether the unconsumed input starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.chars.as_str().starts_with(prefix)
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    /// Consume `n` characters (or until end of input).
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Source text between two byte offsets.
    ///
    /// # Panics
    ///
    /// Panics if the offsets are out of bounds or not on UTF-8 boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'src str {
        &self.source[start as usize..end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('b'));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn advance_tracks_multibyte_utf8() {
        let mut cursor = Cursor::new("\u{00E9}a");
        assert_eq!(cursor.advance(), Some('\u{00E9}'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn starts_with_and_advance_by() {
        let mut cursor = Cursor::new("/* x */");
        assert!(cursor.starts_with("/*"));
        cursor.advance_by(2);
        assert_eq!(cursor.pos(), 2);
        assert!(!cursor.starts_with("/*"));
        cursor.advance_by(100);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn eat_while_and_slice() {
        let mut cursor = Cursor::new("uint256 x");
        cursor.eat_while(|c| c.is_ascii_alphanumeric());
        assert_eq!(cursor.pos(), 7);
        assert_eq!(cursor.slice(0, 7), "uint256");
    }
}
