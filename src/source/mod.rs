
/// A forward-only cursor over an in-memory source buffer.
///
/// Tracks the line and column of the character under the cursor. Lines and
/// columns are 1-based and columns count characters, not bytes. A newline
/// belongs to the line it terminates.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        SourceCursor {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn current(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    pub fn peek(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next()?;
        chars.next()
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Byte offset of the current character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn advance(&mut self) {
        let Some(c) = self.current() else {
            return;
        };
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Moves forward until the cursor sits on `offset` (or the end of input).
    /// Never moves backwards.
    pub fn advance_to(&mut self, offset: usize) {
        while self.offset < offset && !self.is_eof() {
            self.advance();
        }
    }
}
