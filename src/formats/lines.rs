//! Lazy line reader shared by the text formats.

use std::io::{self, BufRead};

/// Iterator over the lines of a buffered reader.
///
/// Each line has its `\n` or `\r\n` terminator removed; nothing else is
/// trimmed. With `skip_blanks`, lines that are empty after trimming
/// whitespace are not yielded. The underlying reader is consumed as the
/// iterator advances, so it cannot be restarted.
pub struct LineSource<R> {
    reader: R,
    skip_blanks: bool,
    buf: String,
    line_number: usize,
}

impl<R: BufRead> LineSource<R> {
    /// Yields every line, blank ones included.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skip_blanks: false,
            buf: String::new(),
            line_number: 0,
        }
    }

    /// Yields only lines with non-whitespace content.
    pub fn skipping_blanks(reader: R) -> Self {
        Self {
            skip_blanks: true,
            ..Self::new(reader)
        }
    }

    /// 1-based number of the last line read from the underlying reader.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(Some(self.buf.clone()))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_line() {
                Ok(Some(line)) if self.skip_blanks && line.trim().is_empty() => continue,
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
