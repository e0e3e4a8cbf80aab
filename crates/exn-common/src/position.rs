//! Line/column positions for diagnostic rendering.

/// A zero-based line and character position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Maps byte offsets of a source text to line/column positions.
#[derive(Clone, Debug)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map. `\r\n`, `\r` and `\n` all terminate a line.
    #[must_use]
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        let mut pos = 0usize;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\r' => {
                    if pos + 1 < bytes.len() && bytes[pos + 1] == b'\n' {
                        pos += 1;
                    }
                    line_starts.push((pos + 1) as u32);
                }
                b'\n' => line_starts.push((pos + 1) as u32),
                _ => {}
            }
            pos += 1;
        }
        LineMap { line_starts }
    }

    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        Position {
            line: line as u32,
            character: offset - self.line_starts[line],
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
