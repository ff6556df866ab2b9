// src/csv.rs
use std::io::{self, BufRead, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Streaming delimited-text reader (quotes + CRLF tolerant). std-only.
///
/// Yields one row at a time; a quoted field may span physical lines.
/// Blank lines are dropped, a leading BOM is stripped and bytes that are not
/// UTF-8 are replaced rather than failing the read.
pub struct RowReader<R> {
    reader: R,
    sep: char,
    buf: Vec<u8>,
    first: bool,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R, sep: char) -> Self {
        Self { reader, sep, buf: Vec::new(), first: true }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let sep = self.sep;
        let mut row = Vec::new();
        let mut field = s!();
        let mut in_quotes = false;

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    // Flush a trailing row even if quotes were unterminated
                    if in_quotes || !field.is_empty() || !row.is_empty() {
                        row.push(field);
                        return Some(Ok(row));
                    }
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            let text = String::from_utf8_lossy(&self.buf);
            let mut line: &str = &text;
            if self.first {
                self.first = false;
                line = line.strip_prefix('\u{feff}').unwrap_or(line);
            }

            let mut chars = line.chars().peekable();
            while let Some(ch) = chars.next() {
                match ch {
                    '"' => {
                        if in_quotes {
                            if matches!(chars.peek(), Some('"')) {
                                chars.next(); // double-quote escape
                                field.push('"');
                            } else {
                                in_quotes = false;
                            }
                        } else {
                            in_quotes = true;
                        }
                    }
                    c if c == sep && !in_quotes => row.push(take(&mut field)),
                    '\r' if !in_quotes => {}
                    '\n' if !in_quotes => {
                        row.push(take(&mut field));
                        if row.len() == 1 && row[0].is_empty() {
                            row.clear();
                        } else {
                            return Some(Ok(row));
                        }
                    }
                    _ => field.push(ch),
                }
            }
        }
    }
}

/// Column positions by header name, looked up once.
pub struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    pub fn new(header: &[String]) -> Self {
        Self { names: header.iter().map(|h| s!(h.trim())).collect() }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|h| h == name)
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
