//! CSV tokenizer and header-keyed row mapping
//!
//! Converts raw sheet text into [`RawRow`] values. The scanner understands:
//! - commas inside quoted cells
//! - escaped quotes (`""`)
//! - line breaks inside quoted cells
//! - `\n`, `\r\n` and bare `\r` line endings
//!
//! There is no notion of invalid CSV here. Unterminated quotes and ragged rows
//! are tolerated and every input yields a (possibly empty) list of rows.

use std::collections::HashMap;

/// One data line of a sheet, keyed by trimmed header name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    /// Build a row from header/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Cell value for `header`, or `""` when the column is absent
    pub fn get(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }

    /// Whether the sheet carried this column at all
    pub fn has_column(&self, header: &str) -> bool {
        self.cells.contains_key(header)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Trim whitespace and byte-order marks
///
/// Sheet exports often start with U+FEFF, which `str::trim` leaves in place
/// and which would otherwise end up glued to the first header name.
fn trim_cell(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Split text into rows of untrimmed cells
fn tokenize(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                _ => cell.push(ch),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut cell)),
            '\n' | '\r' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }

    // Trailing partial row (also covers an unterminated quote at EOF)
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

/// Parse CSV text into header-keyed rows
///
/// The first row is the header. Each later row is zipped positionally against
/// it: extra cells are dropped, missing cells become `""`, and all values are
/// trimmed. Rows where every cell is blank are skipped.
///
/// # Examples
///
/// ```
/// use cabinet_common::csv::parse;
///
/// let rows = parse("lesson_id,title\nl1,\"Hello, world\"\n");
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("title"), "Hello, world");
/// assert!(parse("").is_empty());
/// ```
pub fn parse(text: &str) -> Vec<RawRow> {
    let mut rows = tokenize(text).into_iter();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|h| trim_cell(h).to_string()).collect(),
        None => return Vec::new(),
    };

    rows.filter(|cells| cells.iter().any(|c| !trim_cell(c).is_empty()))
        .map(|cells| {
            RawRow::from_pairs(headers.iter().enumerate().map(|(idx, header)| {
                let value = cells.get(idx).map(|c| trim_cell(c)).unwrap_or("");
                (header.clone(), value.to_string())
            }))
        })
        .collect()
}
