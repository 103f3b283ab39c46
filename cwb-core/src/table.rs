//! Plain-text table renderer.
//!
//! Pure functions of their inputs: rows plus an ordered list of [`Column`]s
//! in, text out. Knows nothing about observations.

use std::cmp::Ordering;

/// How one column pulls and displays a value from a row.
pub struct Column<R> {
    pub header: &'static str,
    pub accessor: fn(&R) -> &str,
    pub formatter: Option<fn(&str) -> String>,
}

impl<R> Column<R> {
    pub fn new(header: &'static str, accessor: fn(&R) -> &str) -> Self {
        Self { header, accessor, formatter: None }
    }

    pub fn with_formatter(mut self, formatter: fn(&str) -> String) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn cell(&self, row: &R) -> String {
        let raw = (self.accessor)(row);
        match self.formatter {
            Some(format) => format(raw),
            None => raw.to_string(),
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("formatted", &self.formatter.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Header line, separator line, then one line per row.
pub fn render<R>(rows: &[R], columns: &[Column<R>]) -> String {
    let cells: Vec<Vec<String>> =
        rows.iter().map(|row| columns.iter().map(|c| c.cell(row)).collect()).collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|line| display_width(&line[i]))
                .chain(std::iter::once(display_width(c.header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, columns.iter().map(|c| c.header), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for line in &cells {
        push_line(&mut out, line.iter().map(String::as_str), &widths);
    }
    out
}

/// Stable sort by the raw value of `column`.
pub fn sort_rows<R>(rows: &mut [R], column: &Column<R>, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = compare_values((column.accessor)(a), (column.accessor)(b));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

// Total order: numbers first, by value; then text, lexically.
fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(display_width(cell))));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Terminal cells taken by `s`; CJK and fullwidth characters take two.
///
/// Approximate: emoji and other wide code points outside these ranges count
/// as one cell, so such cells can misalign.
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x20000..=0x3FFFD
    )
}
