//! Primitive line emitters
//!
//! A page is a sequence of elements, each written followed by a newline.
//! Headings, paragraphs and table ends carry one extra trailing newline of
//! their own, so they are followed by a blank line in the written file.

/// Which styling class a table body row gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Rows at even indices, starting with the first.
    Even,
    /// Rows at odd indices.
    Odd,
}

impl Parity {
    /// The parity of the row at `index`.
    #[must_use]
    pub const fn of(index: usize) -> Self {
        if index % 2 == 0 { Self::Even } else { Self::Odd }
    }

    const fn class(self) -> &'static str {
        match self {
            Self::Even => "even",
            Self::Odd => "odd",
        }
    }
}

/// A heading at `level`, e.g. `## Text`.
#[must_use]
pub fn heading(level: usize, text: &str) -> String {
    format!("{} {text}\n", "#".repeat(level))
}

/// A paragraph, terminated with a period unless it already ends in one.
///
/// The check ignores surrounding whitespace, but the text itself is kept
/// as-is.
#[must_use]
pub fn paragraph(text: &str) -> String {
    if text.trim().ends_with('.') {
        format!("{text}\n")
    } else {
        format!("{text}.\n")
    }
}

/// Opens a table and emits its header row.
#[must_use]
pub fn table_start(header: &[&str]) -> Vec<String> {
    let mut lines = vec![
        "<table>".to_string(),
        "<thead>".to_string(),
        "<tr class=\"header\">".to_string(),
    ];
    lines.extend(header.iter().map(|cell| cell_line(cell)));
    lines.extend(["</tr>", "</thead>", "<tbody>"].map(String::from));
    lines
}

/// A single body row.
#[must_use]
pub fn table_row<S: AsRef<str>>(cells: &[S], parity: Parity) -> Vec<String> {
    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format!("<tr class=\"{}\">", parity.class()));
    lines.extend(cells.iter().map(|cell| cell_line(cell.as_ref())));
    lines.push("</tr>".to_string());
    lines
}

/// Closes a table.
#[must_use]
pub fn table_end() -> Vec<String> {
    vec!["</tbody>".to_string(), "</table>\n".to_string()]
}

/// A complete table: header, then every row in order, then the close tags.
#[must_use]
pub fn table<I, R>(header: &[&str], rows: I) -> Vec<String>
where
    I: IntoIterator<Item = (R, Parity)>,
    R: AsRef<[String]>,
{
    let mut lines = table_start(header);
    for (cells, parity) in rows {
        lines.extend(table_row(cells.as_ref(), parity));
    }
    lines.extend(table_end());
    lines
}

fn cell_line(text: &str) -> String {
    format!("<th>{text}</th>")
}
