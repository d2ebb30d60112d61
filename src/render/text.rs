//! Plain text preview renderer.

use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::model::{Block, Document, Table};

/// Marker printed for a hard page break.
pub const PAGE_BREAK_MARKER: &str = "--- page break ---";

/// Convert a Document to a plain text preview.
///
/// Tables are drawn as ASCII grids; page breaks become
/// [`PAGE_BREAK_MARKER`] lines.
pub fn to_text(doc: &Document) -> Result<String> {
    let mut output = String::new();

    if let Some(ref title) = doc.metadata.title {
        output.push_str(title);
        output.push_str("\n\n");
    }

    for block in doc.blocks() {
        match block {
            Block::Paragraph(para) => {
                output.push_str(&para.plain_text());
                output.push_str("\n\n");
            }
            Block::Table(table) => {
                output.push_str(&render_table_text(table));
                output.push('\n');
            }
            Block::PageBreak => {
                output.push_str(PAGE_BREAK_MARKER);
                output.push_str("\n\n");
            }
        }
    }

    Ok(output.trim_end().to_string())
}

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.extend(std::iter::repeat(fill).take(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

/// Render a table as an ASCII grid.
fn render_table_text(table: &Table) -> String {
    let col_count = table.column_count();
    if col_count == 0 {
        return String::new();
    }

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            (0..col_count)
                .map(|i| {
                    row.cells
                        .get(i)
                        .map(|c| c.plain_text().replace(['\n', '\t'], " "))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    // Minimum width of 3 for readability
    let mut widths = vec![3; col_count];
    for row in &rows {
        for (i, text) in row.iter().enumerate() {
            widths[i] = widths[i].max(text.width());
        }
    }

    let mut output = border(&widths, '-');
    for (row, source) in rows.iter().zip(&table.rows) {
        output.push('|');
        for (text, width) in row.iter().zip(&widths) {
            output.push(' ');
            output.push_str(&pad(text, *width));
            output.push_str(" |");
        }
        output.push('\n');

        if source.is_header {
            output.push_str(&border(&widths, '='));
        }
    }
    output.push_str(&border(&widths, '-'));

    output
}
