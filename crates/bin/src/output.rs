//! Output formatting helpers for human-readable listings.

/// Longest cell printed before it is cut with an ellipsis.
const MAX_CELL_CHARS: usize = 40;

/// Print a table with aligned columns.
///
/// `headers` and each row in `rows` must have the same length. Widths are
/// measured in characters so non-ASCII titles stay aligned.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in render_table(headers, rows) {
        println!("{line}");
    }
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| shorten(cell)).collect())
        .collect();

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(headers.to_vec()));
    for row in &rows {
        lines.push(format_row(
            row.iter().take(col_count).map(String::as_str).collect(),
        ));
    }
    lines
}

fn shorten(cell: &str) -> String {
    let single_line = cell.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_CELL_CHARS {
        return single_line;
    }
    let kept: String = single_line.chars().take(MAX_CELL_CHARS - 1).collect();
    format!("{kept}…")
}
