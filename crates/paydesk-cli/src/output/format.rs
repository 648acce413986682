use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_TABLE_COLUMN_WIDTH: usize = 6;
const BAR_GLYPH: char = '#';

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

/// Width in characters; merchant names are often Hangul, so bytes overcount.
pub fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| {
            format!("{padding}{}  {value}", pad(label, label_width, Align::Left))
                .trim_end()
                .to_string()
        })
        .collect()
}

/// A proportional bar; any non-zero value gets at least one glyph.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || width == 0 {
        return String::new();
    }
    let scaled = ((value / max) * width as f64).round() as usize;
    BAR_GLYPH.to_string().repeat(scaled.clamp(1, width))
}

pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    if should_fallback_to_blocks(columns.len(), max_width) {
        return render_blocks(columns, rows, block_label);
    }

    let natural = natural_column_widths(columns, rows);
    let minimums = columns
        .iter()
        .map(|column| cmp::max(display_width(column.name), MIN_TABLE_COLUMN_WIDTH))
        .collect::<Vec<usize>>();
    let available = max_width.saturating_sub(INDENT);
    let gap_total = COLUMN_GAP * columns.len().saturating_sub(1);
    let budget = available.saturating_sub(gap_total);

    let Some(widths) = fit_widths_to_budget(&natural, &minimums, budget) else {
        return render_blocks(columns, rows, block_label);
    };

    let headers = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &headers, &widths)];

    for row in rows {
        let wrapped = wrap_row(row, &widths);
        let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line_index in 0..max_lines {
            let line_cells = wrapped
                .iter()
                .map(|chunks| chunks.get(line_index).cloned().unwrap_or_default())
                .collect::<Vec<String>>();
            output.push(format_row(columns, &line_cells, &widths));
        }
    }

    output
}

fn should_fallback_to_blocks(column_count: usize, max_width: usize) -> bool {
    let minimum = INDENT
        + (MIN_TABLE_COLUMN_WIDTH * column_count)
        + (COLUMN_GAP * column_count.saturating_sub(1));
    max_width < minimum
}

fn natural_column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| display_width(column.name))
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, display_width(value));
            }
        }
    }

    widths
}

/// Shrinks the widest columns first until the row fits, never below a
/// column's minimum.
fn fit_widths_to_budget(
    natural: &[usize],
    minimums: &[usize],
    budget: usize,
) -> Option<Vec<usize>> {
    if natural.len() != minimums.len() {
        return None;
    }

    let min_total = minimums.iter().sum::<usize>();
    if min_total > budget {
        return None;
    }

    let mut widths = natural.to_vec();
    let mut total = widths.iter().sum::<usize>();

    while total > budget {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > minimums[*index])
            .max_by_key(|(index, width)| (**width, cmp::Reverse(*index)))
            .map(|(index, _)| index);
        let Some(index) = widest else {
            return None;
        };
        widths[index] -= 1;
        total -= 1;
    }

    Some(widths)
}

fn wrap_row(row: &[String], widths: &[usize]) -> Vec<Vec<String>> {
    widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let value = row.get(index).map(String::as_str).unwrap_or("");
            wrap_text(value, *width)
        })
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(MIN_TABLE_COLUMN_WIDTH);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            pad(value, width, column.align)
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join("  "))
        .trim_end()
        .to_string()
}

fn wrap_text(value: &str, width: usize) -> Vec<String> {
    if width == 0 || display_width(value) <= width {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        let word_width = display_width(word);
        if !current.is_empty() && display_width(&current) + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word_width <= width {
            current.push_str(word);
        } else {
            let mut chunks = split_long_token(word, width);
            if let Some(last) = chunks.pop() {
                lines.extend(chunks);
                current = last;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        return split_long_token(value, width);
    }

    lines
}

fn split_long_token(token: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![token.to_string()];
    }

    token
        .chars()
        .collect::<Vec<char>>()
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));

        let entries = labels
            .iter()
            .enumerate()
            .map(|(column_index, label)| {
                (
                    label.as_str(),
                    row.get(column_index).cloned().unwrap_or_default(),
                )
            })
            .collect::<Vec<(&str, String)>>();
        output.extend(key_value_rows(&entries, 4));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::{
        Column, bar, display_width, fit_widths_to_budget, key_value_rows, render_table_or_blocks,
        split_long_token, wrap_text,
    };

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Payment:", "PAY-001".to_string()),
                ("Merchant code:", "MCHT-001".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Payment:        PAY-001");
        assert_eq!(rows[1], "  Merchant code:  MCHT-001");
    }

    #[test]
    fn hangul_is_measured_in_characters() {
        assert_eq!(display_width("블루보틀"), 4);

        let columns = [Column::left("Merchant"), Column::right("Amount")];
        let rows = vec![
            vec!["블루보틀".to_string(), "4,500".to_string()],
            vec!["Harbor Mart".to_string(), "120,000".to_string()],
        ];
        let rendered = render_table_or_blocks(&columns, &rows, 80, "Payment");
        assert_eq!(rendered[1], format!("  블루보틀{}4,500", " ".repeat(11)));
        assert_eq!(rendered[2], "  Harbor Mart  120,000");
    }

    #[test]
    fn table_renderer_wraps_without_truncating() {
        let columns = [Column::left("Merchant"), Column::right("Amount")];
        let rows = vec![vec![
            "SKYLINE TRAVEL AGENCY GANGNAM BRANCH".to_string(),
            "1,200,000".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns, &rows, 30, "Payment");
        assert!(rendered[0].contains("Merchant"));
        assert!(rendered.iter().any(|line| line.contains("SKYLINE")));
        assert!(rendered.iter().any(|line| line.contains("BRANCH")));
        assert!(rendered.iter().any(|line| line.contains("1,200,000")));
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column::left("Payment"),
            Column::left("Merchant"),
            Column::right("Amount"),
            Column::left("Status"),
        ];
        let rows = vec![vec![
            "PAY-001".to_string(),
            "Blue Bottle".to_string(),
            "4,500".to_string(),
            "Paid".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns, &rows, 20, "Payment");
        assert_eq!(rendered[0], "  Payment 1:");
        assert!(rendered[1].contains("Payment:"));
        assert!(rendered[3].contains("Amount:"));
        assert!(rendered[4].ends_with("Paid"));
    }

    #[test]
    fn fit_widths_shrinks_the_widest_column_first() {
        let fitted = fit_widths_to_budget(&[20, 12], &[8, 10], 26);
        assert_eq!(fitted, Some(vec![14, 12]));

        let impossible = fit_widths_to_budget(&[20, 12], &[8, 10], 17);
        assert_eq!(impossible, None);
    }

    #[test]
    fn bar_scales_and_keeps_small_values_visible() {
        assert_eq!(bar(50.0, 100.0, 10), "#####");
        assert_eq!(bar(1.0, 1000.0, 10), "#");
        assert_eq!(bar(0.0, 1000.0, 10), "");
        assert_eq!(bar(5.0, 0.0, 10), "");
    }

    #[test]
    fn long_tokens_split_on_characters() {
        assert_eq!(split_long_token("스카이라인", 3), vec!["스카이", "라인"]);
        assert_eq!(wrap_text("a verylongword", 5), vec!["a", "veryl", "ongwo", "rd"]);
    }
}
