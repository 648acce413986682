use std::io;

use serde_json::Value;

use super::format::{self, Column};
use super::table_text::{count_at, text_at};

const BAR_WIDTH: usize = 24;

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let today = data
        .get("today")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("dashboard output requires today"))?;

    let summary = data.get("summary").unwrap_or(&Value::Null);
    let mut lines = vec![format!("Dashboard for {today}"), String::new()];

    if count_at(summary, &["total_count"]) == 0 {
        lines.push("No payments loaded yet.".to_string());
        lines.push(
            "Save the payments response body to `payments.json` in the data directory."
                .to_string(),
        );
        return Ok(lines.join("\n"));
    }

    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Payments:", text_at(summary, &["total_count"])),
            (
                "Paid:",
                format!(
                    "{} ({}%)",
                    text_at(summary, &["success_count"]),
                    text_at(summary, &["success_rate"])
                ),
            ),
            ("Paid total:", text_at(summary, &["success_total"])),
            ("Paid average:", text_at(summary, &["success_average"])),
        ],
        2,
    ));

    let change = data.get("day_over_day").unwrap_or(&Value::Null);
    lines.push(String::new());
    lines.push("Today vs yesterday (paid total):".to_string());
    let today_label = format!("{}:", text_at(change, &["today"]));
    let yesterday_label = format!("{}:", text_at(change, &["yesterday"]));
    lines.extend(format::key_value_rows(
        &[
            (today_label.as_str(), text_at(change, &["today_total"])),
            (yesterday_label.as_str(), text_at(change, &["yesterday_total"])),
            (
                "Change:",
                signed_percent(&text_at(change, &["change_percent"])),
            ),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push(format!(
        "Daily paid totals (up to {} most recent days):",
        count_at(data, &["daily_window_days"])
    ));
    lines.extend(daily_lines(data.get("daily_totals")));

    lines.push(String::new());
    lines.push("Payments by hour:".to_string());
    lines.extend(hourly_lines(data.get("hourly")));

    lines.push(String::new());
    lines.push("Payment methods:".to_string());
    lines.extend(share_lines(data.get("pay_types")));

    lines.push(String::new());
    lines.push("Statuses:".to_string());
    lines.extend(share_lines(data.get("statuses")));

    lines.push(String::new());
    lines.push("Top merchants by paid amount:".to_string());
    lines.extend(top_merchant_lines(data.get("top_merchants")));

    Ok(lines.join("\n"))
}

fn daily_lines(days: Option<&Value>) -> Vec<String> {
    let days = array_of(days);
    if days.is_empty() {
        return vec!["  No paid payments yet.".to_string()];
    }
    let totals = days
        .iter()
        .map(|day| plain_number(&text_at(day, &["total_value"])))
        .collect::<Vec<f64>>();
    let max = totals.iter().copied().fold(0.0, f64::max);
    let width = days
        .iter()
        .map(|day| format::display_width(&text_at(day, &["total"])))
        .max()
        .unwrap_or(0);

    days.iter()
        .zip(totals)
        .map(|(day, total)| {
            let line = format!(
                "  {}  {:>width$}  {}",
                text_at(day, &["date"]),
                text_at(day, &["total"]),
                format::bar(total, max, BAR_WIDTH)
            );
            line.trim_end().to_string()
        })
        .collect()
}

fn hourly_lines(hours: Option<&Value>) -> Vec<String> {
    let hours = array_of(hours);
    let max = hours
        .iter()
        .map(|hour| count_at(hour, &["count"]))
        .max()
        .unwrap_or(0);
    let width = max.to_string().len();

    hours
        .iter()
        .map(|hour| {
            let count = count_at(hour, &["count"]);
            let line = format!(
                "  {:02}h  {count:>width$}  {}",
                count_at(hour, &["hour"]),
                format::bar(count as f64, max as f64, BAR_WIDTH)
            );
            line.trim_end().to_string()
        })
        .collect()
}

fn share_lines(entries: Option<&Value>) -> Vec<String> {
    let entries = array_of(entries);
    let label_width = entries
        .iter()
        .map(|entry| format::display_width(&text_at(entry, &["label"])))
        .max()
        .unwrap_or(0);
    let count_width = entries
        .iter()
        .map(|entry| text_at(entry, &["count"]).len())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| {
            let label = text_at(entry, &["label"]);
            let fill = " ".repeat(label_width.saturating_sub(format::display_width(&label)));
            let share = plain_number(&text_at(entry, &["share_percent"]));
            let line = format!(
                "  {label}{fill}  {:>count_width$}  {:>3}%  {}",
                text_at(entry, &["count"]),
                text_at(entry, &["share_percent"]),
                format::bar(share, 100.0, BAR_WIDTH)
            );
            line.trim_end().to_string()
        })
        .collect()
}

fn top_merchant_lines(rows: Option<&Value>) -> Vec<String> {
    let rows = array_of(rows);
    if rows.is_empty() {
        return vec!["  No paid payments yet.".to_string()];
    }

    let columns = [
        Column::right("#"),
        Column::left("Merchant"),
        Column::left("Code"),
        Column::right("Paid total"),
        Column::right("Paid count"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_at(row, &["rank"]),
                text_at(row, &["mcht_name"]),
                text_at(row, &["mcht_code"]),
                text_at(row, &["success_total"]),
                text_at(row, &["success_count"]),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Merchant")
}

fn signed_percent(value: &str) -> String {
    if value.starts_with('-') || value.chars().all(|c| c == '0' || c == '.') {
        format!("{value}%")
    } else {
        format!("+{value}%")
    }
}

/// Bar length input from an ungrouped decimal field; anything else draws no bar.
fn plain_number(value: &str) -> f64 {
    value.parse::<f64>().unwrap_or(0.0)
}

fn array_of(value: Option<&Value>) -> Vec<Value> {
    value
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
