use std::io;

use serde_json::Value;

use super::format::{self, Column};

pub fn render_payments(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "payments")?;
    let heading = match data.get("view").and_then(Value::as_str) {
        Some("transactions") => "Transactions",
        _ => "Payments",
    };
    let total = count_at(data, &["pagination", "total_items"]);

    let mut lines = vec![format!("{heading} ({total} matching)")];
    if let Some(filters) = payment_filters_line(data.get("filters")) {
        lines.push(filters);
    }
    lines.push(sort_line(data));

    if total == 0 {
        lines.push(String::new());
        lines.push(format!("No {} match these filters.", heading.to_lowercase()));
        lines.push("Loosen the search, date range, or category flags and try again.".to_string());
        return Ok(lines.join("\n"));
    }

    let summary = data.get("summary").unwrap_or(&Value::Null);
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Matching:", text_at(summary, &["total_count"])),
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

    lines.push(String::new());
    let columns = [
        Column::left("Payment"),
        Column::left("Merchant"),
        Column::right("Amount"),
        Column::left("Method"),
        Column::left("Status"),
        Column::left("Paid at"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_at(row, &["payment_code"]),
                text_at(row, &["merchant_name"]),
                amount_with_currency(row),
                text_at(row, &["pay_type_label"]),
                text_at(row, &["status_label"]),
                local_or_raw(row, "payment_at"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Payment",
    ));

    lines.push(String::new());
    lines.extend(pager_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_merchants(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "merchants")?;
    let total = count_at(data, &["pagination", "total_items"]);

    let mut lines = vec![format!("Merchants ({total} matching)")];
    if let Some(filters) = merchant_filters_line(data.get("filters")) {
        lines.push(filters);
    }
    lines.push(sort_line(data));

    let stats = data.get("stats").unwrap_or(&Value::Null);
    lines.push(String::new());
    lines.push(format!(
        "All merchants: {}",
        text_at(stats, &["total_count"])
    ));
    lines.push(format!("  By status:    {}", breakdown_inline(stats.get("by_status"))));
    lines.push(format!(
        "  By business:  {}",
        breakdown_inline(stats.get("by_biz_type"))
    ));

    if total == 0 {
        lines.push(String::new());
        lines.push("No merchants match these filters.".to_string());
        return Ok(lines.join("\n"));
    }

    lines.push(String::new());
    let columns = [
        Column::left("Code"),
        Column::left("Name"),
        Column::left("Business"),
        Column::left("Status"),
        Column::left("Registered"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_at(row, &["mcht_code"]),
                text_at(row, &["mcht_name"]),
                text_at(row, &["biz_type_label"]),
                text_at(row, &["status_label"]),
                local_or_raw(row, "registered_at"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Merchant",
    ));

    lines.push(String::new());
    lines.extend(pager_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_payment_detail(data: &Value) -> io::Result<String> {
    let payment = data
        .get("payment")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("payment detail output requires a payment"))?;

    let mut lines = vec![
        format!("Payment {}", text_at(payment, &["payment_code"])),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Amount:", amount_with_currency(payment)),
            (
                "Method:",
                labelled(payment, "pay_type_label", "pay_type"),
            ),
            ("Status:", labelled(payment, "status_label", "status")),
            ("Paid at:", local_or_raw(payment, "payment_at")),
            ("Merchant code:", text_at(payment, &["mcht_code"])),
        ],
        2,
    ));

    lines.push(String::new());
    match data.get("merchant").filter(|value| value.is_object()) {
        Some(merchant) => {
            lines.push("Merchant:".to_string());
            lines.extend(profile_rows(merchant));
        }
        None => {
            lines.push("Merchant:".to_string());
            lines.push("  Not in the merchant list.".to_string());
        }
    }

    Ok(lines.join("\n"))
}

pub fn render_merchant_detail(data: &Value) -> io::Result<String> {
    let merchant = data
        .get("merchant")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("merchant detail output requires a merchant"))?;

    let mut lines = vec![
        format!(
            "Merchant {} ({})",
            text_at(merchant, &["mcht_name"]),
            text_at(merchant, &["mcht_code"])
        ),
        String::new(),
    ];
    lines.extend(profile_rows(merchant));
    lines.push(String::new());
    lines.push(format!(
        "Run `paydesk payments --search \"{}\"` to list this merchant's payments.",
        text_at(merchant, &["mcht_name"])
    ));
    Ok(lines.join("\n"))
}

fn profile_rows(merchant: &Value) -> Vec<String> {
    format::key_value_rows(
        &[
            ("Name:", text_at(merchant, &["mcht_name"])),
            ("Code:", text_at(merchant, &["mcht_code"])),
            (
                "Business:",
                labelled(merchant, "biz_type_label", "biz_type"),
            ),
            ("Status:", labelled(merchant, "status_label", "status")),
            ("Business no:", optional_text(merchant, "biz_no")),
            ("Address:", optional_text(merchant, "address")),
            ("Phone:", optional_text(merchant, "phone")),
            ("Email:", optional_text(merchant, "email")),
            ("Registered:", local_or_raw(merchant, "registered_at")),
            ("Updated:", local_or_raw(merchant, "updated_at")),
        ],
        2,
    )
}

/// The footer: visible range plus the numbered window, current page in brackets.
pub(crate) fn pager_lines(data: &Value) -> Vec<String> {
    let pagination = data.get("pagination").unwrap_or(&Value::Null);
    let page = count_at(pagination, &["page"]);
    let total_pages = count_at(pagination, &["total_pages"]);
    let total_items = count_at(pagination, &["total_items"]);

    if pagination.get("past_end").and_then(Value::as_bool) == Some(true) {
        return vec![format!(
            "Page {page} is past the end; there are {total_pages} page(s). Use `--page 1` to start over."
        )];
    }

    let mut lines = vec![format!(
        "Showing {} - {} of {total_items}",
        count_at(pagination, &["first_position"]),
        count_at(pagination, &["last_position"])
    )];

    let markers = pagination
        .get("window")
        .and_then(Value::as_array)
        .map(|window| {
            window
                .iter()
                .map(|marker| match marker.get("page").and_then(Value::as_u64) {
                    Some(number) if number as usize == page => format!("[{number}]"),
                    Some(number) => number.to_string(),
                    None => "...".to_string(),
                })
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    if markers.len() > 1 {
        lines.push(format!("Pages:  {}", markers.join(" ")));
    }
    if page < total_pages {
        lines.push(format!("Next:   add `--page {}`", page + 1));
    }

    lines
}

fn sort_line(data: &Value) -> String {
    let order = match text_at(data, &["sort", "order"]).as_str() {
        "desc" => "descending",
        _ => "ascending",
    };
    format!("Sorted by {} ({order})", text_at(data, &["sort", "field"]))
}

fn payment_filters_line(filters: Option<&Value>) -> Option<String> {
    let filters = filters?;
    let mut parts = Vec::new();
    if let Some(search) = filters.get("search").and_then(Value::as_str) {
        parts.push(format!("merchant \"{search}\""));
    }
    let from = filters.get("from").and_then(Value::as_str);
    let to = filters.get("to").and_then(Value::as_str);
    match (from, to) {
        (Some(from), Some(to)) => parts.push(format!("{from} to {to}")),
        (Some(from), None) => parts.push(format!("from {from}")),
        (None, Some(to)) => parts.push(format!("through {to}")),
        (None, None) => {}
    }
    if let Some(codes) = joined_codes(filters.get("pay_types")) {
        parts.push(format!("method {codes}"));
    }
    if let Some(codes) = joined_codes(filters.get("statuses")) {
        parts.push(format!("status {codes}"));
    }
    let min = filters.get("min_amount").and_then(Value::as_str);
    let max = filters.get("max_amount").and_then(Value::as_str);
    match (min, max) {
        (Some(min), Some(max)) => parts.push(format!("amount {min} to {max}")),
        (Some(min), None) => parts.push(format!("amount at least {min}")),
        (None, Some(max)) => parts.push(format!("amount at most {max}")),
        (None, None) => {}
    }
    filters_line(parts)
}

fn merchant_filters_line(filters: Option<&Value>) -> Option<String> {
    let filters = filters?;
    let mut parts = Vec::new();
    if let Some(search) = filters.get("search").and_then(Value::as_str) {
        parts.push(format!("name or code \"{search}\""));
    }
    if let Some(codes) = joined_codes(filters.get("biz_types")) {
        parts.push(format!("business {codes}"));
    }
    if let Some(codes) = joined_codes(filters.get("statuses")) {
        parts.push(format!("status {codes}"));
    }
    filters_line(parts)
}

fn filters_line(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(format!("Filters: {}", parts.join("; ")))
    }
}

fn joined_codes(value: Option<&Value>) -> Option<String> {
    let codes = value?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<&str>>();
    if codes.is_empty() {
        None
    } else {
        Some(codes.join(" or "))
    }
}

pub(crate) fn breakdown_inline(entries: Option<&Value>) -> String {
    entries
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    format!(
                        "{} {}",
                        text_at(entry, &["label"]),
                        text_at(entry, &["count"])
                    )
                })
                .collect::<Vec<String>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn rows_of<'a>(data: &'a Value, command: &str) -> io::Result<&'a Vec<Value>> {
    data.get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("{command} output requires rows")))
}

fn amount_with_currency(row: &Value) -> String {
    let amount = text_at(row, &["amount_display"]);
    match row.get("currency").and_then(Value::as_str) {
        Some(currency) if !currency.is_empty() => format!("{amount} {currency}"),
        _ => amount,
    }
}

fn labelled(row: &Value, label_key: &str, code_key: &str) -> String {
    format!(
        "{} ({})",
        text_at(row, &[label_key]),
        text_at(row, &[code_key])
    )
}

fn local_or_raw(row: &Value, key: &str) -> String {
    row.get(format!("{key}_local").as_str())
        .and_then(Value::as_str)
        .map(std::string::ToString::to_string)
        .unwrap_or_else(|| text_at(row, &[key]))
}

fn optional_text(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

pub(crate) fn count_at(value: &Value, path: &[&str]) -> usize {
    lookup(value, path)
        .and_then(Value::as_u64)
        .map(|count| count as usize)
        .unwrap_or(0)
}

pub(crate) fn text_at(value: &Value, path: &[&str]) -> String {
    match lookup(value, path) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => "-".to_string(),
    }
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{pager_lines, render_merchant_detail, render_payment_detail, render_payments};

    fn payments_data(rows: Value, total_items: usize) -> Value {
        json!({
            "view": "payments",
            "filters": {
                "search": "blue",
                "from": "2024-01-01",
                "to": null,
                "pay_types": [],
                "statuses": ["SUCCESS"],
                "min_amount": null,
                "max_amount": null
            },
            "sort": {"field": "payment_at", "order": "desc"},
            "pagination": {
                "page": 1,
                "page_size": 10,
                "total_items": total_items,
                "total_pages": 1,
                "first_position": 1,
                "last_position": total_items,
                "past_end": false,
                "window": [{"kind": "page", "page": 1}]
            },
            "summary": {
                "total_count": total_items,
                "success_count": 1,
                "success_rate": "100.0",
                "success_total": "4,500",
                "success_average": "4,500",
                "status_counts": []
            },
            "rows": rows
        })
    }

    #[test]
    fn payments_listing_shows_filters_summary_and_rows() {
        let data = payments_data(
            json!([{
                "payment_code": "PAY-001",
                "mcht_code": "MCHT-001",
                "merchant_name": "Blue Bottle",
                "amount": "4500",
                "amount_display": "4,500",
                "currency": "KRW",
                "pay_type": "ONLINE",
                "pay_type_label": "Online",
                "status": "SUCCESS",
                "status_label": "Paid",
                "payment_at": "2024-01-01T08:30:00",
                "payment_at_local": "2024-01-01 08:30:00"
            }]),
            1,
        );

        let rendered = render_payments(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Payments (1 matching)"));
            assert!(text.contains("Filters: merchant \"blue\"; from 2024-01-01; status SUCCESS"));
            assert!(text.contains("Sorted by payment_at (descending)"));
            assert!(text.contains("Paid:          1 (100.0%)"));
            assert!(text.contains("4,500 KRW"));
            assert!(text.contains("2024-01-01 08:30:00"));
            assert!(text.ends_with("Showing 1 - 1 of 1"));
        }
    }

    #[test]
    fn empty_listing_explains_itself() {
        let rendered = render_payments(&payments_data(json!([]), 0));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No payments match these filters."));
            assert!(!text.contains("Summary:"));
        }
    }

    #[test]
    fn pager_marks_current_page_and_gaps() {
        let data = json!({
            "pagination": {
                "page": 5,
                "total_items": 200,
                "total_pages": 20,
                "first_position": 41,
                "last_position": 50,
                "past_end": false,
                "window": [
                    {"kind": "page", "page": 1},
                    {"kind": "gap"},
                    {"kind": "page", "page": 4},
                    {"kind": "page", "page": 5},
                    {"kind": "page", "page": 6},
                    {"kind": "gap"},
                    {"kind": "page", "page": 20}
                ]
            }
        });
        let lines = pager_lines(&data);
        assert_eq!(lines[0], "Showing 41 - 50 of 200");
        assert_eq!(lines[1], "Pages:  1 ... 4 [5] 6 ... 20");
        assert_eq!(lines[2], "Next:   add `--page 6`");
    }

    #[test]
    fn past_end_page_points_back_to_the_start() {
        let data = json!({
            "pagination": {"page": 4, "total_pages": 1, "total_items": 8, "past_end": true}
        });
        let lines = pager_lines(&data);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Page 4 is past the end"));
    }

    #[test]
    fn payment_detail_without_merchant_says_so() {
        let data = json!({
            "payment": {
                "payment_code": "PAY-006",
                "mcht_code": "MCHT-999",
                "amount_display": "15,000",
                "currency": "KRW",
                "pay_type": "BILLING",
                "pay_type_label": "Billing",
                "status": "CANCELLED",
                "status_label": "Cancelled",
                "payment_at": "2024-01-03T23:59:00",
                "payment_at_local": null
            },
            "merchant": null
        });
        let rendered = render_payment_detail(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Payment PAY-006"));
            assert!(text.contains("Billing (BILLING)"));
            assert!(text.contains("2024-01-03T23:59:00"));
            assert!(text.contains("Not in the merchant list."));
        }
    }

    #[test]
    fn merchant_detail_fills_missing_contact_fields() {
        let data = json!({
            "merchant": {
                "mcht_code": "MCHT-003",
                "mcht_name": "Skyline Travel",
                "biz_type": "TRAVEL",
                "biz_type_label": "Travel",
                "status": "READY",
                "status_label": "Onboarding",
                "biz_no": null,
                "phone": "",
                "registered_at": "2023-11-20T09:00:00",
                "registered_at_local": "2023-11-20 09:00:00",
                "updated_at": "2023-11-20T09:00:00",
                "updated_at_local": "2023-11-20 09:00:00"
            }
        });
        let rendered = render_merchant_detail(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Merchant Skyline Travel (MCHT-003)"));
            assert!(text.contains("Onboarding (READY)"));
            assert!(text.contains("Phone:        -"));
            assert!(text.contains("paydesk payments --search \"Skyline Travel\""));
        }
        assert!(render_merchant_detail(&Value::Null).is_err());
    }
}
