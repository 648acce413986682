use paydesk_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![headline(&error.code).to_string(), String::new()];
    lines.push(format!("  Error:    {}", error.code));
    lines.push(format!("  Details:  {}", error.message));

    if let Some(data) = &error.data {
        if let Some(source) = data.get("source").and_then(Value::as_str) {
            lines.push(format!("  Source:   {source}"));
        }
        if let Some(status) = data.get("status").and_then(Value::as_i64) {
            lines.push(format!("  Status:   {status}"));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Run the command again.".to_string());
    }
    lines.extend(
        error
            .recovery_steps
            .iter()
            .enumerate()
            .map(|(index, step)| format!("  {}. {step}", index + 1)),
    );

    lines.join("\n")
}

fn headline(code: &str) -> &'static str {
    match code {
        "source_unreadable" | "source_malformed" | "source_rejected" => {
            "No records were shown because a source could not be loaded."
        }
        "invalid_argument" => "The command could not run with those arguments.",
        "record_not_found" => "Nothing matched that code.",
        _ => "Something went wrong while building the view.",
    }
}
