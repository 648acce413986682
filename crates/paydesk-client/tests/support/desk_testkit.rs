use std::fs;
use std::path::Path;

use paydesk_client::{ClientResult, ConfigOverrides, SuccessEnvelope};
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub fn payment(
    payment_code: &str,
    mcht_code: &str,
    amount: &str,
    pay_type: &str,
    status: &str,
    payment_at: &str,
) -> Value {
    json!({
        "paymentCode": payment_code,
        "mchtCode": mcht_code,
        "amount": amount,
        "currency": "KRW",
        "payType": pay_type,
        "status": status,
        "paymentAt": payment_at,
    })
}

pub fn merchant(mcht_code: &str, mcht_name: &str, biz_type: &str, status: &str, registered_at: &str) -> Value {
    json!({
        "mchtCode": mcht_code,
        "mchtName": mcht_name,
        "bizType": biz_type,
        "status": status,
        "bizNo": "123-45-67890",
        "address": "12 Harbor Road",
        "phone": "02-555-0100",
        "email": format!("{}@merchants.test", mcht_code.to_lowercase()),
        "registeredAt": registered_at,
        "updatedAt": registered_at,
    })
}

pub fn envelope(rows: &[Value]) -> Value {
    json!({
        "status": 200,
        "message": "OK",
        "data": rows,
    })
}

pub fn standard_merchants() -> Vec<Value> {
    vec![
        merchant("MCHT-001", "Blue Bottle", "CAFE", "ACTIVE", "2024-01-03T09:00:00"),
        merchant("MCHT-002", "Harbor Mart", "MART", "ACTIVE", "2024-02-10T09:00:00"),
        merchant("MCHT-003", "Skyline Travel", "TRAVEL", "READY", "2023-11-20T09:00:00"),
        merchant("MCHT-004", "Code Academy", "EDU", "CLOSED", "2024-03-01T09:00:00"),
    ]
}

pub fn standard_payments() -> Vec<Value> {
    vec![
        payment("PAY-001", "MCHT-001", "4500", "ONLINE", "SUCCESS", "2024-01-01T08:30:00"),
        payment("PAY-002", "MCHT-002", "120000", "DEVICE", "SUCCESS", "2024-01-01T13:05:00"),
        payment("PAY-003", "MCHT-001", "5200", "MOBILE", "FAILED", "2024-01-02T08:45:00"),
        payment("PAY-004", "MCHT-003", "890000", "VACT", "PENDING", "2024-01-02T21:10:00"),
        payment("PAY-005", "MCHT-002", "35000", "ONLINE", "SUCCESS", "2024-01-03T10:15:00"),
        payment("PAY-006", "MCHT-999", "15000", "BILLING", "CANCELLED", "2024-01-03T23:59:00"),
        payment("PAY-007", "MCHT-003", "1200000", "VACT", "SUCCESS", "2024-01-03T11:00:00"),
        payment("PAY-008", "MCHT-001", "6100", "MOBILE", "SUCCESS", "2024-01-03T08:10:00"),
    ]
}

/// A data directory holding both response bodies in their envelopes.
pub fn data_dir_with(payments: &[Value], merchants: &[Value]) -> std::io::Result<TempDir> {
    let dir = Builder::new().prefix("paydesk-fixture").tempdir()?;
    write_envelope(dir.path(), "payments.json", payments)?;
    write_envelope(dir.path(), "merchants.json", merchants)?;
    Ok(dir)
}

pub fn standard_data_dir() -> std::io::Result<TempDir> {
    data_dir_with(&standard_payments(), &standard_merchants())
}

/// Pins every setting so the host environment cannot leak into a test.
pub fn overrides_for(dir: &TempDir) -> ConfigOverrides {
    ConfigOverrides {
        data_dir: Some(dir.path().to_path_buf()),
        utc_offset: Some("+09:00".to_string()),
        page_size: Some(10),
        ..ConfigOverrides::default()
    }
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}

pub fn row_field(rows: &Value, field: &str) -> Vec<String> {
    rows.as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.get(field).and_then(Value::as_str))
                .map(std::string::ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn write_envelope(base: &Path, name: &str, rows: &[Value]) -> std::io::Result<()> {
    let body = serde_json::to_string_pretty(&envelope(rows)).map_err(std::io::Error::other)?;
    fs::write(base.join(name), body)
}
