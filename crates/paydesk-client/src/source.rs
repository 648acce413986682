use std::fs;
use std::io::{IsTerminal, Read};
use std::path::Path;

use chrono::FixedOffset;

use crate::config::{DeskConfig, is_stdin};
use crate::contracts::envelope::unwrap_api_envelope;
use crate::records::types::{MerchantDetail, MerchantWire, PaymentRecord, PaymentWire};
use crate::{ClientError, ClientResult};

/// Records loaded for one command run. Nothing is kept between runs.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub payments: Vec<PaymentRecord>,
    pub merchants: Vec<MerchantDetail>,
}

/// Which sources a view needs before any stage can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceNeeds {
    pub payments: bool,
    pub merchants: bool,
}

impl SourceNeeds {
    pub const PAYMENTS_WITH_MERCHANTS: Self = Self {
        payments: true,
        merchants: true,
    };
    pub const MERCHANTS_ONLY: Self = Self {
        payments: false,
        merchants: true,
    };
}

/// Loads every source the view needs. The first failure aborts the whole
/// load, so a view never renders against half of its data.
pub fn load_store(
    config: &DeskConfig,
    needs: SourceNeeds,
    stdin_override: Option<String>,
) -> ClientResult<RecordStore> {
    let mut stdin_body = stdin_override;

    let payments = if needs.payments {
        load_payments(&config.payments_source, config.utc_offset, &mut stdin_body)?
    } else {
        Vec::new()
    };
    let merchants = if needs.merchants {
        load_merchants(&config.merchants_source, config.utc_offset, &mut stdin_body)?
    } else {
        Vec::new()
    };

    tracing::debug!(
        payments = payments.len(),
        merchants = merchants.len(),
        "record store populated"
    );

    Ok(RecordStore {
        payments,
        merchants,
    })
}

fn load_payments(
    path: &Path,
    offset: FixedOffset,
    stdin_body: &mut Option<String>,
) -> ClientResult<Vec<PaymentRecord>> {
    let (label, body) = read_source(path, stdin_body)?;
    let wires: Vec<PaymentWire> = unwrap_api_envelope(&label, &body)?;
    Ok(wires
        .into_iter()
        .map(|wire| PaymentRecord::from_wire(wire, offset))
        .collect())
}

fn load_merchants(
    path: &Path,
    offset: FixedOffset,
    stdin_body: &mut Option<String>,
) -> ClientResult<Vec<MerchantDetail>> {
    let (label, body) = read_source(path, stdin_body)?;
    let wires: Vec<MerchantWire> = unwrap_api_envelope(&label, &body)?;
    Ok(wires
        .into_iter()
        .map(|wire| MerchantDetail::from_wire(wire, offset))
        .collect())
}

fn read_source(path: &Path, stdin_body: &mut Option<String>) -> ClientResult<(String, String)> {
    if is_stdin(path) {
        let body = match stdin_body.take() {
            Some(value) => value,
            None => read_stdin()?,
        };
        if body.trim().is_empty() {
            return Err(ClientError::source_unreadable(
                "stdin",
                "path `-` means stdin input, but stdin was empty",
            ));
        }
        return Ok(("stdin".to_string(), body));
    }

    let label = path.display().to_string();
    if !path.exists() {
        return Err(ClientError::source_missing(path));
    }
    let body = fs::read_to_string(path)
        .map_err(|error| ClientError::source_unreadable(&label, &error.to_string()))?;
    tracing::debug!(source = %label, bytes = body.len(), "read record source");
    Ok((label, body))
}

fn read_stdin() -> ClientResult<String> {
    if std::io::stdin().is_terminal() {
        return Err(ClientError::source_unreadable(
            "stdin",
            "stdin is a terminal; pipe a response body instead",
        ));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| ClientError::source_unreadable("stdin", &error.to_string()))?;
    Ok(buffer)
}
