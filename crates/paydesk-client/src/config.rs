use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};

use crate::{ClientError, ClientResult};

pub const DATA_DIR_ENV: &str = "PAYDESK_DATA_DIR";
pub const UTC_OFFSET_ENV: &str = "PAYDESK_UTC_OFFSET";
pub const PAGE_SIZE_ENV: &str = "PAYDESK_PAGE_SIZE";

pub const PAYMENTS_FILE_NAME: &str = "payments.json";
pub const MERCHANTS_FILE_NAME: &str = "merchants.json";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_UTC_OFFSET_SECONDS: i32 = 9 * 3600;

/// Rows per table page; restricted to the sizes the pager offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub const ALLOWED: [usize; 4] = [10, 20, 50, 100];

    pub fn new(value: usize) -> Option<Self> {
        Self::ALLOWED.contains(&value).then_some(Self(value))
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub payments_file: Option<PathBuf>,
    pub merchants_file: Option<PathBuf>,
    pub utc_offset: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub payments_source: PathBuf,
    pub merchants_source: PathBuf,
    pub utc_offset: FixedOffset,
    pub page_size: PageSize,
}

pub fn resolve_config(overrides: &ConfigOverrides) -> ClientResult<DeskConfig> {
    resolve_config_with_env(overrides, |name| std::env::var(name).ok())
}

/// Explicit overrides beat environment variables, which beat defaults.
pub fn resolve_config_with_env<F>(overrides: &ConfigOverrides, env: F) -> ClientResult<DeskConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let data_dir = match &overrides.data_dir {
        Some(path) => path.clone(),
        None => env(DATA_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
    };

    let payments_source = overrides
        .payments_file
        .clone()
        .unwrap_or_else(|| data_dir.join(PAYMENTS_FILE_NAME));
    let merchants_source = overrides
        .merchants_file
        .clone()
        .unwrap_or_else(|| data_dir.join(MERCHANTS_FILE_NAME));

    if is_stdin(&payments_source) && is_stdin(&merchants_source) {
        return Err(ClientError::invalid_argument_with_recovery(
            "Only one record source can be read from stdin.",
            vec!["Pass a file path for either `--payments-file` or `--merchants-file`.".to_string()],
        ));
    }

    let utc_offset = match &overrides.utc_offset {
        Some(value) => parse_utc_offset(value)
            .ok_or_else(|| ClientError::invalid_setting("--utc-offset", value, "an offset like +09:00"))?,
        None => match env(UTC_OFFSET_ENV) {
            Some(value) => parse_utc_offset(&value).ok_or_else(|| {
                ClientError::invalid_setting(UTC_OFFSET_ENV, &value, "an offset like +09:00")
            })?,
            None => default_utc_offset(),
        },
    };

    let page_size = match overrides.page_size {
        Some(value) => PageSize::new(value).ok_or_else(|| {
            ClientError::invalid_setting("--page-size", &value.to_string(), &allowed_page_sizes())
        })?,
        None => match env(PAGE_SIZE_ENV) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(PageSize::new)
                .ok_or_else(|| {
                    ClientError::invalid_setting(PAGE_SIZE_ENV, &value, &allowed_page_sizes())
                })?,
            None => PageSize::default(),
        },
    };

    tracing::debug!(
        payments = %payments_source.display(),
        merchants = %merchants_source.display(),
        offset = %utc_offset,
        page_size = page_size.get(),
        "resolved configuration"
    );

    Ok(DeskConfig {
        payments_source,
        merchants_source,
        utc_offset,
        page_size,
    })
}

pub fn default_utc_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Accepts `Z`, `UTC`, `+09:00`, `+0900`, and `-05`.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }

    let (sign, rest) = match trimmed.as_bytes().first()? {
        b'+' => (1, &trimmed[1..]),
        b'-' => (-1, &trimmed[1..]),
        _ => return None,
    };
    let digits = rest.replace(':', "");
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn allowed_page_sizes() -> String {
    PageSize::ALLOWED
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}
