use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_page_number(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err("page must be a whole number starting at 1".to_string()),
    }
}

/// Extended help shown after `paydesk payments --help`.
pub const PAYMENTS_AFTER_HELP: &str = "\
Filters combine with AND. Repeat `--pay-type` or `--status` to match any of
several codes.

Codes:
  --pay-type   ONLINE, DEVICE, MOBILE, VACT, BILLING
  --status     PENDING, SUCCESS, FAILED, CANCELLED

Sort fields:
  payment_code, merchant_name, amount, pay_type, status, payment_at
  Without `--sort`, rows are newest first. `--sort` alone sorts ascending.

Amount bounds are inclusive. A bound that is not a number is ignored.
Payments with an unreadable amount never match a bound.

Examples:
  paydesk payments --from 2024-01-01 --to 2024-01-31 --status SUCCESS
  paydesk payments --search cafe --sort amount --order desc --page 2
  paydesk payments show PAY-000123
";

/// Extended help shown after `paydesk merchants --help`.
pub const MERCHANTS_AFTER_HELP: &str = "\
Codes:
  --biz-type   CAFE, SHOP, MART, APP, TRAVEL, EDU, TEST
  --status     ACTIVE, READY, INACTIVE, CLOSED

Sort fields:
  mcht_code, mcht_name, biz_type, status, registered_at
  Without `--sort`, the most recently registered merchants come first.

Examples:
  paydesk merchants --biz-type CAFE --biz-type MART
  paydesk merchants show MCHT-0001
";

#[derive(Debug, Parser)]
#[command(
    name = "paydesk",
    version,
    about = "payment operations desk",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Directory holding payments.json and merchants.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Payments response body, or `-` for stdin
    #[arg(long, global = true, value_name = "PATH")]
    pub payments_file: Option<PathBuf>,
    /// Merchants response body, or `-` for stdin
    #[arg(long, global = true, value_name = "PATH")]
    pub merchants_file: Option<PathBuf>,
    /// Offset used for local calendar dates (e.g. +09:00)
    #[arg(long, global = true, value_name = "OFFSET")]
    pub utc_offset: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse payments with filters, sorting, and paging
    #[command(after_long_help = PAYMENTS_AFTER_HELP, args_conflicts_with_subcommands = true)]
    Payments {
        #[command(subcommand)]
        command: Option<PaymentsCommand>,
        #[command(flatten)]
        args: PaymentListArgs,
    },
    /// Browse the transaction log (payments without category filters)
    Transactions {
        #[command(flatten)]
        args: TransactionListArgs,
    },
    /// Browse merchants with filters, sorting, and paging
    #[command(after_long_help = MERCHANTS_AFTER_HELP, args_conflicts_with_subcommands = true)]
    Merchants {
        #[command(subcommand)]
        command: Option<MerchantsCommand>,
        #[command(flatten)]
        args: MerchantListArgs,
    },
    /// Show summary cards, daily totals, breakdowns, and top merchants
    Dashboard {
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        today: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PaymentsCommand {
    /// Show one payment with its merchant
    Show {
        /// The payment code to look up (e.g. PAY-000123)
        payment_code: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum MerchantsCommand {
    /// Show one merchant's full profile
    Show {
        /// The merchant code to look up (e.g. MCHT-0001)
        mcht_code: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct PageArgs {
    /// Page to show, starting at 1
    #[arg(long, value_parser = parse_page_number)]
    pub page: Option<usize>,
    /// Rows per page: 10, 20, 50, or 100
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PaymentListArgs {
    /// Case-insensitive merchant name search
    #[arg(long)]
    pub search: Option<String>,
    /// First local date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub from: Option<IsoDate>,
    /// Last local date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub to: Option<IsoDate>,
    /// Payment method code; repeat to match several
    #[arg(long = "pay-type", value_name = "CODE")]
    pub pay_types: Vec<String>,
    /// Payment status code; repeat to match several
    #[arg(long = "status", value_name = "CODE")]
    pub statuses: Vec<String>,
    /// Smallest amount to include
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub min_amount: Option<String>,
    /// Largest amount to include
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub max_amount: Option<String>,
    /// Column to sort by
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,
    /// Sort direction: asc or desc
    #[arg(long)]
    pub order: Option<String>,
    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TransactionListArgs {
    /// Case-insensitive merchant name search
    #[arg(long)]
    pub search: Option<String>,
    /// First local date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub from: Option<IsoDate>,
    /// Last local date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub to: Option<IsoDate>,
    /// Column to sort by
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,
    /// Sort direction: asc or desc
    #[arg(long)]
    pub order: Option<String>,
    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MerchantListArgs {
    /// Case-insensitive search over merchant name and code
    #[arg(long)]
    pub search: Option<String>,
    /// Business type code; repeat to match several
    #[arg(long = "biz-type", value_name = "CODE")]
    pub biz_types: Vec<String>,
    /// Merchant status code; repeat to match several
    #[arg(long = "status", value_name = "CODE")]
    pub statuses: Vec<String>,
    /// Column to sort by
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,
    /// Sort direction: asc or desc
    #[arg(long)]
    pub order: Option<String>,
    #[command(flatten)]
    pub paging: PageArgs,
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, MerchantsCommand, PaymentsCommand, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 14] = [
            vec!["paydesk", "payments"],
            vec!["paydesk", "payments", "--json"],
            vec!["paydesk", "payments", "--search", "cafe", "--page", "2"],
            vec![
                "paydesk",
                "payments",
                "--from",
                "2024-01-01",
                "--to",
                "2024-01-31",
            ],
            vec![
                "paydesk",
                "payments",
                "--pay-type",
                "ONLINE",
                "--pay-type",
                "VACT",
                "--status",
                "SUCCESS",
            ],
            vec!["paydesk", "payments", "--min-amount", "1000", "--max-amount", "5000"],
            vec!["paydesk", "payments", "--sort", "amount", "--order", "desc"],
            vec!["paydesk", "payments", "show", "PAY-001", "--json"],
            vec!["paydesk", "transactions", "--search", "mart"],
            vec!["paydesk", "merchants", "--biz-type", "CAFE", "--json"],
            vec!["paydesk", "merchants", "show", "MCHT-001"],
            vec!["paydesk", "dashboard"],
            vec!["paydesk", "dashboard", "--today", "2024-01-03", "--json"],
            vec!["paydesk", "--data-dir", "./fixtures", "payments", "--page-size", "20"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn repeated_category_flags_accumulate() {
        let parsed = parse_from([
            "paydesk",
            "payments",
            "--status",
            "SUCCESS",
            "--status",
            "FAILED",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Payments { command: None, .. }));
            if let Commands::Payments { args, .. } = cli.command {
                assert_eq!(args.statuses, vec!["SUCCESS", "FAILED"]);
            }
        }
    }

    #[test]
    fn source_flags_are_global() {
        let parsed = parse_from([
            "paydesk",
            "merchants",
            "--merchants-file",
            "-",
            "--utc-offset",
            "+00:00",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(
                cli.sources.merchants_file.as_deref(),
                Some(std::path::Path::new("-"))
            );
            assert_eq!(cli.sources.utc_offset.as_deref(), Some("+00:00"));
        }
    }

    #[test]
    fn parse_show_subcommands() {
        let payment = parse_from(["paydesk", "payments", "show", "PAY-001"]);
        assert!(payment.is_ok());
        if let Ok(cli) = payment {
            assert!(matches!(
                cli.command,
                Commands::Payments {
                    command: Some(PaymentsCommand::Show { json: false, .. }),
                    ..
                }
            ));
        }

        let merchant = parse_from(["paydesk", "merchants", "show", "MCHT-001", "--json"]);
        assert!(merchant.is_ok());
        if let Ok(cli) = merchant {
            assert!(matches!(
                cli.command,
                Commands::Merchants {
                    command: Some(MerchantsCommand::Show { json: true, .. }),
                    ..
                }
            ));
        }
    }

    #[test]
    fn show_requires_a_code() {
        let parsed = parse_from(["paydesk", "payments", "show"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn invalid_date_is_rejected() {
        let parsed = parse_from(["paydesk", "payments", "--from", "2024-99-01"]);
        assert!(parsed.is_err());

        let slashed = parse_from(["paydesk", "dashboard", "--today", "2024/01/03"]);
        assert!(slashed.is_err());
    }

    #[test]
    fn negative_amount_bounds_reach_the_library() {
        let parsed = parse_from([
            "paydesk",
            "payments",
            "--min-amount",
            "-5",
            "--max-amount",
            "-1e3",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            if let Commands::Payments { args, .. } = cli.command {
                assert_eq!(args.min_amount.as_deref(), Some("-5"));
                assert_eq!(args.max_amount.as_deref(), Some("-1e3"));
            }
        }
    }

    #[test]
    fn page_zero_is_rejected() {
        let parsed = parse_from(["paydesk", "payments", "--page", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn transactions_have_no_category_filters() {
        let parsed = parse_from(["paydesk", "transactions", "--status", "SUCCESS"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["paydesk", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["paydesk", "payments", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
