use paydesk_client::commands::{dashboard, merchants, payments, transactions};
use paydesk_client::{ClientResult, ConfigOverrides, SuccessEnvelope};

use crate::cli::{
    Cli, Commands, IsoDate, MerchantListArgs, MerchantsCommand, PageArgs, PaymentListArgs,
    PaymentsCommand, SourceArgs, TransactionListArgs,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Payments { command, args } => match command {
            Some(PaymentsCommand::Show { payment_code, .. }) => {
                payments::show(payment_code, overrides(&cli.sources, None))
            }
            None => payments::run(
                payments_query(args),
                overrides(&cli.sources, Some(&args.paging)),
            ),
        },
        Commands::Transactions { args } => transactions::run(
            transactions_query(args),
            overrides(&cli.sources, Some(&args.paging)),
        ),
        Commands::Merchants { command, args } => match command {
            Some(MerchantsCommand::Show { mcht_code, .. }) => {
                merchants::show(mcht_code, overrides(&cli.sources, None))
            }
            None => merchants::run(
                merchants_query(args),
                overrides(&cli.sources, Some(&args.paging)),
            ),
        },
        Commands::Dashboard { today, .. } => dashboard::run(
            today.as_ref().map(IsoDate::as_str),
            overrides(&cli.sources, None),
        ),
    }
}

fn overrides(sources: &SourceArgs, paging: Option<&PageArgs>) -> ConfigOverrides {
    ConfigOverrides {
        data_dir: sources.data_dir.clone(),
        payments_file: sources.payments_file.clone(),
        merchants_file: sources.merchants_file.clone(),
        utc_offset: sources.utc_offset.clone(),
        page_size: paging.and_then(|paging| paging.page_size),
    }
}

fn date_text(value: Option<&IsoDate>) -> Option<String> {
    value.map(|date| date.as_str().to_string())
}

fn payments_query(args: &PaymentListArgs) -> payments::PaymentsQuery {
    payments::PaymentsQuery {
        search: args.search.clone(),
        from: date_text(args.from.as_ref()),
        to: date_text(args.to.as_ref()),
        pay_types: args.pay_types.clone(),
        statuses: args.statuses.clone(),
        min_amount: args.min_amount.clone(),
        max_amount: args.max_amount.clone(),
        sort: args.sort.clone(),
        order: args.order.clone(),
        page: args.paging.page,
    }
}

fn transactions_query(args: &TransactionListArgs) -> transactions::TransactionsQuery {
    transactions::TransactionsQuery {
        search: args.search.clone(),
        from: date_text(args.from.as_ref()),
        to: date_text(args.to.as_ref()),
        sort: args.sort.clone(),
        order: args.order.clone(),
        page: args.paging.page,
    }
}

fn merchants_query(args: &MerchantListArgs) -> merchants::MerchantsQuery {
    merchants::MerchantsQuery {
        search: args.search.clone(),
        biz_types: args.biz_types.clone(),
        statuses: args.statuses.clone(),
        sort: args.sort.clone(),
        order: args.order.clone(),
        page: args.paging.page,
    }
}
