use crate::ClientResult;
use crate::commands::payments::{PaymentsQuery, build_payments_data};
use crate::config::ConfigOverrides;
use crate::contracts::envelope::{SuccessEnvelope, success};

/// The transactions table filters by merchant name and date only.
#[derive(Debug, Clone, Default)]
pub struct TransactionsQuery {
    pub search: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<usize>,
}

impl From<TransactionsQuery> for PaymentsQuery {
    fn from(query: TransactionsQuery) -> Self {
        Self {
            search: query.search,
            from: query.from,
            to: query.to,
            sort: query.sort,
            order: query.order,
            page: query.page,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct TransactionsRunOptions {
    pub query: TransactionsQuery,
    pub config: ConfigOverrides,
    pub stdin_override: Option<String>,
}

pub fn run(query: TransactionsQuery, config: ConfigOverrides) -> ClientResult<SuccessEnvelope> {
    run_with_options(TransactionsRunOptions {
        query,
        config,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TransactionsRunOptions) -> ClientResult<SuccessEnvelope> {
    let query = PaymentsQuery::from(options.query);
    let data = build_payments_data(
        "transactions",
        &query,
        &options.config,
        options.stdin_override,
    )?;
    success("transactions", data)
}
