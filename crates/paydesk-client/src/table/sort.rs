use std::cmp::Ordering;

use crate::records::directory::MerchantDirectory;
use crate::records::types::{MerchantDetail, PaymentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + Eq> SortState<F> {
    pub const fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same field flips direction; a new field starts ascending.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentSortField {
    PaymentCode,
    MerchantName,
    Amount,
    PayType,
    Status,
    PaymentAt,
}

impl PaymentSortField {
    pub const ALL: [Self; 6] = [
        Self::PaymentCode,
        Self::MerchantName,
        Self::Amount,
        Self::PayType,
        Self::Status,
        Self::PaymentAt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentCode => "payment_code",
            Self::MerchantName => "merchant_name",
            Self::Amount => "amount",
            Self::PayType => "pay_type",
            Self::Status => "status",
            Self::PaymentAt => "payment_at",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerchantSortField {
    MchtCode,
    MchtName,
    BizType,
    Status,
    RegisteredAt,
}

impl MerchantSortField {
    pub const ALL: [Self; 5] = [
        Self::MchtCode,
        Self::MchtName,
        Self::BizType,
        Self::Status,
        Self::RegisteredAt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MchtCode => "mcht_code",
            Self::MchtName => "mcht_name",
            Self::BizType => "biz_type",
            Self::Status => "status",
            Self::RegisteredAt => "registered_at",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
    }
}

/// Ascending comparison for one field. Category fields compare by wire code,
/// amounts by exact value (unparsable first), timestamps by instant.
pub fn compare_payments(
    left: &PaymentRecord,
    right: &PaymentRecord,
    field: PaymentSortField,
    directory: &MerchantDirectory<'_>,
) -> Ordering {
    match field {
        PaymentSortField::PaymentCode => left.payment_code.cmp(&right.payment_code),
        PaymentSortField::MerchantName => directory
            .display_name(&left.mcht_code)
            .cmp(directory.display_name(&right.mcht_code)),
        PaymentSortField::Amount => left.amount.value().cmp(&right.amount.value()),
        PaymentSortField::PayType => left.pay_type.code().cmp(right.pay_type.code()),
        PaymentSortField::Status => left.status.code().cmp(right.status.code()),
        PaymentSortField::PaymentAt => left.payment_at.local().cmp(&right.payment_at.local()),
    }
}

pub fn compare_merchants(
    left: &MerchantDetail,
    right: &MerchantDetail,
    field: MerchantSortField,
) -> Ordering {
    match field {
        MerchantSortField::MchtCode => left.mcht_code.cmp(&right.mcht_code),
        MerchantSortField::MchtName => left.mcht_name.cmp(&right.mcht_name),
        MerchantSortField::BizType => left.biz_type.code().cmp(right.biz_type.code()),
        MerchantSortField::Status => left.status.code().cmp(right.status.code()),
        MerchantSortField::RegisteredAt => left
            .registered_at
            .local()
            .cmp(&right.registered_at.local()),
    }
}

/// Stable sort, so equal keys keep their filtered order in both directions.
pub fn sort_payments(
    rows: &mut [&PaymentRecord],
    sort: SortState<PaymentSortField>,
    directory: &MerchantDirectory<'_>,
) {
    rows.sort_by(|left, right| {
        sort.direction
            .apply(compare_payments(left, right, sort.field, directory))
    });
}

pub fn sort_merchants(rows: &mut [&MerchantDetail], sort: SortState<MerchantSortField>) {
    rows.sort_by(|left, right| {
        sort.direction
            .apply(compare_merchants(left, right, sort.field))
    });
}
