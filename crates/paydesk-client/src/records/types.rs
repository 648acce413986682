use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::records::amount::Amount;
use crate::records::date::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayType {
    Online,
    Device,
    Mobile,
    Vact,
    Billing,
}

impl PayType {
    pub const ALL: [Self; 5] = [
        Self::Online,
        Self::Device,
        Self::Mobile,
        Self::Vact,
        Self::Billing,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Device => "DEVICE",
            Self::Mobile => "MOBILE",
            Self::Vact => "VACT",
            Self::Billing => "BILLING",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Device => "Device",
            Self::Mobile => "Mobile",
            Self::Vact => "Virtual account",
            Self::Billing => "Recurring billing",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code().eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Success, Self::Failed, Self::Cancelled];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Awaiting payment",
            Self::Success => "Paid",
            Self::Failed => "Payment failed",
            Self::Cancelled => "Payment cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code().eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BizType {
    Cafe,
    Shop,
    Mart,
    App,
    Travel,
    Edu,
    Test,
}

impl BizType {
    pub const ALL: [Self; 7] = [
        Self::Cafe,
        Self::Shop,
        Self::Mart,
        Self::App,
        Self::Travel,
        Self::Edu,
        Self::Test,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Cafe => "CAFE",
            Self::Shop => "SHOP",
            Self::Mart => "MART",
            Self::App => "APP",
            Self::Travel => "TRAVEL",
            Self::Edu => "EDU",
            Self::Test => "TEST",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cafe => "Cafe",
            Self::Shop => "Online shop",
            Self::Mart => "Mart",
            Self::App => "App",
            Self::Travel => "Travel",
            Self::Edu => "Education",
            Self::Test => "Test",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code().eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MerchantStatus {
    Active,
    Inactive,
    Ready,
    Closed,
}

impl MerchantStatus {
    pub const ALL: [Self; 4] = [Self::Active, Self::Inactive, Self::Ready, Self::Closed];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Ready => "READY",
            Self::Closed => "CLOSED",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Ready => "Onboarding",
            Self::Closed => "Closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Amounts arrive as strings, but older endpoints emit bare numbers. Anything
/// else (`null`, booleans, objects) is kept as text so only that row loses its
/// amount.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl WireAmount {
    fn into_text(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Number(value) => value.to_string(),
            Self::Other(serde_json::Value::Null) => String::new(),
            Self::Other(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWire {
    payment_code: String,
    mcht_code: String,
    #[serde(default)]
    amount: Option<WireAmount>,
    #[serde(default)]
    currency: Option<String>,
    pay_type: PayType,
    status: PaymentStatus,
    #[serde(default)]
    payment_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantWire {
    mcht_code: String,
    #[serde(default)]
    mcht_name: Option<String>,
    biz_type: BizType,
    status: MerchantStatus,
    #[serde(default)]
    biz_no: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    registered_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub payment_code: String,
    pub mcht_code: String,
    pub amount: Amount,
    pub currency: String,
    pub pay_type: PayType,
    pub status: PaymentStatus,
    pub payment_at: Timestamp,
}

impl PaymentRecord {
    pub fn from_wire(wire: PaymentWire, offset: FixedOffset) -> Self {
        Self {
            payment_code: wire.payment_code,
            mcht_code: wire.mcht_code,
            amount: Amount::parse(&wire.amount.map(WireAmount::into_text).unwrap_or_default()),
            currency: wire.currency.unwrap_or_default(),
            pay_type: wire.pay_type,
            status: wire.status,
            payment_at: Timestamp::parse(&wire.payment_at.unwrap_or_default(), offset),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantDetail {
    pub mcht_code: String,
    pub mcht_name: String,
    pub biz_type: BizType,
    pub status: MerchantStatus,
    pub biz_no: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MerchantDetail {
    pub fn from_wire(wire: MerchantWire, offset: FixedOffset) -> Self {
        Self {
            mcht_code: wire.mcht_code,
            mcht_name: wire.mcht_name.unwrap_or_default(),
            biz_type: wire.biz_type,
            status: wire.status,
            biz_no: non_blank(wire.biz_no),
            address: non_blank(wire.address),
            phone: non_blank(wire.phone),
            email: non_blank(wire.email),
            registered_at: Timestamp::parse(&wire.registered_at.unwrap_or_default(), offset),
            updated_at: Timestamp::parse(&wire.updated_at.unwrap_or_default(), offset),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
