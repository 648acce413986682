use std::collections::HashMap;

use crate::records::types::MerchantDetail;

/// Read-only join from a payment's `mcht_code` to its merchant.
///
/// When a code appears twice the first merchant wins.
#[derive(Debug, Default)]
pub struct MerchantDirectory<'a> {
    by_code: HashMap<&'a str, &'a MerchantDetail>,
}

impl<'a> MerchantDirectory<'a> {
    pub fn new(merchants: &'a [MerchantDetail]) -> Self {
        let mut by_code = HashMap::with_capacity(merchants.len());
        for merchant in merchants {
            by_code.entry(merchant.mcht_code.as_str()).or_insert(merchant);
        }
        Self { by_code }
    }

    pub fn get(&self, mcht_code: &str) -> Option<&'a MerchantDetail> {
        self.by_code.get(mcht_code).copied()
    }

    /// Merchant name for display, falling back to the raw code.
    pub fn display_name<'b>(&self, mcht_code: &'b str) -> &'b str
    where
        'a: 'b,
    {
        match self.get(mcht_code) {
            Some(merchant) if !merchant.mcht_name.is_empty() => merchant.mcht_name.as_str(),
            _ => mcht_code,
        }
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::MerchantDirectory;
    use crate::config::default_utc_offset;
    use crate::records::date::Timestamp;
    use crate::records::types::{BizType, MerchantDetail, MerchantStatus};

    fn merchant(code: &str, name: &str) -> MerchantDetail {
        MerchantDetail {
            mcht_code: code.to_string(),
            mcht_name: name.to_string(),
            biz_type: BizType::Cafe,
            status: MerchantStatus::Active,
            biz_no: None,
            address: None,
            phone: None,
            email: None,
            registered_at: Timestamp::parse("2024-01-01T00:00:00", default_utc_offset()),
            updated_at: Timestamp::parse("2024-01-01T00:00:00", default_utc_offset()),
        }
    }

    #[test]
    fn resolves_names_and_falls_back_to_code() {
        let merchants = vec![merchant("M1", "Blue Bottle"), merchant("M2", "")];
        let directory = MerchantDirectory::new(&merchants);
        assert_eq!(directory.display_name("M1"), "Blue Bottle");
        assert_eq!(directory.display_name("M2"), "M2");
        assert_eq!(directory.display_name("M404"), "M404");
    }

    #[test]
    fn first_duplicate_code_wins() {
        let merchants = vec![merchant("M1", "First"), merchant("M1", "Second")];
        let directory = MerchantDirectory::new(&merchants);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.display_name("M1"), "First");
    }
}
