mod support;

use paydesk_client::commands::merchants::{
    self, MerchantShowOptions, MerchantsQuery, MerchantsRunOptions,
};
use serde_json::Value;
use support::desk_testkit::{overrides_for, payload, row_field, standard_data_dir};

fn run_merchants(query: MerchantsQuery) -> Value {
    let dir = standard_data_dir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        return payload(merchants::run_with_options(MerchantsRunOptions {
            query,
            config: overrides_for(&dir),
            stdin_override: None,
        }));
    }
    Value::Null
}

fn merchant_codes(value: &Value) -> Vec<String> {
    row_field(&value["data"]["rows"], "mcht_code")
}

fn stat_count(entries: &Value, code: &str) -> Option<u64> {
    entries.as_array().and_then(|entries| {
        entries
            .iter()
            .find(|entry| entry["code"] == code)
            .and_then(|entry| entry["count"].as_u64())
    })
}

#[test]
fn default_listing_is_most_recently_registered_first() {
    let value = run_merchants(MerchantsQuery::default());
    assert_eq!(
        merchant_codes(&value),
        vec!["MCHT-004", "MCHT-002", "MCHT-001", "MCHT-003"]
    );
    assert_eq!(value["data"]["sort"]["field"], "registered_at");
    assert_eq!(value["data"]["sort"]["order"], "desc");
}

#[test]
fn search_matches_name_or_code() {
    let by_code = run_merchants(MerchantsQuery {
        search: Some("mcht-002".to_string()),
        ..MerchantsQuery::default()
    });
    assert_eq!(merchant_codes(&by_code), vec!["MCHT-002"]);

    let by_name = run_merchants(MerchantsQuery {
        search: Some("Travel".to_string()),
        ..MerchantsQuery::default()
    });
    assert_eq!(merchant_codes(&by_name), vec!["MCHT-003"]);
}

#[test]
fn category_filters_select_any_of_the_chosen_codes() {
    let value = run_merchants(MerchantsQuery {
        biz_types: vec!["cafe".to_string(), "MART".to_string()],
        ..MerchantsQuery::default()
    });
    assert_eq!(merchant_codes(&value), vec!["MCHT-002", "MCHT-001"]);

    let onboarding = run_merchants(MerchantsQuery {
        statuses: vec!["READY".to_string()],
        ..MerchantsQuery::default()
    });
    assert_eq!(merchant_codes(&onboarding), vec!["MCHT-003"]);
    assert_eq!(onboarding["data"]["rows"][0]["status_label"], "Onboarding");
}

#[test]
fn name_sort_flips_exactly_with_order() {
    let ascending = run_merchants(MerchantsQuery {
        sort: Some("mcht_name".to_string()),
        ..MerchantsQuery::default()
    });
    assert_eq!(
        merchant_codes(&ascending),
        vec!["MCHT-001", "MCHT-004", "MCHT-002", "MCHT-003"]
    );

    let descending = run_merchants(MerchantsQuery {
        sort: Some("mcht_name".to_string()),
        order: Some("desc".to_string()),
        ..MerchantsQuery::default()
    });
    assert_eq!(
        merchant_codes(&descending),
        vec!["MCHT-003", "MCHT-002", "MCHT-004", "MCHT-001"]
    );
}

#[test]
fn stats_count_every_merchant_regardless_of_filters() {
    let value = run_merchants(MerchantsQuery {
        search: Some("blue".to_string()),
        ..MerchantsQuery::default()
    });
    let stats = &value["data"]["stats"];
    assert_eq!(stats["total_count"], 4);
    assert_eq!(stats["by_biz_type"].as_array().map(Vec::len), Some(7));
    assert_eq!(stat_count(&stats["by_biz_type"], "CAFE"), Some(1));
    assert_eq!(stat_count(&stats["by_biz_type"], "SHOP"), Some(0));
    assert_eq!(stat_count(&stats["by_status"], "ACTIVE"), Some(2));
    assert_eq!(stats["by_status"][0]["share_percent"], "50");
}

#[test]
fn unknown_status_is_an_argument_error() {
    let dir = standard_data_dir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let result = merchants::run_with_options(MerchantsRunOptions {
            query: MerchantsQuery {
                statuses: vec!["PAUSED".to_string()],
                ..MerchantsQuery::default()
            },
            config: overrides_for(&dir),
            stdin_override: None,
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("--status"));
        }
    }
}

#[test]
fn show_returns_full_profile_or_not_found() {
    let dir = standard_data_dir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let value = payload(merchants::show_with_options(MerchantShowOptions {
            mcht_code: "MCHT-003".to_string(),
            config: overrides_for(&dir),
            stdin_override: None,
        }));
        let merchant = &value["data"]["merchant"];
        assert_eq!(merchant["mcht_name"], "Skyline Travel");
        assert_eq!(merchant["biz_type"], "TRAVEL");
        assert_eq!(merchant["biz_type_label"], "Travel");
        assert_eq!(merchant["email"], "mcht-003@merchants.test");
        assert_eq!(merchant["registered_at_local"], "2023-11-20 09:00:00");

        let missing = merchants::show_with_options(MerchantShowOptions {
            mcht_code: "MCHT-404".to_string(),
            config: overrides_for(&dir),
            stdin_override: None,
        });
        assert!(missing.is_err());
        if let Err(error) = missing {
            assert_eq!(error.code, "record_not_found");
            assert!(error.recovery_steps[0].contains("paydesk merchants"));
        }
    }
}
