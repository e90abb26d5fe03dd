use phonecom_sdk::query::compile_url;
use phonecom_sdk::{Builder, Direction, MemoryClient};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn builder() -> Builder {
    let mut b = Builder::new(Arc::new(MemoryClient::new()));
    b.from("/sms");
    b
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_direction_is_asc_only_for_asc(dir in "[a-zA-Z]{0,6}") {
        let mut b = builder();
        b.order_by("c", &dir);
        let expected = if dir.eq_ignore_ascii_case("asc") { Direction::Asc } else { Direction::Desc };
        prop_assert_eq!(b.compile_query().sort_for("c"), Some(expected));
    }

    #[test]
    fn prop_offset_never_negative(v in any::<i64>()) {
        let mut b = builder();
        b.offset(v);
        prop_assert_eq!(b.compile_query().offset, Some(u64::try_from(v.max(0)).unwrap()));
    }

    #[test]
    fn prop_limit_keeps_last_positive(seq in proptest::collection::vec(-50i64..50, 0..12)) {
        let mut b = builder();
        for v in &seq {
            b.limit(*v);
        }
        let expected = seq.iter().rev().find(|v| **v > 0).map(|v| u64::try_from(*v).unwrap());
        prop_assert_eq!(b.compile_query().limit, expected);
    }

    #[test]
    fn prop_url_substitutes_every_occurrence(
        name in "[a-z]{1,8}",
        value in "[A-Za-z0-9$\\\\]{0,10}",
        pattern in proptest::option::of("[0-9a-z+*\\[\\]-]{1,6}"),
    ) {
        let placeholder = match &pattern {
            Some(p) => format!("{{{name}:{p}}}"),
            None => format!("{{{name}}}"),
        };
        let template = format!("/a/{placeholder}/b/{placeholder}");
        let v = json!(value);
        let url = compile_url(&template, [(name.as_str(), &v)]).unwrap();
        prop_assert_eq!(url, format!("/a/{value}/b/{value}"));
    }

    #[test]
    fn prop_filters_keep_call_order(values in proptest::collection::vec(0i64..1000, 1..10)) {
        let mut b = builder();
        for v in &values {
            b.where_eq("n", *v);
        }
        let q = b.compile_query();
        let expected: Vec<String> = values.iter().map(|v| format!("eq:{v}")).collect();
        prop_assert_eq!(q.filters_for("n").unwrap(), expected.as_slice());
    }
}
