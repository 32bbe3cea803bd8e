//! Property-based tests for the round-trip guarantees.
//!
//! Formatting any value tree and parsing the text back yields an equal tree,
//! formatting is stable, and serde types survive `to_string`/`from_str`.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_tomlet::{accept, from_str, parse, to_string, Array, Error, LocalDate, Table, Value};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    value: T,
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: T,
) -> bool {
    let wrapped = Wrapper { value };
    match to_string(&wrapped) {
        Ok(serialized) => match from_str::<Wrapper<T>>(&serialized) {
            Ok(deserialized) => wrapped == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _\\-\"'\\\\#=.\\[\\]{},\t\n\u{7}\u{e9}\u{1F600}]{0,12}"
}

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z0-9_\\- .\"'#]{0,6}"
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("nan never equals itself", |f| !f.is_nan())
            .prop_map(Value::Float),
        arb_text().prop_map(Value::from),
        (1u16..=9999, 1u8..=12, 1u8..=28).prop_map(|(y, m, d)| {
            Value::LocalDate(LocalDate::new(y, m, d).expect("day 28 exists in every month"))
        }),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| Value::Array(Array::from(items))),
            prop::collection::vec((arb_key(), inner), 0..4)
                .prop_map(|entries| Value::Table(entries.into_iter().collect())),
        ]
    })
}

fn arb_table() -> impl Strategy<Value = Table> {
    prop::collection::vec((arb_key(), arb_value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_formatted_tables_parse_back(table in arb_table()) {
        let text = Value::Table(table.clone()).to_string();
        let doc = parse(&text);
        prop_assert!(doc.is_ok(), "{:?} failed to parse: {:?}", text, doc.err());
        let doc = doc.unwrap();
        prop_assert_eq!(doc.root(), &table, "text was {:?}", text);
    }

    #[test]
    fn prop_formatting_is_stable(table in arb_table()) {
        let first = Value::Table(table).to_string();
        let second = parse(&first).unwrap().to_string();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_serde_matches_value_formatting(table in arb_table()) {
        let via_serde = to_string(&table).unwrap();
        let back = parse(&via_serde).unwrap();
        prop_assert_eq!(back.root(), &table);
    }

    #[test]
    fn prop_parser_stops_where_acceptor_stops(input in "[0-9a-z_.:+\\- \"'\\[\\]{},=#\n]{0,16}") {
        let accepted = accept::value(input.as_bytes(), 0);
        let (result, end) = serde_tomlet::parse::value(&input, 0);
        match (accepted, result) {
            (Some(stop), Ok(_)) => prop_assert_eq!(stop, end),
            (Some(_), Err(err)) => {
                prop_assert_eq!(end, 0);
                prop_assert!(matches!(err, Error::Range { .. } | Error::Semantic { .. }), "{}", err);
            }
            (None, Ok(_)) => prop_assert!(false, "parser accepted {:?}", input),
            (None, Err(_)) => prop_assert_eq!(end, 0),
        }
    }

    // Serde primitives
    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(b));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(f));
    }

    #[test]
    fn prop_string(s in arb_text()) {
        prop_assert!(roundtrip(s));
    }

    // Serde collections
    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(opt));
    }

    #[test]
    fn prop_map_string_keys(m in prop::collection::btree_map(arb_key(), any::<i32>(), 0..8)) {
        prop_assert!(roundtrip::<BTreeMap<String, i32>>(m));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(t));
    }
}
