//! Property-based tests for the configuration parser and classifier.

use super::{is_port_literal, ConfigParser, EntryKind, TypeClassifier};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

// Values without quotes, leading spaces or line breaks.
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:@-]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Parsing `key: value` and writing it back yields the same text.
    #[test]
    fn parse_serialize_roundtrip(key in key_strategy(), value in value_strategy()) {
        let line = format!("{key}: {value}");
        let parsed = ConfigParser::default().parse_str(&line);
        prop_assert_eq!(parsed.entries.len(), 1);
        let entry = &parsed.entries[0];
        prop_assert_eq!(format!("{}: {}", entry.key, entry.value), line);
    }

    // Comment lines never produce entries, whatever they contain.
    #[test]
    fn comments_never_parse(indent in " {0,4}", body in "[^\n\r]{0,40}") {
        let parsed = ConfigParser::default().parse_str(&format!("{indent}#{body}"));
        prop_assert!(parsed.entries.is_empty());
        prop_assert!(parsed.warnings.is_empty());
    }

    // Keys stay unique and every input key is represented once.
    #[test]
    fn keys_unique(keys in proptest::collection::vec(key_strategy(), 1..20)) {
        let text: String = keys.iter().map(|k| format!("{k}: 1\n")).collect();
        let parsed = ConfigParser::default().parse_str(&text);
        let mut seen: Vec<&str> = parsed.entries.iter().map(|e| e.key.as_str()).collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);

        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(total, expected.len());
    }

    // Every digit string is a port literal; anything with a non-digit is not.
    #[test]
    fn digit_strings_are_ports(digits in "[0-9]{1,8}", junk in "[^0-9]{1,3}") {
        prop_assert!(is_port_literal(&digits));
        let with_junk = format!("{digits}{junk}");
        prop_assert!(!is_port_literal(&with_junk));
        prop_assert_eq!(
            TypeClassifier::default().classify("svc", &digits),
            EntryKind::Port
        );
    }
}
