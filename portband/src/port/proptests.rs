//! Property-based tests for `PortBand`.

use super::{Port, PortBand};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The default band accepts exactly [10000, 20000].
    #[test]
    fn default_band_matches_bounds(value in 0u64..=70000) {
        let band = PortBand::default();
        prop_assert_eq!(band.contains_value(value), (10000..=20000).contains(&value));
    }

    // contains() agrees with contains_value() for every real port.
    #[test]
    fn contains_agrees_with_contains_value(
        min in 1u16..=65535,
        max in 1u16..=65535,
        probe in 1u16..=65535,
    ) {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let band = PortBand::from_bounds(lo, hi).unwrap();
        let port = Port::try_from(probe).unwrap();
        prop_assert_eq!(band.contains(port), band.contains_value(u64::from(probe)));
        prop_assert_eq!(band.contains(port), probe >= lo && probe <= hi);
    }

    // Values beyond the u16 range are never inside a band.
    #[test]
    fn oversized_values_are_outside(value in 65536u64..) {
        prop_assert!(!PortBand::default().contains_value(value));
    }
}
