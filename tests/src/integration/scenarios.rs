//! Backend-agnostic scenarios
//!
//! Each takes an initialized filter and panics on the first violated
//! property, so a backend test is one call per property.

use bloom_bitmap::{Bitmap, BloomFilter};

/// Fresh filter answers "absent", then the three added strings are present
pub fn assert_basic_membership<B: Bitmap>(filter: &mut BloomFilter<B>) {
    assert!(
        !filter.test_str("abc").expect("test"),
        "Fresh filter must report absence"
    );

    filter.add_str("abc").expect("add abc");
    filter.add_str("def").expect("add def");
    filter.add_str("test").expect("add test");

    assert!(filter.test_str("abc").expect("test abc"));
    assert!(filter.test_str("def").expect("test def"));
    assert!(filter.test_str("test").expect("test test"));
}

/// Every added item tests present, checked right after its own add
pub fn assert_no_false_negatives<B: Bitmap>(filter: &mut BloomFilter<B>, count: usize) {
    for i in 0..count {
        let item = i.to_string();
        filter.add_str(&item).expect("add");
        assert!(
            filter.test_str(&item).expect("test"),
            "False negative for {}",
            item
        );
    }
}

/// Repeated tests with no intervening add agree
pub fn assert_deterministic<B: Bitmap>(filter: &mut BloomFilter<B>, probes: &[&str]) {
    for probe in probes {
        let first = filter.test_str(probe).expect("test");
        for _ in 0..5 {
            assert_eq!(filter.test_str(probe).expect("test"), first);
        }
    }
}

/// Nothing added yet: every probe is absent
pub fn assert_zero_state<B: Bitmap>(filter: &mut BloomFilter<B>, probes: usize) {
    for i in 0..probes {
        let item = format!("never_added_{}", i);
        assert!(
            !filter.test_str(&item).expect("test"),
            "Zero-filled storage reported {} present",
            item
        );
    }
}
