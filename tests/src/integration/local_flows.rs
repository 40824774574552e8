//! Scenarios over the process-local backend (m=1000, k=4 unless noted)

#[cfg(test)]
mod tests {
    use bloom_bitmap::{BloomFilter, LocalBitmap};

    use crate::init_tracing;
    use crate::integration::scenarios::*;

    fn local_filter(m: u64, k: u32) -> BloomFilter<LocalBitmap> {
        init_tracing();
        BloomFilter::new(m, k, LocalBitmap::new()).expect("local init")
    }

    #[test]
    fn test_basic_membership() {
        let mut filter = local_filter(1000, 4);
        assert_basic_membership(&mut filter);
    }

    #[test]
    fn test_independent_storage_does_not_leak() {
        let mut first = local_filter(1000, 4);
        first.add_str("abc").unwrap();

        let mut second = local_filter(1000, 4);

        assert!(!second.test_str("abc").unwrap());
        assert_eq!(second.bitmap().bits_set(), 0);
    }

    #[test]
    fn test_no_false_negatives_large_filter() {
        let mut filter = local_filter(1 << 24, 7);
        assert_no_false_negatives(&mut filter, 10_000);
    }

    #[test]
    fn test_determinism() {
        let mut filter = local_filter(1000, 4);
        filter.add_str("abc").unwrap();
        assert_deterministic(&mut filter, &["abc", "def", "", "\u{1F600}"]);
    }

    #[test]
    fn test_zero_state() {
        let mut filter = local_filter(100_000, 4);
        assert_zero_state(&mut filter, 1000);
    }

    #[test]
    fn test_random_binary_items() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut filter = local_filter(50_000, 5);
        let items: Vec<Vec<u8>> = (0..2000)
            .map(|_| {
                let len = rng.gen_range(0..64);
                (0..len).map(|_| rng.gen()).collect()
            })
            .collect();

        for item in &items {
            filter.add(item).unwrap();
        }
        for item in &items {
            assert!(filter.test(item).unwrap());
        }
    }
}
