//! Remote backend against a live Redis server
//!
//! Ignored by default; run with a server on 127.0.0.1:6379:
//! `cargo test -p bloom-tests -- --ignored`

#[cfg(test)]
mod tests {
    use bloom_bitmap::{
        BitmapError, BloomFilter, FilterError, RemoteBitmap, RemoteBitmapConfigBuilder,
    };

    use crate::init_tracing;
    use crate::integration::scenarios::*;

    const ADDRESS: &str = "127.0.0.1:6379";

    fn redis_bitmap(key: &str, remove_key_if_exists: bool) -> RemoteBitmap<bloom_bitmap::RedisConnector> {
        init_tracing();
        let config = RemoteBitmapConfigBuilder::new()
            .address(ADDRESS)
            .bitmap_key(key)
            .remove_key_if_exists(remove_key_if_exists)
            .build()
            .expect("valid config");
        RemoteBitmap::redis(config)
    }

    #[test]
    #[ignore = "requires a Redis server on 127.0.0.1:6379"]
    fn test_redis_basic_membership() {
        let mut filter = BloomFilter::new(1000, 4, redis_bitmap("bloom_tests:basic", true)).unwrap();

        assert_basic_membership(&mut filter);
        filter.close();
    }

    #[test]
    #[ignore = "requires a Redis server on 127.0.0.1:6379"]
    fn test_redis_large_filter_no_false_negatives() {
        let mut filter = BloomFilter::new(
            u32::MAX as u64,
            7,
            redis_bitmap("bloom_tests:large", true),
        )
        .unwrap();

        assert_no_false_negatives(&mut filter, 10_001);
        filter.close();
    }

    #[test]
    #[ignore = "requires a Redis server on 127.0.0.1:6379"]
    fn test_redis_conflict_then_reinit() {
        let key = "bloom_tests:lifecycle";
        let mut first = BloomFilter::new(1000, 4, redis_bitmap(key, true)).unwrap();
        first.add_str("abc").unwrap();

        let conflict = BloomFilter::new(1000, 4, redis_bitmap(key, false));
        assert!(matches!(
            conflict,
            Err(FilterError::Bitmap(BitmapError::KeyConflict { .. }))
        ));
        assert!(first.test_str("abc").unwrap(), "Conflicting init must not touch the key");
        first.close();

        let mut second = BloomFilter::new(1000, 4, redis_bitmap(key, true)).unwrap();
        assert!(!second.test_str("abc").unwrap());
        second.close();
    }
}
