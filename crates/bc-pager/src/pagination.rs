//! Page limit math for fixed-size pages
//!
//! Pages are 1-indexed. A limit of `0` means either an empty list or a list
//! whose size has not been fetched yet.

use std::num::NonZeroU32;

/// Number of pages needed to show `total_count` items, `ceil(total / size)`
pub fn compute_page_limit(total_count: u64, page_size: NonZeroU32) -> u32 {
    let pages = total_count.div_ceil(u64::from(page_size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, limit]`; `1` when there are no pages
pub fn clamp_page(requested: i64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    requested.clamp(1, i64::from(limit)) as u32
}

/// Whether `requested` may be fetched given the known limit.
///
/// Page `0` is never valid. While the limit is still unknown (`0`) any page
/// from `1` up is accepted, the response will tell the real limit.
pub fn is_in_range(requested: u32, limit: u32) -> bool {
    requested >= 1 && (limit == 0 || requested <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_page_limit_examples() {
        assert_eq!(compute_page_limit(0, size(10)), 0);
        assert_eq!(compute_page_limit(10, size(10)), 1);
        assert_eq!(compute_page_limit(11, size(10)), 2);
        assert_eq!(compute_page_limit(1, size(1)), 1);
        assert_eq!(compute_page_limit(250, size(100)), 3);
    }

    #[test]
    fn test_page_limit_is_ceiling() {
        for total in 0..200u64 {
            for page_size in 1..15u32 {
                let expected = (total as f64 / page_size as f64).ceil() as u32;
                assert_eq!(
                    compute_page_limit(total, size(page_size)),
                    expected,
                    "total={} size={}",
                    total,
                    page_size
                );
            }
        }
    }

    #[test]
    fn test_page_limit_saturates() {
        assert_eq!(compute_page_limit(u64::MAX, size(1)), u32::MAX);
    }

    #[test]
    fn test_clamp_without_pages() {
        assert_eq!(clamp_page(5, 0), 1);
        assert_eq!(clamp_page(-3, 0), 1);
    }

    #[test]
    fn test_clamp_into_bounds() {
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(-7, 4), 1);
        assert_eq!(clamp_page(3, 4), 3);
        assert_eq!(clamp_page(9, 4), 4);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for limit in 1..12u32 {
            for x in -5..20i64 {
                let once = clamp_page(x, limit);
                assert_eq!(clamp_page(i64::from(once), limit), once);
            }
        }
    }

    #[test]
    fn test_range_check() {
        assert!(!is_in_range(0, 0));
        assert!(is_in_range(1, 0));
        assert!(is_in_range(7, 0));
        assert!(is_in_range(3, 3));
        assert!(!is_in_range(4, 3));
        assert!(!is_in_range(0, 3));
    }
}
