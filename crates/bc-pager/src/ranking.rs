//! Rank numbers for a page of scored rows

/// Competition ranking ("1, 2, 2, 4") for rows sorted by descending score.
///
/// `offset` is the zero-based position of the first row in the full list,
/// so page 2 of a 10-row list starts at rank 11. Ties are only detected
/// within the page.
pub fn display_ranks<S: PartialEq>(offset: u64, scores: &[S]) -> Vec<u64> {
    let mut ranks: Vec<u64> = Vec::with_capacity(scores.len());

    for (i, score) in scores.iter().enumerate() {
        let rank = match ranks.last() {
            Some(&previous) if scores[i - 1] == *score => previous,
            _ => offset + i as u64 + 1,
        };
        ranks.push(rank);
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_scores() {
        assert_eq!(display_ranks(0, &[30, 20, 10]), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_share_rank_and_skip() {
        assert_eq!(display_ranks(0, &[30, 20, 20, 10]), vec![1, 2, 2, 4]);
        assert_eq!(display_ranks(0, &[5.0, 5.0, 5.0]), vec![1, 1, 1]);
    }

    #[test]
    fn test_offset_for_later_pages() {
        assert_eq!(display_ranks(10, &[8, 7, 7]), vec![11, 12, 12]);
    }

    #[test]
    fn test_empty_page() {
        assert!(display_ranks::<u32>(20, &[]).is_empty());
    }
}
