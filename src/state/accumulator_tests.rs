//! Tests for the page accumulator.

use super::*;

fn page(data: Vec<u32>, page: u32, limit: u32, total_pages: u32) -> PageResponse<u32> {
    let count = u64::from(total_pages) * u64::from(limit);
    PageResponse::new(data, page, limit).with_totals(total_pages, count)
}

#[test]
fn starts_empty_without_more_pages() {
    let acc: Accumulator<u32> = Accumulator::new();
    assert!(acc.items().is_empty());
    assert_eq!(acc.last_page(), 0);
    assert_eq!(acc.pagination(), None);
    assert!(!acc.has_more_pages(), "No pagination yet means no more pages");
}

#[test]
fn page_one_replaces_items() {
    let mut acc = Accumulator::new();
    acc.merge(page(vec![1, 2], 1, 2, 2));
    acc.merge(page(vec![3, 4], 2, 2, 2));

    let kind = acc.merge(page(vec![9], 1, 2, 1));

    assert_eq!(kind, Some(MergeKind::Replaced));
    assert_eq!(acc.items(), &[9]);
    assert_eq!(acc.last_page(), 1);
}

#[test]
fn next_page_appends_in_received_order() {
    let mut acc = Accumulator::new();
    acc.merge(page(vec![1, 2], 1, 2, 3));

    let kind = acc.merge(page(vec![3, 4], 2, 2, 3));

    assert_eq!(kind, Some(MergeKind::Appended));
    assert_eq!(acc.items(), &[1, 2, 3, 4]);
    assert_eq!(acc.last_page(), 2);
}

#[test]
fn out_of_sequence_page_is_rejected() {
    let mut acc = Accumulator::new();
    acc.merge(page(vec![1, 2], 1, 2, 5));

    assert_eq!(acc.merge(page(vec![5, 6], 3, 2, 5)), None, "Page 3 skips page 2");
    assert_eq!(acc.items(), &[1, 2], "Rejected merge must not touch items");
    assert_eq!(acc.last_page(), 1);
}

#[test]
fn repeated_page_is_rejected() {
    let mut acc = Accumulator::new();
    acc.merge(page(vec![1, 2], 1, 2, 3));
    acc.merge(page(vec![3, 4], 2, 2, 3));

    assert_eq!(acc.merge(page(vec![3, 4], 2, 2, 3)), None);
    assert_eq!(acc.items(), &[1, 2, 3, 4], "No duplicates from a repeated page");
}

#[test]
fn page_two_on_empty_accumulator_is_rejected() {
    let mut acc = Accumulator::new();
    assert_eq!(acc.merge(page(vec![3, 4], 2, 2, 3)), None);
    assert!(acc.items().is_empty());
}

#[test]
fn has_more_pages_follows_total_pages() {
    let mut acc = Accumulator::new();
    acc.merge(page(vec![1], 1, 1, 3));
    assert!(acc.has_more_pages(), "page 1 of 3");
    acc.merge(page(vec![2], 2, 1, 3));
    assert!(acc.has_more_pages(), "page 2 of 3");
    acc.merge(page(vec![3], 3, 1, 3));
    assert!(!acc.has_more_pages(), "page 3 of 3");
}

#[test]
fn missing_totals_are_inferred_from_full_page() {
    let mut acc = Accumulator::new();
    acc.merge(PageResponse::new(vec![1, 2], 1, 2));

    let info = acc.pagination().unwrap();
    assert_eq!(info.total_pages, 2);
    assert_eq!(info.total_count, None);
    assert!(acc.has_more_pages());

    acc.merge(PageResponse::new(vec![3], 2, 2));
    assert!(!acc.has_more_pages(), "Short page is the last one");
}

#[test]
fn inference_misfires_on_exact_multiple() {
    // 4 items, limit 2, no totals: page 2 is full, so a third (empty) page is assumed.
    let mut acc = Accumulator::new();
    acc.merge(PageResponse::new(vec![1, 2], 1, 2));
    acc.merge(PageResponse::new(vec![3, 4], 2, 2));
    assert!(acc.has_more_pages());

    acc.merge(PageResponse::new(vec![], 3, 2));
    assert!(!acc.has_more_pages());
    assert_eq!(acc.items(), &[1, 2, 3, 4]);
}

#[test]
fn reset_clears_everything() {
    let mut acc = Accumulator::new();
    acc.merge(page(vec![1, 2], 1, 2, 4));
    acc.reset();

    assert!(acc.items().is_empty());
    assert_eq!(acc.last_page(), 0);
    assert_eq!(acc.pagination(), None);
    assert_eq!(acc.next_page(), 1);
}

#[test]
fn total_count_is_carried_through() {
    let mut acc = Accumulator::new();
    acc.merge(PageResponse::new(vec![1, 2], 1, 2).with_totals(13, 25));
    assert_eq!(acc.pagination().unwrap().total_count, Some(25));
}
