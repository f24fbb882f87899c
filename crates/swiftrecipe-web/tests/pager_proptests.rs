//! Property-based tests for the card grid pager

use proptest::prelude::*;
use swiftrecipe_web::prelude::*;

const PER_PAGE: usize = DEFAULT_ITEMS_PER_PAGE;

/// Grids from empty up to a few dozen pages
fn card_count_strategy() -> impl Strategy<Value = usize> {
    0usize..400usize
}

/// A grid with at least one card, plus a valid page on it
fn grid_and_page_strategy() -> impl Strategy<Value = (usize, u32)> {
    (1usize..400usize).prop_flat_map(|cards| {
        let pages = cards.div_ceil(PER_PAGE) as u32;
        (Just(cards), 1u32..=pages)
    })
}

proptest! {
    /// Page count is the ceiling of cards over page size
    #[test]
    fn prop_total_pages_is_ceiling(cards in card_count_strategy()) {
        let pager = Pager::initialize(MockDom::dashboard(cards));
        let expected = cards.div_ceil(PER_PAGE) as u32;
        prop_assert_eq!(pager.total_pages(), expected);
    }

    /// One control per page, numbered 1..=N without gaps
    #[test]
    fn prop_controls_numbered_without_gaps(cards in card_count_strategy()) {
        let pager = Pager::initialize(MockDom::dashboard(cards));
        let pages: Vec<u32> = pager.controls().iter().map(|c| c.page).collect();
        let expected: Vec<u32> = (1..=pager.total_pages()).collect();
        prop_assert_eq!(pages, expected);

        let ids = pager.view().control_ids();
        let expected_ids: Vec<String> = (1..=pager.total_pages()).map(control_id).collect();
        prop_assert_eq!(ids, expected_ids);
    }

    /// Visible cards are exactly the selected page's slice
    #[test]
    fn prop_visible_set_matches_page((cards, page) in grid_and_page_strategy()) {
        let mut pager = Pager::initialize(MockDom::dashboard(cards));
        prop_assert_eq!(pager.show_page(page), Some(page));

        let start = (page as usize - 1) * PER_PAGE;
        let expected: Vec<usize> = (start..(start + PER_PAGE).min(cards)).collect();
        prop_assert_eq!(pager.view().visible_card_indices(), expected);
    }

    /// Exactly one control is active and it matches the shown page
    #[test]
    fn prop_single_active_control((cards, page) in grid_and_page_strategy()) {
        let mut pager = Pager::initialize(MockDom::dashboard(cards));
        pager.show_page(page);

        prop_assert_eq!(pager.view().active_control_ids(), vec![control_id(page)]);
        let active: Vec<u32> = pager
            .controls()
            .iter()
            .filter(|c| c.active)
            .map(|c| c.page)
            .collect();
        prop_assert_eq!(active, vec![page]);
    }

    /// Showing a page twice leaves the same state as showing it once
    #[test]
    fn prop_show_page_idempotent((cards, page) in grid_and_page_strategy()) {
        let mut pager = Pager::initialize(MockDom::dashboard(cards));
        pager.show_page(page);
        let once = (pager.state(), pager.view().visible_card_indices());
        pager.show_page(page);
        let twice = (pager.state(), pager.view().visible_card_indices());
        prop_assert_eq!(once, twice);
    }

    /// Any page number lands on a valid page
    #[test]
    fn prop_out_of_range_clamps(cards in 1usize..400usize, page in any::<u32>()) {
        let mut pager = Pager::initialize(MockDom::dashboard(cards));
        let shown = pager.show_page(page).unwrap();
        prop_assert!(shown >= 1 && shown <= pager.total_pages());
        prop_assert_eq!(pager.view().active_control_ids().len(), 1);
    }

    /// Clicking a control selects the page it was created for
    #[test]
    fn prop_click_selects_own_page((cards, page) in grid_and_page_strategy()) {
        let mut pager = Pager::initialize(MockDom::dashboard(cards));
        prop_assert_eq!(pager.handle_click(&control_id(page)), Some(page));
        prop_assert_eq!(pager.current_page(), Some(page));
    }
}

proptest! {
    /// Whitespace-only input never enables search
    #[test]
    fn prop_blank_input_not_searchable(blank in "[ \t\n\r]{0,12}") {
        prop_assert!(!is_searchable(&blank));
    }

    /// Encoded queries only contain URL-safe characters
    #[test]
    fn prop_encoded_query_is_url_safe(text in "\\PC{0,40}") {
        let encoded = encode_uri_component(&text);
        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()%".contains(c)));
    }
}
