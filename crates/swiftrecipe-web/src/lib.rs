//! SwiftRecipe dashboard front-end
//!
//! Paginates the recipe card grid and redirects searches to the results
//! page. Both components drive an injected view capability, so the same
//! logic runs against the browser DOM (feature `wasm`) and against
//! [`MockDom`](view::MockDom) in tests.
//!
//! # Example
//!
//! ```rust
//! use swiftrecipe_web::prelude::*;
//!
//! let mut pager = Pager::initialize(MockDom::dashboard(25));
//! assert_eq!(pager.total_pages(), 3);
//!
//! pager.show_page(3);
//! assert_eq!(pager.view().visible_card_indices(), vec![20, 21, 22, 23, 24]);
//!
//! assert_eq!(search_target("chicken soup"), "/results?query=chicken%20soup");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod error;
pub mod pager;
pub mod search;
pub mod view;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{PagerError, PagerResult, ViewError, ViewResult};
    pub use crate::pager::{
        control_id, PageControl, Pager, PagerConfig, PagerState, DEFAULT_ITEMS_PER_PAGE,
    };
    pub use crate::search::{
        encode_uri_component, is_searchable, search_target, SearchRedirector, QUERY_PARAM,
        RESULTS_PATH,
    };
    pub use crate::view::{DomElement, DomEvent, MockDom, PagerView, SearchView};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::view::{SEARCH_BUTTON_ID, SEARCH_INPUT_ID};

    #[test]
    fn test_prelude_imports() {
        let pager = Pager::initialize(MockDom::dashboard(1));
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(DEFAULT_ITEMS_PER_PAGE, 10);
    }

    #[test]
    fn test_dashboard_session() {
        let mut dom = MockDom::dashboard(23);

        let mut pager = Pager::initialize(&mut dom);
        pager.handle_click("page-3");
        drop(pager);
        assert_eq!(dom.visible_card_indices(), vec![20, 21, 22]);

        dom.type_into(SEARCH_INPUT_ID, "beef stew");
        let mut search = SearchRedirector::new(&mut dom);
        search.on_input();
        search.search();
        drop(search);

        assert!(!dom.is_disabled(SEARCH_BUTTON_ID));
        assert_eq!(dom.location(), Some("/results?query=beef%20stew"));
        // Searching does not disturb the grid
        assert_eq!(dom.active_control_ids(), vec!["page-3".to_string()]);
    }
}
