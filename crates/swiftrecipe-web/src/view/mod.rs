//! View capabilities for the dashboard.
//!
//! The pager and the search redirector never touch a document directly.
//! They drive one of these traits instead, so the same logic runs against
//! the in-memory [`MockDom`] in tests and against the real page in the
//! browser build.

#[cfg(feature = "wasm")]
mod browser;
mod dom;

#[cfg(feature = "wasm")]
pub use browser::{install_pager, install_search, start, BrowserDom, BrowserSearch};
pub use dom::{DomElement, DomEvent, MockDom};

use crate::pager::PageControl;

/// Class carried by every card in the recipe grid
pub const CARD_CLASS: &str = "card";

/// ID of the grid container holding the cards
pub const GRID_ID: &str = "row";

/// ID of the container the page controls are appended to
pub const PAGINATION_ID: &str = "pagination";

/// Class marking the active page control
pub const SELECTED_CLASS: &str = "selected";

/// ID of the search text input
pub const SEARCH_INPUT_ID: &str = "searchInput";

/// ID of the search trigger button
pub const SEARCH_BUTTON_ID: &str = "searchButton";

/// Surface the pager renders onto.
///
/// Cards are addressed by their document-order index, controls by the
/// element ID carried in their [`PageControl`].
pub trait PagerView {
    /// Number of cards in the grid
    fn card_count(&self) -> usize;

    /// Shows or hides the card at `index`
    fn set_card_visible(&mut self, index: usize, visible: bool);

    /// Appends a clickable control for one page
    fn create_page_control(&mut self, control: &PageControl);

    /// Adds or removes the active marker on a control
    fn set_control_active(&mut self, control_id: &str, active: bool);
}

/// Surface the search redirector reads from and navigates
pub trait SearchView {
    /// Current text of the search input
    fn input_value(&self) -> String;

    /// Navigates the view to `url`
    fn navigate(&mut self, url: &str);

    /// Enables or disables the search trigger
    fn set_search_enabled(&mut self, enabled: bool);
}

impl<V: PagerView + ?Sized> PagerView for &mut V {
    fn card_count(&self) -> usize {
        (**self).card_count()
    }

    fn set_card_visible(&mut self, index: usize, visible: bool) {
        (**self).set_card_visible(index, visible);
    }

    fn create_page_control(&mut self, control: &PageControl) {
        (**self).create_page_control(control);
    }

    fn set_control_active(&mut self, control_id: &str, active: bool) {
        (**self).set_control_active(control_id, active);
    }
}

impl<V: SearchView + ?Sized> SearchView for &mut V {
    fn input_value(&self) -> String {
        (**self).input_value()
    }

    fn navigate(&mut self, url: &str) {
        (**self).navigate(url);
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        (**self).set_search_enabled(enabled);
    }
}
