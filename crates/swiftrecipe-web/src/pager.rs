//! Card grid pagination.
//!
//! The pager reads the card count once, creates one numbered control per
//! page and shows exactly one page of cards at a time. Page numbers are
//! 1-based; card indices are 0-based in document order.
//!
//! Out-of-range page numbers are clamped to `[1, total_pages]`.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PagerError, PagerResult};
use crate::view::PagerView;

/// Cards per page used by the dashboard
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Prefix of every page control's element ID
pub const CONTROL_ID_PREFIX: &str = "page-";

/// Pager configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    items_per_page: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PagerConfig {
    /// Creates a configuration with a custom page size
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::ZeroPageSize`] if `items_per_page` is 0
    pub const fn new(items_per_page: usize) -> PagerResult<Self> {
        if items_per_page == 0 {
            return Err(PagerError::ZeroPageSize);
        }
        Ok(Self { items_per_page })
    }

    /// Number of cards on a full page
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }
}

/// One numbered page control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageControl {
    /// Page number this control selects (1-based)
    pub page: u32,
    /// Element ID, `page-<n>`
    pub id: String,
    /// Visible label
    pub label: String,
    /// Whether this control marks the displayed page
    pub active: bool,
}

impl PageControl {
    /// Creates an inactive control for `page`
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            page,
            id: control_id(page),
            label: page.to_string(),
            active: false,
        }
    }
}

/// Element ID of the control for `page`
#[must_use]
pub fn control_id(page: u32) -> String {
    format!("{CONTROL_ID_PREFIX}{page}")
}

/// Serializable snapshot of the pager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerState {
    /// Cards counted at initialization
    pub total_items: usize,
    /// Number of pages
    pub total_pages: u32,
    /// Displayed page, if any
    pub current_page: Option<u32>,
    /// Controls in page order
    pub controls: Vec<PageControl>,
}

/// Paginates the cards of a [`PagerView`]
#[derive(Debug)]
pub struct Pager<V> {
    view: V,
    config: PagerConfig,
    total_items: usize,
    controls: Vec<PageControl>,
    current_page: Option<u32>,
}

impl<V: PagerView> Pager<V> {
    /// Initializes pagination with the default page size
    pub fn initialize(view: V) -> Self {
        Self::with_config(view, PagerConfig::default())
    }

    /// Initializes pagination: creates every control, then shows page 1.
    ///
    /// With no cards, nothing is rendered and no page is shown.
    pub fn with_config(view: V, config: PagerConfig) -> Self {
        let total_items = view.card_count();
        let mut pager = Self {
            view,
            config,
            total_items,
            controls: Vec::new(),
            current_page: None,
        };

        let total_pages = pager.total_pages();
        debug!(total_items, total_pages, "initializing pager");

        for page in 1..=total_pages {
            let control = PageControl::new(page);
            pager.view.create_page_control(&control);
            pager.controls.push(control);
        }

        if total_pages > 0 {
            pager.show_page(1);
        }
        pager
    }

    /// Shows `page` and marks its control active.
    ///
    /// Returns the page actually shown after clamping, or `None` when
    /// there are no pages.
    pub fn show_page(&mut self, page: u32) -> Option<u32> {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            debug!(page, "no pages to show");
            return None;
        }

        let shown = page.clamp(1, total_pages);
        if shown != page {
            warn!(requested = page, shown, total_pages, "page out of range, clamped");
        }

        let bounds = self.page_bounds(shown);
        for index in 0..self.total_items {
            self.view.set_card_visible(index, bounds.contains(&index));
        }

        for control in &mut self.controls {
            control.active = false;
            self.view.set_control_active(&control.id, false);
        }
        if let Some(control) = self.controls.get_mut(shown as usize - 1) {
            control.active = true;
            self.view.set_control_active(&control.id, true);
        }

        self.current_page = Some(shown);
        debug!(page = shown, start = bounds.start, end = bounds.end, "page shown");
        Some(shown)
    }

    /// Selects the page whose control has `element_id`.
    ///
    /// Unknown IDs are ignored.
    pub fn handle_click(&mut self, element_id: &str) -> Option<u32> {
        let page = self
            .controls
            .iter()
            .find(|control| control.id == element_id)
            .map(|control| control.page)?;
        self.show_page(page)
    }

    /// Number of pages, `ceil(total_items / items_per_page)`
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(self.config.items_per_page());
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Cards counted at initialization
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Cards per full page
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.config.items_per_page()
    }

    /// Displayed page, if any
    #[must_use]
    pub const fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Controls in page order
    #[must_use]
    pub fn controls(&self) -> &[PageControl] {
        &self.controls
    }

    /// Index range of the visible cards, clipped to the card count
    #[must_use]
    pub fn visible_range(&self) -> Option<Range<usize>> {
        self.current_page.map(|page| {
            let bounds = self.page_bounds(page);
            bounds.start..bounds.end.min(self.total_items)
        })
    }

    /// Snapshot of the pager state
    #[must_use]
    pub fn state(&self) -> PagerState {
        PagerState {
            total_items: self.total_items,
            total_pages: self.total_pages(),
            current_page: self.current_page,
            controls: self.controls.clone(),
        }
    }

    /// The underlying view
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Consumes the pager, returning the view
    pub fn into_view(self) -> V {
        self.view
    }

    /// `[start, end)` card indices of `page`, unclipped
    fn page_bounds(&self, page: u32) -> Range<usize> {
        let per_page = self.config.items_per_page();
        let start = (page as usize - 1) * per_page;
        start..start + per_page
    }
}
