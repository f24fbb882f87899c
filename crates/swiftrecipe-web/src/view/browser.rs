//! Browser bindings for the dashboard.
//!
//! Binds the pager and the search redirector to the live document through
//! `web-sys`. Compiled only with the `wasm` feature.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

use crate::error::{ViewError, ViewResult};
use crate::pager::{PageControl, Pager};
use crate::search::SearchRedirector;
use crate::view::{
    PagerView, SearchView, CARD_CLASS, PAGINATION_ID, SEARCH_BUTTON_ID, SEARCH_INPUT_ID,
    SELECTED_CLASS,
};

fn js_error(value: &JsValue) -> ViewError {
    ViewError::dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn report(err: &ViewError) {
    console::error_1(&err.to_string().into());
}

fn window() -> ViewResult<Window> {
    web_sys::window().ok_or_else(|| ViewError::dom("no global window"))
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> ViewResult<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| ViewError::missing(id))
}

/// Card grid and pagination container of the live document
#[derive(Debug)]
pub struct BrowserDom {
    document: Document,
    cards: Vec<HtmlElement>,
    pagination: Element,
}

impl BrowserDom {
    /// Collects the cards, in document order, and the pagination container
    ///
    /// # Errors
    ///
    /// Returns an error if the pagination container is missing or the
    /// card query fails
    pub fn from_document(document: Document) -> ViewResult<Self> {
        let pagination = document
            .get_element_by_id(PAGINATION_ID)
            .ok_or_else(|| ViewError::missing(PAGINATION_ID))?;

        let nodes = document
            .query_selector_all(&format!(".{CARD_CLASS}"))
            .map_err(|e| js_error(&e))?;
        let cards = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();

        Ok(Self {
            document,
            cards,
            pagination,
        })
    }
}

impl PagerView for BrowserDom {
    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn set_card_visible(&mut self, index: usize, visible: bool) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        if let Err(e) = card.style().set_property("display", display) {
            report(&js_error(&e));
        }
    }

    fn create_page_control(&mut self, control: &PageControl) {
        let button = match self.document.create_element("button") {
            Ok(button) => button,
            Err(e) => return report(&js_error(&e)),
        };
        button.set_id(&control.id);
        button.set_text_content(Some(&control.label));
        if let Err(e) = self.pagination.append_child(&button) {
            report(&js_error(&e));
        }
    }

    fn set_control_active(&mut self, control_id: &str, active: bool) {
        let Some(control) = self.document.get_element_by_id(control_id) else {
            return report(&ViewError::missing(control_id));
        };
        let classes = control.class_list();
        let result = if active {
            classes.add_1(SELECTED_CLASS)
        } else {
            classes.remove_1(SELECTED_CLASS)
        };
        if let Err(e) = result {
            report(&js_error(&e));
        }
    }
}

/// Search input and trigger of the live document
#[derive(Debug)]
pub struct BrowserSearch {
    window: Window,
    input: HtmlInputElement,
    button: HtmlButtonElement,
}

impl BrowserSearch {
    /// Looks up the search input and button
    ///
    /// # Errors
    ///
    /// Returns an error if either element is missing
    pub fn from_document(window: Window, document: &Document) -> ViewResult<Self> {
        Ok(Self {
            window,
            input: element_by_id(document, SEARCH_INPUT_ID)?,
            button: element_by_id(document, SEARCH_BUTTON_ID)?,
        })
    }
}

impl SearchView for BrowserSearch {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            report(&js_error(&e));
        }
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        self.button.set_disabled(!enabled);
    }
}

/// Creates the pager and binds one click handler per control.
///
/// Every handler owns a copy of its control's page number.
///
/// # Errors
///
/// Returns an error if a required element is missing or a listener
/// cannot be attached
pub fn install_pager(document: &Document) -> ViewResult<Rc<RefCell<Pager<BrowserDom>>>> {
    let view = BrowserDom::from_document(document.clone())?;
    let pager = Rc::new(RefCell::new(Pager::initialize(view)));

    let controls: Vec<PageControl> = pager.borrow().controls().to_vec();
    for control in controls {
        let page = control.page;
        let target = Rc::clone(&pager);
        let on_click = Closure::<dyn FnMut()>::new(move || {
            target.borrow_mut().show_page(page);
        });
        let button: Element = element_by_id(document, &control.id)?;
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|e| js_error(&e))?;
        on_click.forget();
    }

    Ok(pager)
}

/// Binds the input observer that enables the search button
///
/// # Errors
///
/// Returns an error if the search elements are missing or the listener
/// cannot be attached
pub fn install_search(window: &Window, document: &Document) -> ViewResult<()> {
    let view = BrowserSearch::from_document(window.clone(), document)?;
    let input = view.input.clone();
    let redirector = Rc::new(RefCell::new(SearchRedirector::new(view)));

    let on_input = Closure::<dyn FnMut()>::new(move || {
        redirector.borrow_mut().on_input();
    });
    input
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
        .map_err(|e| js_error(&e))?;
    on_input.forget();
    Ok(())
}

/// Navigates to the results page for the current search input.
///
/// Called from the search button's `onclick`.
#[wasm_bindgen]
pub fn search() {
    let result = window().and_then(|window| {
        let document = window
            .document()
            .ok_or_else(|| ViewError::dom("no document"))?;
        let view = BrowserSearch::from_document(window, &document)?;
        SearchRedirector::new(view).search();
        Ok(())
    });
    if let Err(e) = result {
        report(&e);
    }
}

/// Module entry point: wires search immediately and pagination once the
/// document has loaded
///
/// # Errors
///
/// Returns an error if there is no window or document
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = window().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if let Err(e) = install_search(&window, &document) {
        report(&e);
    }

    if document.ready_state() == "loading" {
        let loaded = document.clone();
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = install_pager(&loaded) {
                report(&e);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else if let Err(e) = install_pager(&document) {
        report(&e);
    }

    console::log_1(&"SwiftRecipe dashboard initialized".into());
    Ok(())
}
