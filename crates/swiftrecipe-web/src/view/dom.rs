//! In-memory DOM for testing the dashboard without a browser.
//!
//! Elements live in a flat ID-keyed table; parents refer to their
//! children by ID. Cards are kept in document order so their position in
//! the grid is their index.

use std::collections::HashMap;

use crate::pager::PageControl;
use crate::view::{
    PagerView, SearchView, CARD_CLASS, GRID_ID, PAGINATION_ID, SEARCH_BUTTON_ID, SEARCH_INPUT_ID,
    SELECTED_CLASS,
};

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Whether the element is displayed
    pub visible: bool,
    /// IDs of child elements, in order
    pub children: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Sets the ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a class once
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// New value typed into an input
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value
        value: String,
    },
    /// Navigation to a new location
    Navigate {
        /// Target URL
        url: String,
    },
}

impl DomEvent {
    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }
}

/// Mock DOM shaped like the recipe dashboard
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    cards: Vec<String>,
    controls: Vec<String>,
    event_history: Vec<DomEvent>,
    navigation: Vec<String>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the dashboard: a grid of `cards` recipe cards, an empty
    /// pagination container and a search box with a disabled button.
    #[must_use]
    pub fn dashboard(cards: usize) -> Self {
        let mut dom = Self::new();
        dom.register_element(DomElement::new("div").with_id(GRID_ID).with_class("row"));
        dom.register_element(
            DomElement::new("div")
                .with_id(PAGINATION_ID)
                .with_class("pagination"),
        );
        dom.register_element(
            DomElement::new("input")
                .with_id(SEARCH_INPUT_ID)
                .with_attr("type", "text")
                .with_attr("value", ""),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(SEARCH_BUTTON_ID)
                .with_text("Search")
                .with_attr("disabled", ""),
        );

        for index in 0..cards {
            let card = DomElement::new("div")
                .with_id(&format!("recipe-{index}"))
                .with_class(CARD_CLASS)
                .with_text(&format!("Recipe {}", index + 1));
            dom.append_child(GRID_ID, card);
        }
        dom
    }

    /// Registers an element for ID lookup; elements without an ID are dropped
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Appends `child` under `parent_id` and registers it
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if child.id.is_empty() {
            return;
        }
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.id.clone());
        }
        if child.has_class(CARD_CLASS) {
            self.cards.push(child.id.clone());
        }
        self.register_element(child);
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Children of `id`, in order
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&DomElement> {
        self.elements
            .get(id)
            .map(|parent| {
                parent
                    .children
                    .iter()
                    .filter_map(|child| self.elements.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sets the value of an input and records the input event
    pub fn type_into(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert("value".to_string(), value.to_string());
        }
        self.event_history.push(DomEvent::input(id, value));
    }

    /// Recorded events, oldest first
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Indices of the cards currently displayed
    #[must_use]
    pub fn visible_card_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, id)| self.elements.get(*id).is_some_and(|card| card.visible))
            .map(|(index, _)| index)
            .collect()
    }

    /// Page control IDs in creation order
    #[must_use]
    pub fn control_ids(&self) -> Vec<String> {
        self.controls.clone()
    }

    /// IDs of controls carrying the selected class
    #[must_use]
    pub fn active_control_ids(&self) -> Vec<String> {
        self.controls
            .iter()
            .filter(|id| {
                self.elements
                    .get(*id)
                    .is_some_and(|control| control.has_class(SELECTED_CLASS))
            })
            .cloned()
            .collect()
    }

    /// Whether the element has a `disabled` attribute
    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|elem| elem.attributes.contains_key("disabled"))
    }

    /// Current location, if the view navigated
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.navigation.last().map(String::as_str)
    }

    /// Every location navigated to, oldest first
    #[must_use]
    pub fn navigation_history(&self) -> &[String] {
        &self.navigation
    }
}

impl PagerView for MockDom {
    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn set_card_visible(&mut self, index: usize, visible: bool) {
        if let Some(card) = self
            .cards
            .get(index)
            .and_then(|id| self.elements.get_mut(id))
        {
            card.visible = visible;
        }
    }

    fn create_page_control(&mut self, control: &PageControl) {
        let button = DomElement::new("button")
            .with_id(&control.id)
            .with_text(&control.label)
            .with_attr("data-page", &control.page.to_string());
        self.controls.push(control.id.clone());
        self.append_child(PAGINATION_ID, button);
    }

    fn set_control_active(&mut self, control_id: &str, active: bool) {
        if let Some(control) = self.elements.get_mut(control_id) {
            if active {
                control.add_class(SELECTED_CLASS);
            } else {
                control.remove_class(SELECTED_CLASS);
            }
        }
    }
}

impl SearchView for MockDom {
    fn input_value(&self) -> String {
        self.elements
            .get(SEARCH_INPUT_ID)
            .and_then(|input| input.get_attr("value"))
            .unwrap_or_default()
            .to_string()
    }

    fn navigate(&mut self, url: &str) {
        self.navigation.push(url.to_string());
        self.event_history.push(DomEvent::Navigate {
            url: url.to_string(),
        });
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        if let Some(button) = self.elements.get_mut(SEARCH_BUTTON_ID) {
            if enabled {
                button.attributes.remove("disabled");
            } else {
                button.attributes.insert("disabled".to_string(), String::new());
            }
        }
    }
}
