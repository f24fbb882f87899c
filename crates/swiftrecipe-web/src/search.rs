//! Search redirect.
//!
//! Reads the search input and navigates to `/results?query=<text>`. The
//! trigger is only enabled while the trimmed input is non-empty.

use tracing::debug;

use crate::view::SearchView;

/// Path of the search results page
pub const RESULTS_PATH: &str = "/results";

/// Query parameter carrying the search text
pub const QUERY_PARAM: &str = "query";

/// Characters `encodeURIComponent` leaves alone but `urlencoding` escapes
const SUB_DELIMS_KEPT: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encodes `text` the way browsers' `encodeURIComponent` does.
///
/// Unreserved characters `A-Z a-z 0-9 - _ . ! ~ * ' ( )` pass through;
/// every other byte of the UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escaped, kept) in SUB_DELIMS_KEPT {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, kept);
        }
    }
    encoded
}

/// Navigation target for a search
#[must_use]
pub fn search_target(text: &str) -> String {
    format!("{RESULTS_PATH}?{QUERY_PARAM}={}", encode_uri_component(text))
}

/// Characters `String.prototype.trim` removes: ECMAScript white space
/// and line terminators.
///
/// Unlike [`char::is_whitespace`], this includes U+FEFF and excludes U+0085.
#[must_use]
pub const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Whether the trigger should be enabled for `text`
#[must_use]
pub fn is_searchable(text: &str) -> bool {
    text.chars().any(|c| !is_js_whitespace(c))
}

/// Redirects searches typed into a [`SearchView`]
#[derive(Debug)]
pub struct SearchRedirector<V> {
    view: V,
}

impl<V: SearchView> SearchRedirector<V> {
    /// Creates a redirector over `view`
    pub const fn new(view: V) -> Self {
        Self { view }
    }

    /// Input-change handler: enables the trigger iff the input has text.
    ///
    /// Returns the new enabled state.
    pub fn on_input(&mut self) -> bool {
        let enabled = is_searchable(&self.view.input_value());
        self.view.set_search_enabled(enabled);
        enabled
    }

    /// Navigates to the results page for the current input.
    ///
    /// Returns the target URL.
    pub fn search(&mut self) -> String {
        let target = search_target(&self.view.input_value());
        debug!(%target, "search redirect");
        self.view.navigate(&target);
        target
    }

    /// The underlying view
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Consumes the redirector, returning the view
    pub fn into_view(self) -> V {
        self.view
    }
}
