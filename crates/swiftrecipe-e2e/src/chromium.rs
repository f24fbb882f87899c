//! Chromium driver over the Chrome `DevTools` Protocol.
//!
//! Thin adapter from [`BrowserDriver`] to `chromiumoxide`. Element snapshots
//! are taken in the page with `querySelectorAll`, so visibility follows the
//! computed style and layout box of each match.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Viewport;
use crate::driver::{BrowserDriver, ElementHandle};
use crate::result::{E2eError, E2eResult};

/// Launch options for [`ChromiumDriver`]
#[derive(Debug, Clone)]
pub struct ChromiumOptions {
    /// Run without a window
    pub headless: bool,
    /// Window size
    pub viewport: Viewport,
    /// Path to the chromium binary, auto-detected when `None`
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for ChromiumOptions {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl ChromiumOptions {
    /// Set the window size
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RawElement {
    tag_name: String,
    text_content: Option<String>,
    value: Option<String>,
    visible: bool,
}

/// Driver backed by a real Chromium page
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Browser,
    page: Arc<Mutex<Page>>,
    handler: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launches Chromium and opens a blank page
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Driver`] if the browser cannot be launched
    pub async fn launch(options: &ChromiumOptions) -> E2eResult<Self> {
        let mut builder =
            BrowserConfig::builder().window_size(options.viewport.width, options.viewport.height);
        if !options.headless {
            builder = builder.with_head();
        }
        if !options.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = options.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(E2eError::driver)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        debug!("chromium launched");

        Ok(Self {
            browser,
            page: Arc::new(Mutex::new(page)),
            handler,
        })
    }

    /// Closes the browser
    ///
    /// # Errors
    ///
    /// Returns an error if the browser does not shut down cleanly
    pub async fn close(mut self) -> E2eResult<()> {
        self.browser
            .close()
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        self.handler.abort();
        Ok(())
    }

    fn snapshot_script(selector: &str) -> E2eResult<String> {
        let selector = serde_json::to_string(selector)?;
        Ok(format!(
            "Array.from(document.querySelectorAll({selector})).map(el => {{ \
                const style = window.getComputedStyle(el); \
                const rect = el.getBoundingClientRect(); \
                return {{ \
                    tag_name: el.tagName.toLowerCase(), \
                    text_content: el.textContent, \
                    value: 'value' in el ? String(el.value) : null, \
                    visible: style.display !== 'none' && style.visibility !== 'hidden' \
                        && rect.width > 0 && rect.height > 0 \
                }}; \
            }})"
        ))
    }
}

fn not_found(selector: &str) -> E2eError {
    E2eError::ElementNotFound {
        selector: selector.to_string(),
    }
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn visit(&mut self, url: &str) -> E2eResult<()> {
        let page = self.page.lock().await;
        page.goto(url)
            .await
            .map_err(|e| E2eError::NavigationFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn query_all(&mut self, selector: &str) -> E2eResult<Vec<ElementHandle>> {
        let script = Self::snapshot_script(selector)?;
        let page = self.page.lock().await;
        let raw: Vec<RawElement> = page
            .evaluate(script)
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?
            .into_value()?;
        Ok(raw
            .into_iter()
            .map(|el| ElementHandle {
                selector: selector.to_string(),
                tag_name: el.tag_name,
                text_content: el.text_content,
                value: el.value,
                visible: el.visible,
            })
            .collect())
    }

    async fn focus(&mut self, selector: &str) -> E2eResult<()> {
        let page = self.page.lock().await;
        let element = page
            .find_element(selector)
            .await
            .map_err(|_| not_found(selector))?;
        element
            .focus()
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        Ok(())
    }

    async fn type_text(&mut self, selector: &str, text: &str) -> E2eResult<()> {
        let page = self.page.lock().await;
        let element = page
            .find_element(selector)
            .await
            .map_err(|_| not_found(selector))?;
        element
            .type_str(text)
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> E2eResult<()> {
        let page = self.page.lock().await;
        let element = page
            .find_element(selector)
            .await
            .map_err(|_| not_found(selector))?;
        element
            .click()
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        Ok(())
    }

    async fn current_url(&mut self) -> E2eResult<String> {
        let page = self.page.lock().await;
        let url = page
            .url()
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }
}
