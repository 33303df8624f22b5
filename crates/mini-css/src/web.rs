//! Browser host backed by web-sys
//!
//! Wraps the live `document`, `<style>` elements and their `CSSStyleSheet`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleSheet, Document, DomException, HtmlStyleElement};

use crate::error::{Result, StyleError};
use crate::host::{StyleElementHandle, StyleHost, StyleSheetHandle};

/// Map a thrown DOMException onto the crate's error kinds
fn dom_error(err: JsValue, rule: Option<&str>, index: usize, len: usize) -> StyleError {
    let Some(exception) = err.dyn_ref::<DomException>() else {
        return StyleError::Host(format!("{:?}", err));
    };

    match exception.name().as_str() {
        "IndexSizeError" => StyleError::InvalidIndex { index, len },
        "SyntaxError" | "HierarchyRequestError" => {
            StyleError::malformed(rule.unwrap_or_default(), exception.message())
        }
        name => StyleError::Host(format!("{}: {}", name, exception.message())),
    }
}

/// A page's `CSSStyleSheet`
#[derive(Debug, Clone)]
pub struct WebSheet {
    sheet: CssStyleSheet,
}

impl WebSheet {
    /// Wrap a sheet the page already has
    pub fn new(sheet: CssStyleSheet) -> Self {
        Self { sheet }
    }

    /// Underlying `CSSStyleSheet`
    pub fn as_css_style_sheet(&self) -> &CssStyleSheet {
        &self.sheet
    }
}

impl StyleSheetHandle for WebSheet {
    fn rule_count(&self) -> usize {
        self.sheet
            .css_rules()
            .map(|rules| rules.length() as usize)
            .unwrap_or(0)
    }

    fn rules(&self) -> Vec<String> {
        // Cross-origin sheets refuse access to their rules
        let Ok(list) = self.sheet.css_rules() else {
            return Vec::new();
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|rule| rule.css_text())
            .collect()
    }

    fn insert_rule(&self, rule: &str, index: usize) -> Result<usize> {
        let len = self.rule_count();
        self.sheet
            .insert_rule_with_index(rule, index as u32)
            .map(|i| i as usize)
            .map_err(|e| dom_error(e, Some(rule), index, len))
    }

    fn remove_rule(&self, index: usize) -> Result<()> {
        let len = self.rule_count();
        self.sheet
            .delete_rule(index as u32)
            .map_err(|e| dom_error(e, None, index, len))
    }
}

/// A `<style>` element in the page
#[derive(Debug, Clone)]
pub struct WebStyleElement {
    element: HtmlStyleElement,
}

impl WebStyleElement {
    /// Underlying `<style>` element
    pub fn as_html_style_element(&self) -> &HtmlStyleElement {
        &self.element
    }
}

impl StyleElementHandle for WebStyleElement {
    type Sheet = WebSheet;

    fn sheet(&self) -> Result<WebSheet> {
        let sheet = self.element.sheet().ok_or(StyleError::Uninitialized {
            operation: "read the sheet of a detached style element",
        })?;

        sheet
            .dyn_into::<CssStyleSheet>()
            .map(WebSheet::new)
            .map_err(|_| StyleError::Host("style element sheet is not a CSSStyleSheet".to_string()))
    }

    fn set_text_content(&self, css: &str) -> Result<()> {
        self.element.set_text_content(Some(css));
        Ok(())
    }
}

/// The page's `document`
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    /// The current window's document
    pub fn current() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| StyleError::Host("no document available".to_string()))?;

        Ok(Self { document })
    }

    /// Wrap a specific document
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl StyleHost for WebDocument {
    type Sheet = WebSheet;
    type Element = WebStyleElement;

    fn create_style_element(&self) -> Result<WebStyleElement> {
        let element = self
            .document
            .create_element("style")
            .map_err(|e| StyleError::Host(format!("{:?}", e)))?;

        element
            .dyn_into::<HtmlStyleElement>()
            .map(|element| WebStyleElement { element })
            .map_err(|_| StyleError::Host("created element is not a <style>".to_string()))
    }

    fn append_to_head(&self, element: &WebStyleElement) -> Result<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| StyleError::Host("document has no <head>".to_string()))?;

        head.append_child(&element.element)
            .map(|_| ())
            .map_err(|e| StyleError::Host(format!("{:?}", e)))
    }
}
