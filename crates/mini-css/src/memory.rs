//! In-memory document
//!
//! A minimal stand-in for a browser document: a `<head>` holding style
//! elements, each with text content and a parsed sheet. Rule text is parsed
//! and re-printed with lightningcss so rules read back normalized, the way a
//! browser reports `cssText`.

use std::cell::RefCell;
use std::rc::Rc;

use lightningcss::printer::PrinterOptions;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::error::{Result, StyleError};
use crate::host::{StyleElementHandle, StyleHost, StyleSheetHandle};

/// Shared handle to an in-memory sheet
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rules: Rc<RefCell<Vec<String>>>,
}

impl MemorySheet {
    /// Create an empty, unattached sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from style sheet text, dropping rules that fail to parse
    pub fn from_css(css: &str) -> Self {
        let options = ParserOptions {
            error_recovery: true,
            ..ParserOptions::default()
        };

        let rules = match StyleSheet::parse(css, options) {
            Ok(sheet) => sheet
                .rules
                .0
                .iter()
                .filter_map(|rule| match print_rule(rule) {
                    Ok(text) => Some(text),
                    Err(message) => {
                        tracing::warn!("Dropping unprintable rule: {}", message);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Style sheet text rejected: {}", e);
                Vec::new()
            }
        };

        Self {
            rules: Rc::new(RefCell::new(rules)),
        }
    }

    /// Whether two handles refer to the same sheet
    pub fn same_sheet(&self, other: &MemorySheet) -> bool {
        Rc::ptr_eq(&self.rules, &other.rules)
    }
}

impl StyleSheetHandle for MemorySheet {
    fn rule_count(&self) -> usize {
        self.rules.borrow().len()
    }

    fn rules(&self) -> Vec<String> {
        self.rules.borrow().clone()
    }

    fn insert_rule(&self, rule: &str, index: usize) -> Result<usize> {
        let len = self.rule_count();
        if index > len {
            return Err(StyleError::InvalidIndex { index, len });
        }

        let text = parse_rule(rule)?;
        self.rules.borrow_mut().insert(index, text);
        Ok(index)
    }

    fn remove_rule(&self, index: usize) -> Result<()> {
        let mut rules = self.rules.borrow_mut();
        if index >= rules.len() {
            return Err(StyleError::InvalidIndex {
                index,
                len: rules.len(),
            });
        }

        rules.remove(index);
        Ok(())
    }
}

/// Parse text that must hold exactly one rule and return its normalized form
fn parse_rule(rule: &str) -> Result<String> {
    let sheet = StyleSheet::parse(rule, ParserOptions::default())
        .map_err(|e| StyleError::malformed(rule, e.to_string()))?;

    match sheet.rules.0.as_slice() {
        [single] => print_rule(single).map_err(|message| StyleError::malformed(rule, message)),
        [] => Err(StyleError::malformed(rule, "no rule found")),
        many => Err(StyleError::malformed(
            rule,
            format!("expected a single rule, found {}", many.len()),
        )),
    }
}

fn print_rule(rule: &CssRule) -> std::result::Result<String, String> {
    let css = rule
        .to_css_string(PrinterOptions::default())
        .map_err(|e| e.to_string())?;

    // `.x {\n  color: red;\n}` -> `.x { color: red; }`
    // CSS strings never hold a raw newline, so their whitespace survives
    Ok(css
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}

#[derive(Debug, Default)]
struct StyleElementData {
    text: String,
    attached: bool,
    sheet: MemorySheet,
}

/// Shared handle to an in-memory `<style>` element
#[derive(Debug, Clone, Default)]
pub struct MemoryStyleElement {
    data: Rc<RefCell<StyleElementData>>,
}

impl MemoryStyleElement {
    /// Current text content
    pub fn text_content(&self) -> String {
        self.data.borrow().text.clone()
    }

    /// Whether the element has been appended to a document head
    pub fn is_attached(&self) -> bool {
        self.data.borrow().attached
    }

    /// Whether two handles refer to the same element
    pub fn same_element(&self, other: &MemoryStyleElement) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    fn attach(&self) {
        let mut data = self.data.borrow_mut();
        if !data.attached {
            data.attached = true;
            data.sheet = MemorySheet::from_css(&data.text);
        }
    }
}

impl StyleElementHandle for MemoryStyleElement {
    type Sheet = MemorySheet;

    fn sheet(&self) -> Result<MemorySheet> {
        let data = self.data.borrow();
        if !data.attached {
            return Err(StyleError::Uninitialized {
                operation: "read the sheet of a detached style element",
            });
        }
        Ok(data.sheet.clone())
    }

    fn set_text_content(&self, css: &str) -> Result<()> {
        let mut data = self.data.borrow_mut();
        data.text = css.to_string();
        if data.attached {
            data.sheet = MemorySheet::from_css(css);
        }
        Ok(())
    }
}

/// In-memory document with a `<head>`
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    head: Rc<RefCell<Vec<MemoryStyleElement>>>,
}

impl MemoryDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements in `<head>`
    pub fn head_len(&self) -> usize {
        self.head.borrow().len()
    }

    /// Style elements in `<head>`, in document order
    pub fn style_elements(&self) -> Vec<MemoryStyleElement> {
        self.head.borrow().clone()
    }
}

impl StyleHost for MemoryDocument {
    type Sheet = MemorySheet;
    type Element = MemoryStyleElement;

    fn create_style_element(&self) -> Result<MemoryStyleElement> {
        Ok(MemoryStyleElement::default())
    }

    fn append_to_head(&self, element: &MemoryStyleElement) -> Result<()> {
        let mut head = self.head.borrow_mut();
        // Appending an attached element moves it to the end
        head.retain(|existing| !existing.same_element(element));
        head.push(element.clone());
        drop(head);

        element.attach();
        Ok(())
    }
}
