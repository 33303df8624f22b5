//! Host capabilities
//!
//! The manager never touches a document directly. It goes through these
//! traits, implemented by the in-memory document and, with the `web`
//! feature, by the browser's DOM.

use crate::error::Result;

/// A live style sheet and its ordered rule list.
///
/// Handles are cheap clones of the same underlying sheet, so all methods
/// take `&self`.
pub trait StyleSheetHandle: Clone {
    /// Number of rules currently in the sheet
    fn rule_count(&self) -> usize;

    /// Text of every rule, in sheet order, as the host reports it
    fn rules(&self) -> Vec<String>;

    /// Insert one rule at `index` (`0..=rule_count`), returning its index
    fn insert_rule(&self, rule: &str, index: usize) -> Result<usize>;

    /// Remove the rule at `index` (`0..rule_count`)
    fn remove_rule(&self, index: usize) -> Result<()>;
}

/// A `<style>` element
pub trait StyleElementHandle: Clone {
    type Sheet: StyleSheetHandle;

    /// The element's current sheet. Only attached elements have one.
    fn sheet(&self) -> Result<Self::Sheet>;

    /// Replace the element's text content, rebuilding its sheet
    fn set_text_content(&self, css: &str) -> Result<()>;
}

/// A document that can host style elements
pub trait StyleHost {
    type Sheet: StyleSheetHandle;
    type Element: StyleElementHandle<Sheet = Self::Sheet>;

    /// Create a detached `<style>` element
    fn create_style_element(&self) -> Result<Self::Element>;

    /// Append an element to the document's `<head>`
    fn append_to_head(&self, element: &Self::Element) -> Result<()>;
}
