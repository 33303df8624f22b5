//! Style sheet manager
//!
//! Wraps one live sheet and, when it created it, the `<style>` element that
//! owns it. Every call goes straight to the host; the manager keeps no rule
//! state of its own, so indices are whatever the sheet currently says.

use crate::declaration::StyleBody;
use crate::error::{Result, StyleError};
use crate::host::{StyleElementHandle, StyleHost, StyleSheetHandle};

/// Adds, removes and queries rules on a host style sheet
pub struct StyleSheetManager<H: StyleHost> {
    host: H,
    sheet: Option<H::Sheet>,
    style_element: Option<H::Element>,
}

impl<H: StyleHost> StyleSheetManager<H> {
    /// Create a manager with no sheet
    pub fn new(host: H) -> Self {
        Self {
            host,
            sheet: None,
            style_element: None,
        }
    }

    /// Create a manager over an existing sheet
    pub fn with_sheet(host: H, sheet: H::Sheet) -> Self {
        Self {
            host,
            sheet: Some(sheet),
            style_element: None,
        }
    }

    /// Create a `<style>` element, append it to `<head>` and use its sheet.
    ///
    /// Each call creates a new element; earlier ones stay in the document.
    pub fn create_style_sheet(&mut self) -> Result<&mut Self> {
        let element = self.host.create_style_element()?;
        self.host.append_to_head(&element)?;
        let sheet = element.sheet()?;

        tracing::debug!("Created style element");
        self.sheet = Some(sheet);
        self.style_element = Some(element);
        Ok(self)
    }

    /// Append `selector { style }` to the end of the sheet
    pub fn add(&mut self, selector: &str, style: impl Into<StyleBody>) -> Result<&mut Self> {
        let sheet = self.require_sheet("add a rule")?;
        let rule = format!("{} {{ {} }}", selector, style.into().to_css());

        let index = sheet.rule_count();
        if let Err(e) = sheet.insert_rule(&rule, index) {
            tracing::warn!("Rule for `{}` rejected: {}", selector, e);
            return Err(e);
        }

        tracing::debug!("Added rule {} for `{}`", index, selector);
        Ok(self)
    }

    /// Replace the owned style element's content with raw CSS.
    ///
    /// Discards every rule added so far and switches to the element's
    /// rebuilt sheet.
    pub fn inject(&mut self, css: &str) -> Result<&mut Self> {
        let element = self.style_element.as_ref().ok_or(StyleError::Uninitialized {
            operation: "inject CSS",
        })?;

        element.set_text_content(css)?;
        let sheet = element.sheet()?;

        tracing::debug!("Injected {} bytes of CSS", css.len());
        self.sheet = Some(sheet);
        Ok(self)
    }

    /// Remove the rule at `index`. Later rules shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<&mut Self> {
        let sheet = self.require_sheet("remove a rule")?;
        sheet.remove_rule(index)?;

        tracing::debug!("Removed rule {}", index);
        Ok(self)
    }

    /// Rules whose text contains `needle` anywhere, in sheet order
    pub fn get(&self, needle: &str) -> Vec<String> {
        self.get_rules()
            .into_iter()
            .filter(|rule| rule.contains(needle))
            .collect()
    }

    /// Text of every rule, in sheet order. Empty when no sheet is set.
    pub fn get_rules(&self) -> Vec<String> {
        let rules = self.sheet.as_ref().map(|sheet| sheet.rules()).unwrap_or_default();
        tracing::trace!("Read {} rules", rules.len());
        rules
    }

    /// Point the manager at another sheet. The style element is kept.
    pub fn set_sheet(&mut self, sheet: H::Sheet) -> &mut Self {
        self.sheet = Some(sheet);
        self
    }

    /// Current sheet, if any
    pub fn sheet(&self) -> Option<&H::Sheet> {
        self.sheet.as_ref()
    }

    /// Style element created by [`create_style_sheet`](Self::create_style_sheet)
    pub fn style_element(&self) -> Option<&H::Element> {
        self.style_element.as_ref()
    }

    /// Host the manager creates style elements in
    pub fn host(&self) -> &H {
        &self.host
    }

    fn require_sheet(&self, operation: &'static str) -> Result<&H::Sheet> {
        self.sheet
            .as_ref()
            .ok_or(StyleError::Uninitialized { operation })
    }
}
