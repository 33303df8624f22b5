//! mini-css
//!
//! Create CSS rules on a live style sheet from declaration text or
//! camelCase property maps.
//!
//! # Example
//! ```rust
//! use mini_css::{DeclarationMap, MemoryDocument, StyleSheetManager};
//!
//! let mut css = StyleSheetManager::new(MemoryDocument::new());
//! css.create_style_sheet()?
//!     .add(".container", "background-color: red;")?
//!     .add("#header", DeclarationMap::new().with("backgroundColor", "yellow"))?;
//!
//! assert_eq!(css.get("#header").len(), 1);
//! # Ok::<(), mini_css::StyleError>(())
//! ```

mod declaration;
mod error;
mod host;
mod manager;
pub mod memory;
#[cfg(feature = "web")]
pub mod web;

pub use declaration::{serialize, to_kebab_case, DeclarationMap, DeclarationValue, StyleBody};
pub use error::{Result, StyleError};
pub use host::{StyleElementHandle, StyleHost, StyleSheetHandle};
pub use manager::StyleSheetManager;
pub use memory::{MemoryDocument, MemorySheet, MemoryStyleElement};
#[cfg(feature = "web")]
pub use web::{WebDocument, WebSheet, WebStyleElement};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
