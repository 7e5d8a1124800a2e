//! A classic menu bar: dropdown headers along the top of the screen, each
//! opening a column of items.
//!
//! Widths come from the labels drawn with a bitmap font. The font may not be
//! loaded yet when the bar is laid out; layout then reports
//! [`LayoutOutcome::Incomplete`] and is simply repeated on the next tick.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MenuError>;

pub mod constants;
pub use constants::MenuConstants;

pub mod model;
pub use model::{DropdownBackground, MenuBar, MenuDropdown, MenuIcon, MenuItem, MenuRoot, MenuState};

pub mod definition;
pub use definition::{MenuDefinition, MenuFile};

pub mod layout;
pub use layout::{BarPlan, DropdownPlan, LayoutOutcome, MenuLayoutEngine};

pub mod host;
pub use host::MenuHost;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Invalid menu definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid menu constants: {0}")]
    InvalidConstants(String),

    #[error("Menu bar has no dropdown #{0}")]
    UnknownDropdown(usize),

    #[error("Error parsing menu file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
