//! Display helper functions
//!
//! Small formatting helpers shared by the generator and the server:
//! date formatting/localization and HTML text utilities.

mod date;
mod html;

pub use date::*;
pub use html::*;
