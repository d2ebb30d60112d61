//! Intermediate document model.
//!
//! The question renderer writes into these structures through a
//! [`DocumentBuilder`](crate::builder::DocumentBuilder), and the DOCX writer
//! and reader convert them to and from the Office Open XML package.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
