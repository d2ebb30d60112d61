//! DOCX (Word) document writer and reader.
//!
//! This module serializes the document model into the Office Open XML
//! (.docx) format and reads generated packages back for inspection.

mod reader;
mod styles;
mod writer;

pub use reader::DocxReader;
pub use styles::{styles_xml, TableStyle};
pub use writer::{DocxBuilder, DocxWriter, DOCX_MIME};

/// WordprocessingML main namespace.
pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
