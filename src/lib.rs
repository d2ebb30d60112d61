//! # quizdoc
//!
//! Generate Word documents of question tables from quiz JSON.
//!
//! The input is a JSON array of question records. Each question becomes a
//! metadata table, an options table and a hint/solution table, followed by
//! a page break. The result is a DOCX package in memory, ready to be saved
//! or offered as a download link.
//!
//! ## Quick Start
//!
//! ```
//! use quizdoc::{generate, GenerateOptions};
//!
//! let json = r#"[{"Options": [{"Option": "A", "Text": "foo"}], "Hint": "h", "Solution": "s"}]"#;
//! let bytes = generate(json, &GenerateOptions::default())?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), quizdoc::Error>(())
//! ```
//!
//! ## Step by Step
//!
//! ```
//! use quizdoc::{parse_questions, GenerateOptions, QuestionTableRenderer};
//! use quizdoc::download::DownloadLink;
//!
//! let options = GenerateOptions::default();
//! let records = parse_questions("[]", options.schema)?;
//! let renderer = QuestionTableRenderer::new(&options);
//!
//! // Inspect the model, or go straight to bytes
//! let doc = renderer.build(&records)?;
//! assert_eq!(doc.table_count(), 0);
//! let bytes = renderer.render(&records)?;
//!
//! let link = DownloadLink::new(&bytes, options.file_name.as_str());
//! assert!(link.href.starts_with("data:application/octet-stream;base64,"));
//! # Ok::<(), quizdoc::Error>(())
//! ```
//!
//! ## Features
//!
//! - `web` (default): the single-page web form (axum + maud)

pub mod builder;
pub mod container;
pub mod docx;
pub mod download;
pub mod error;
pub mod model;
pub mod options;
pub mod question;
pub mod render;
pub mod tables;
pub mod text;

#[cfg(feature = "web")]
pub mod web;

mod xml;

// Re-exports
pub use builder::{DocumentBuilder, ModelBuilder};
pub use docx::{DocxBuilder, DocxReader, DocxWriter};
pub use error::{Error, ErrorKind, Result};
pub use model::{Block, Cell, Document, Metadata, Paragraph, Row, Section, Table, TextRun};
pub use options::GenerateOptions;
pub use question::{
    parse_questions, validate, OptionField, OptionRecord, QuestionField, QuestionRecord,
    SchemaVariant,
};
pub use tables::QuestionTableRenderer;

use std::path::Path;
use tracing::debug;

/// Parse, validate and render JSON input into DOCX bytes.
///
/// Fails with [`ErrorKind::Parse`] for invalid JSON and
/// [`ErrorKind::Format`] for a wrong shape. No bytes are produced on failure.
pub fn generate(input: &str, options: &GenerateOptions) -> Result<Vec<u8>> {
    let records = parse_questions(input, options.schema)?;
    debug!(questions = records.len(), schema = %options.schema, "input validated");
    QuestionTableRenderer::new(options).render(&records)
}

/// Read a JSON file and write the generated DOCX to `output`.
///
/// Returns the number of questions written.
///
/// # Example
///
/// ```no_run
/// use quizdoc::{generate_file, GenerateOptions};
///
/// let count = generate_file("questions.json", "Generated_Questions.docx", &GenerateOptions::default())?;
/// println!("{} questions", count);
/// # Ok::<(), quizdoc::Error>(())
/// ```
pub fn generate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &GenerateOptions,
) -> Result<usize> {
    let json = std::fs::read_to_string(input)?;
    let records = parse_questions(&json, options.schema)?;
    let bytes = QuestionTableRenderer::new(options).render(&records)?;
    std::fs::write(output, bytes)?;
    Ok(records.len())
}

/// Read a DOCX file back into the document model.
pub fn read_docx(path: impl AsRef<Path>) -> Result<Document> {
    DocxReader::open(path)?.read()
}

/// Read DOCX bytes back into the document model.
pub fn read_docx_bytes(data: &[u8]) -> Result<Document> {
    DocxReader::from_bytes(data.to_vec())?.read()
}
