//! Preview rendering for built documents.
//!
//! These renderers show the structure the question renderer produced
//! without opening the DOCX package: an ASCII-grid text view and the JSON
//! form of the document model.
//!
//! # Example
//!
//! ```
//! use quizdoc::render::{to_json, to_text, JsonFormat};
//! use quizdoc::{parse_questions, GenerateOptions, QuestionTableRenderer};
//!
//! let options = GenerateOptions::default();
//! let records = parse_questions(r#"[{"Options": []}]"#, options.schema)?;
//! let doc = QuestionTableRenderer::new(&options).build(&records)?;
//!
//! let text = to_text(&doc)?;
//! let json = to_json(&doc, JsonFormat::Pretty)?;
//! assert!(text.contains("| LU "));
//! assert!(json.contains("PageBreak"));
//! # Ok::<(), quizdoc::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{to_text, PAGE_BREAK_MARKER};
