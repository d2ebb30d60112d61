//! Generation options.

use crate::model::GRID_STYLE_ID;
use crate::question::{SchemaVariant, DEFAULT_PLACEHOLDER};

/// Default download file name.
pub const DEFAULT_FILE_NAME: &str = "Generated_Questions.docx";

/// Options for generating question documents.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Field keys expected in the input
    pub schema: SchemaVariant,

    /// Text written for missing fields
    pub placeholder: String,

    /// Table style ID applied to every table
    pub table_style: String,

    /// File name offered for download
    pub file_name: String,

    /// Document title (docProps/core.xml)
    pub title: Option<String>,

    /// Document author (docProps/core.xml)
    pub author: Option<String>,

    /// NFC-normalize cell text and fold line endings. XML-illegal
    /// characters are dropped by the writer either way.
    pub normalize_text: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            schema: SchemaVariant::LearningUnit,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            table_style: GRID_STYLE_ID.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            title: None,
            author: None,
            normalize_text: true,
        }
    }
}

impl GenerateOptions {
    /// Create new generation options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input schema variant.
    pub fn with_schema(mut self, schema: SchemaVariant) -> Self {
        self.schema = schema;
        self
    }

    /// Set the placeholder for missing fields.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the download file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Enable or disable cell text normalization.
    pub fn with_normalize_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }
}
