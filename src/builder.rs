//! Document builder capability.
//!
//! A [`DocumentBuilder`] receives ordered append calls and produces a
//! finished artifact. [`ModelBuilder`] yields the in-memory [`Document`];
//! [`DocxBuilder`](crate::docx::DocxBuilder) yields serialized DOCX bytes.

use crate::error::Result;
use crate::model::{Document, Metadata, Section, Table};

/// Composes a paginated, tabular document from ordered append operations.
pub trait DocumentBuilder {
    /// The finished artifact.
    type Output;

    /// Append a table.
    fn add_table(&mut self, table: Table);

    /// Append a hard page break.
    fn add_page_break(&mut self);

    /// Finish the document.
    fn finish(self) -> Result<Self::Output>;
}

/// Builds an in-memory [`Document`] with a single section.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    metadata: Metadata,
    section: Section,
}

impl ModelBuilder {
    /// Create a builder for an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with document metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            section: Section::new(0),
        }
    }

    /// Number of blocks appended so far.
    pub fn len(&self) -> usize {
        self.section.len()
    }

    /// Check if nothing was appended yet.
    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }
}

impl DocumentBuilder for ModelBuilder {
    type Output = Document;

    fn add_table(&mut self, table: Table) {
        self.section.add_table(table);
    }

    fn add_page_break(&mut self) {
        self.section.add_page_break();
    }

    fn finish(self) -> Result<Document> {
        let mut doc = Document::new();
        doc.metadata = self.metadata;
        doc.add_section(self.section);
        Ok(doc)
    }
}
