//! Question table rendering.
//!
//! Every question becomes three tables followed by a page break:
//!
//! 1. a two-column metadata table (label, value), one row per metadata field;
//! 2. a four-column options table with a header row and one row per option;
//! 3. a two-column bottom table with the `Hint` and `Solution` rows.

use tracing::debug;

use crate::builder::{DocumentBuilder, ModelBuilder};
use crate::docx::{DocxBuilder, DocxWriter, TableStyle};
use crate::error::Result;
use crate::model::{Cell, Document, Metadata, Row, Table, GRID_STYLE_ID};
use crate::options::GenerateOptions;
use crate::question::{OptionField, QuestionField, QuestionRecord};
use crate::text::normalize_cell_text;

/// Renders question records into a document.
#[derive(Debug, Clone)]
pub struct QuestionTableRenderer<'a> {
    options: &'a GenerateOptions,
}

impl<'a> QuestionTableRenderer<'a> {
    /// Create a renderer with the given options.
    pub fn new(options: &'a GenerateOptions) -> Self {
        Self { options }
    }

    /// Render records to DOCX bytes.
    pub fn render(&self, records: &[QuestionRecord]) -> Result<Vec<u8>> {
        let builder = DocxBuilder::with_metadata(self.metadata()).with_writer(self.writer());
        self.render_into(records, builder)
    }

    /// Build the in-memory document model for records.
    pub fn build(&self, records: &[QuestionRecord]) -> Result<Document> {
        self.render_into(records, ModelBuilder::with_metadata(self.metadata()))
    }

    /// Issue the append calls for records against any builder.
    pub fn render_into<B: DocumentBuilder>(
        &self,
        records: &[QuestionRecord],
        mut builder: B,
    ) -> Result<B::Output> {
        debug!(questions = records.len(), "rendering question tables");

        for record in records {
            builder.add_table(self.metadata_table(record));
            builder.add_table(self.options_table(record));
            builder.add_table(self.bottom_table(record));
            builder.add_page_break();
        }

        builder.finish()
    }

    /// Writer whose styles part defines the configured table style.
    fn writer(&self) -> DocxWriter {
        let writer = DocxWriter::new();
        if self.options.table_style == GRID_STYLE_ID {
            writer
        } else {
            writer.with_table_style(TableStyle::bordered(self.options.table_style.as_str()))
        }
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            title: self.options.title.clone(),
            author: self.options.author.clone(),
            subject: None,
            application: Some(format!("quizdoc {}", env!("CARGO_PKG_VERSION"))),
        }
    }

    fn metadata_table(&self, record: &QuestionRecord) -> Table {
        self.label_value_table(record, record.schema().metadata_fields())
    }

    fn bottom_table(&self, record: &QuestionRecord) -> Table {
        self.label_value_table(record, &QuestionField::BOTTOM)
    }

    fn label_value_table(&self, record: &QuestionRecord, fields: &[QuestionField]) -> Table {
        let mut table = self.table(2);
        for field in fields {
            let value = record.text_or(*field, &self.options.placeholder);
            table.add_row(Row::from_texts([
                field.label().to_string(),
                self.cell_text(value),
            ]));
        }
        table
    }

    fn options_table(&self, record: &QuestionRecord) -> Table {
        let mut table = self.table(OptionField::ALL.len());
        table.add_row(Row::header(
            OptionField::ALL
                .iter()
                .map(|f| Cell::header(f.label()))
                .collect(),
        ));

        for option in record.options() {
            table.add_row(Row::from_texts(OptionField::ALL.iter().map(|f| {
                self.cell_text(option.text_or(*f, &self.options.placeholder))
            })));
        }
        table
    }

    fn table(&self, columns: usize) -> Table {
        Table::new(columns).with_style(self.options.table_style.clone())
    }

    fn cell_text(&self, value: String) -> String {
        if self.options.normalize_text {
            normalize_cell_text(&value)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::question::{parse_questions, OptionRecord, SchemaVariant};

    fn build(input: &str) -> Document {
        let options = GenerateOptions::default();
        let records = parse_questions(input, options.schema).unwrap();
        QuestionTableRenderer::new(&options).build(&records).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let doc = build("[]");
        assert_eq!(doc.table_count(), 0);
        assert_eq!(doc.page_break_count(), 0);
    }

    #[test]
    fn test_single_question_layout() {
        let doc = build(
            r#"[{"Options": [{"Option":"A","Text":"foo"}], "Hint":"h", "Solution":"s"}]"#,
        );
        let blocks = &doc.sections[0].content;
        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[3], Block::PageBreak));

        let tables: Vec<_> = doc.tables().collect();
        let metadata = tables[0];
        assert_eq!(metadata.row_count(), 9);
        assert!(metadata.rows.iter().all(|r| r.texts()[1] == "N/A"));
        assert_eq!(metadata.rows[0].texts(), vec!["LU", "N/A"]);
        assert_eq!(
            metadata.rows[8].texts(),
            vec!["Title (Stem and Prompt)", "N/A"]
        );

        let options = tables[1];
        assert_eq!(options.row_count(), 2);
        assert_eq!(
            options.rows[0].texts(),
            vec!["Option", "Text", "Type of Distractor", "Distractor Rationale"]
        );
        assert!(options.rows[0].is_header);
        assert_eq!(options.rows[1].texts(), vec!["A", "foo", "N/A", "N/A"]);

        let bottom = tables[2];
        assert_eq!(bottom.rows[0].texts(), vec!["Hint", "h"]);
        assert_eq!(bottom.rows[1].texts(), vec!["Solution", "s"]);
    }

    #[test]
    fn test_empty_options_keep_header() {
        let doc = build(r#"[{"Options": []}]"#);
        let options = doc.tables().nth(1).unwrap();
        assert_eq!(options.row_count(), 1);
        assert!(options.rows[0].is_header);
    }

    #[test]
    fn test_page_break_per_question() {
        let doc = build(r#"[{"Options": []}, {"Options": []}, {"Options": []}]"#);
        assert_eq!(doc.page_break_count(), 3);
        assert_eq!(doc.table_count(), 9);
        assert!(matches!(
            doc.sections[0].content.last(),
            Some(Block::PageBreak)
        ));
    }

    #[test]
    fn test_all_tables_use_grid_style() {
        let doc = build(r#"[{"Options": [{"Option": "A"}]}]"#);
        assert!(doc
            .tables()
            .all(|t| t.style_id.as_deref() == Some("TableGrid")));
    }

    #[test]
    fn test_standards_schema_rows() {
        let options = GenerateOptions::new().with_schema(SchemaVariant::Standards);
        let record = QuestionRecord::new(SchemaVariant::Standards)
            .with(QuestionField::Grade, "5")
            .with_option(OptionRecord::new(SchemaVariant::Standards));
        let doc = QuestionTableRenderer::new(&options)
            .build(&[record])
            .unwrap();

        let metadata = doc.tables().next().unwrap();
        assert_eq!(metadata.row_count(), 8);
        assert_eq!(metadata.rows[0].texts(), vec!["Grade", "5"]);
        assert_eq!(metadata.rows[2].texts(), vec!["Standard/Core Concept", "N/A"]);
    }

    #[test]
    fn test_custom_placeholder_and_metadata() {
        let options = GenerateOptions::new()
            .with_placeholder("-")
            .with_title("Unit 1");
        let record = QuestionRecord::new(SchemaVariant::LearningUnit);
        let doc = QuestionTableRenderer::new(&options)
            .build(&[record])
            .unwrap();

        assert_eq!(doc.metadata.title.as_deref(), Some("Unit 1"));
        let bottom = doc.tables().nth(2).unwrap();
        assert_eq!(bottom.rows[0].texts(), vec!["Hint", "-"]);
    }

    #[test]
    fn test_custom_table_style_is_defined() {
        use crate::container::OoxmlContainer;
        use crate::docx::DOCUMENT_PART;

        let mut options = GenerateOptions::default();
        options.table_style = "QuizGrid".to_string();
        let records = parse_questions(r#"[{"Options": []}]"#, options.schema).unwrap();
        let bytes = QuestionTableRenderer::new(&options).render(&records).unwrap();

        let container = OoxmlContainer::from_bytes(bytes).unwrap();
        let document = container.read_xml(DOCUMENT_PART).unwrap();
        let styles = container.read_xml("word/styles.xml").unwrap();
        assert_eq!(document.matches(r#"<w:tblStyle w:val="QuizGrid"/>"#).count(), 3);
        assert!(styles.contains(r#"w:styleId="QuizGrid""#));
    }

    #[test]
    fn test_default_style_defined_once() {
        use crate::container::OoxmlContainer;

        let options = GenerateOptions::default();
        let bytes = QuestionTableRenderer::new(&options).render(&[]).unwrap();
        let styles = OoxmlContainer::from_bytes(bytes)
            .unwrap()
            .read_xml("word/styles.xml")
            .unwrap();
        assert_eq!(styles.matches(r#"w:styleId="TableGrid""#).count(), 1);
    }

    #[test]
    fn test_render_produces_zip() {
        let options = GenerateOptions::default();
        let bytes = QuestionTableRenderer::new(&options).render(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
