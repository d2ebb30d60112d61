//! DOCX read-back.
//!
//! Reads the body of a DOCX package into the [`Document`] model: top-level
//! tables, paragraphs, and hard page breaks. Only text is recovered;
//! formatting other than the table style and header rows is ignored.

use quick_xml::events::{BytesStart, Event};

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::model::{Block, Cell, Document, Metadata, Paragraph, Row, Section, Table};

use super::DOCUMENT_PART;

/// Reader for DOCX (Word) documents.
pub struct DocxReader {
    container: OoxmlContainer,
}

impl DocxReader {
    /// Open a DOCX file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self {
            container: OoxmlContainer::open(path)?,
        })
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            container: OoxmlContainer::from_bytes(data)?,
        })
    }

    /// Read the document.
    pub fn read(&self) -> Result<Document> {
        let mut doc = Document::new();
        doc.metadata = self.read_metadata()?;
        doc.add_section(self.read_body()?);
        Ok(doc)
    }

    fn read_metadata(&self) -> Result<Metadata> {
        let mut meta = Metadata::default();

        if let Ok(xml) = self.container.read_xml("docProps/core.xml") {
            for (name, text) in leaf_texts(&xml)? {
                match name.as_str() {
                    "dc:title" => meta.title = Some(text),
                    "dc:subject" => meta.subject = Some(text),
                    "dc:creator" => meta.author = Some(text),
                    _ => {}
                }
            }
        }

        if let Ok(xml) = self.container.read_xml("docProps/app.xml") {
            for (name, text) in leaf_texts(&xml)? {
                if name == "Application" {
                    meta.application = Some(text);
                }
            }
        }

        Ok(meta)
    }

    fn read_body(&self) -> Result<Section> {
        let xml = self.container.read_xml(DOCUMENT_PART)?;
        let mut reader = quick_xml::Reader::from_str(&xml);

        let mut section = Section::new(0);
        let mut state = BodyState::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => state.open(e),
                Ok(Event::Empty(ref e)) => {
                    state.open(e);
                    state.close(e.name().as_ref(), &mut section);
                }
                Ok(Event::Text(ref e)) => {
                    if state.in_text {
                        let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        state.text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => state.close(e.name().as_ref(), &mut section),
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {}
            }
        }

        Ok(section)
    }
}

/// Parser state while walking `w:body`.
#[derive(Default)]
struct BodyState {
    // Nested tables are flattened into the cell text of the outer table.
    table_depth: u32,
    table: Option<Table>,
    row: Option<Row>,
    cell: Option<Cell>,
    in_run: bool,
    in_text: bool,
    page_break: bool,
    text: String,
}

impl BodyState {
    fn open(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = Some(Table::default());
                }
            }
            b"w:tblStyle" if self.table_depth == 1 => {
                if let Some(table) = self.table.as_mut() {
                    table.style_id = attr(e, b"w:val");
                }
            }
            b"w:gridCol" if self.table_depth == 1 => {
                if let Some(table) = self.table.as_mut() {
                    table.columns += 1;
                }
            }
            b"w:tr" if self.table_depth == 1 => self.row = Some(Row::new()),
            b"w:tblHeader" if self.table_depth == 1 => {
                if let Some(row) = self.row.as_mut() {
                    row.is_header = true;
                }
            }
            b"w:tc" if self.table_depth == 1 => self.cell = Some(Cell::new()),
            b"w:p" if self.table_depth > 1 && !self.text.is_empty() => self.text.push('\n'),
            b"w:r" => self.in_run = true,
            b"w:t" => self.in_text = true,
            b"w:br" if self.in_run => {
                if attr(e, b"w:type").as_deref() == Some("page") {
                    self.page_break = true;
                } else {
                    self.text.push('\n');
                }
            }
            b"w:tab" if self.in_run => self.text.push('\t'),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8], section: &mut Section) {
        match name {
            b"w:t" => self.in_text = false,
            b"w:r" => self.in_run = false,
            b"w:p" if self.table_depth == 0 => {
                if !self.text.is_empty() {
                    section.add_paragraph(Paragraph::with_text(std::mem::take(&mut self.text)));
                }
                if std::mem::take(&mut self.page_break) {
                    section.add_page_break();
                }
            }
            b"w:p" if self.table_depth == 1 => {
                let text = std::mem::take(&mut self.text);
                if let Some(cell) = self.cell.as_mut() {
                    cell.content.push(Paragraph::with_text(text));
                }
                self.page_break = false;
            }
            b"w:tc" if self.table_depth == 1 => {
                if let (Some(row), Some(mut cell)) = (self.row.as_mut(), self.cell.take()) {
                    cell.is_header = row.is_header;
                    row.add_cell(cell);
                }
            }
            b"w:tr" if self.table_depth == 1 => {
                if let (Some(table), Some(row)) = (self.table.as_mut(), self.row.take()) {
                    table.add_row(row);
                }
            }
            b"w:tbl" => {
                if self.table_depth == 1 {
                    if let Some(table) = self.table.take() {
                        section.add_block(Block::Table(table));
                    }
                }
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            _ => {}
        }
    }
}

/// Get an attribute value as a string.
fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Collect `(element name, text)` pairs of a flat properties part.
fn leaf_texts(xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pairs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Text(e)) => {
                if let Some(name) = current.take() {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    pairs.push((name, text.into_owned()));
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::DocxWriter;

    fn roundtrip(doc: &Document) -> Document {
        let bytes = DocxWriter::new().write(doc).unwrap();
        DocxReader::from_bytes(bytes).unwrap().read().unwrap()
    }

    #[test]
    fn test_table_roundtrip() {
        let mut table = Table::grid(2);
        table.add_row(Row::header(vec![Cell::header("Name"), Cell::header("Value")]));
        table.add_row(Row::from_texts(["multi\nline", "tab\tbed"]));
        table.add_row(Row::from_texts(["Bloom's", " padded "]));

        let mut section = Section::new(0);
        section.add_table(table);
        section.add_page_break();
        let mut doc = Document::new();
        doc.metadata.title = Some("Roundtrip".to_string());
        doc.add_section(section);

        let read = roundtrip(&doc);
        assert_eq!(read.sections, doc.sections);
        assert_eq!(read.metadata.title.as_deref(), Some("Roundtrip"));
    }

    #[test]
    fn test_paragraphs_and_breaks() {
        let mut section = Section::new(0);
        section.add_paragraph(Paragraph::with_text("Intro"));
        section.add_page_break();
        section.add_page_break();
        let mut doc = Document::new();
        doc.add_section(section);

        let read = roundtrip(&doc);
        assert_eq!(read.page_break_count(), 2);
        assert_eq!(read.plain_text(), "Intro");
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = crate::container::PackageWriter::new().finish().unwrap();
        let reader = DocxReader::from_bytes(bytes).unwrap();
        assert!(matches!(reader.read(), Err(Error::MissingComponent(_))));
    }

    #[test]
    fn test_nested_table_is_flattened() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:tbl><w:tblGrid><w:gridCol w:w="100"/></w:tblGrid>
<w:tr><w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p/></w:tc></w:tr></w:tbl>
</w:body></w:document>"#;
        let mut package = crate::container::PackageWriter::new();
        package.add_part(DOCUMENT_PART, None, xml.as_bytes().to_vec());
        let reader = DocxReader::from_bytes(package.finish().unwrap()).unwrap();
        let doc = reader.read().unwrap();

        assert_eq!(doc.table_count(), 1);
        let table = doc.tables().next().unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns, 1);
        assert_eq!(table.rows[0].cells.len(), 1);
        assert_eq!(table.rows[0].cells[0].plain_text(), "outer\ninner");
    }
}
