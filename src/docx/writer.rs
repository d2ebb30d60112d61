//! DOCX writer implementation.

use std::path::Path;

use tracing::debug;

use crate::builder::{DocumentBuilder, ModelBuilder};
use crate::container::{PackageWriter, Relationships};
use crate::error::Result;
use crate::model::{Block, Document, Metadata, Paragraph, Table};
use crate::text::strip_xml_illegal;
use crate::xml::XmlWriter;

use super::styles::{styles_xml, TableStyle};
use super::{DOCUMENT_PART, W_NS};

const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// MIME type of a DOCX file.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// US Letter with one-inch margins, in twips.
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const PAGE_MARGIN: u32 = 1440;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * PAGE_MARGIN;

/// Serializes a [`Document`] model into a DOCX package.
#[derive(Debug, Clone)]
pub struct DocxWriter {
    table_styles: Vec<TableStyle>,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self {
            table_styles: vec![TableStyle::grid()],
        }
    }
}

impl DocxWriter {
    /// Create a writer that ships the grid table style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table style definition to `word/styles.xml`.
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.table_styles.push(style);
        self
    }

    /// Write the document into an in-memory DOCX package.
    pub fn write(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut package = PackageWriter::new();

        let mut package_rels = Relationships::new();
        package_rels.add(REL_OFFICE_DOCUMENT, DOCUMENT_PART);
        package_rels.add(REL_CORE_PROPERTIES, "docProps/core.xml");
        package_rels.add(REL_EXTENDED_PROPERTIES, "docProps/app.xml");
        package.add_relationships("_rels/.rels", &package_rels)?;

        package.add_part(DOCUMENT_PART, Some(CT_DOCUMENT), document_xml(doc)?);

        let mut document_rels = Relationships::new();
        document_rels.add(REL_STYLES, "styles.xml");
        package.add_relationships("word/_rels/document.xml.rels", &document_rels)?;

        package.add_part(
            "word/styles.xml",
            Some(CT_STYLES),
            styles_xml(&self.table_styles)?,
        );
        package.add_part("docProps/core.xml", Some(CT_CORE), core_xml(&doc.metadata)?);
        package.add_part("docProps/app.xml", Some(CT_APP), app_xml(&doc.metadata)?);

        let bytes = package.finish()?;
        debug!(
            blocks = doc.total_blocks(),
            bytes = bytes.len(),
            "wrote docx package"
        );
        Ok(bytes)
    }

    /// Write the document to a file.
    pub fn write_to_file(&self, doc: &Document, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.write(doc)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// [`DocumentBuilder`] that serializes to DOCX bytes on finish.
#[derive(Debug, Default)]
pub struct DocxBuilder {
    model: ModelBuilder,
    writer: DocxWriter,
}

impl DocxBuilder {
    /// Create a builder with document metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            model: ModelBuilder::with_metadata(metadata),
            writer: DocxWriter::new(),
        }
    }

    /// Serialize with the given writer.
    pub fn with_writer(mut self, writer: DocxWriter) -> Self {
        self.writer = writer;
        self
    }
}

impl DocumentBuilder for DocxBuilder {
    type Output = Vec<u8>;

    fn add_table(&mut self, table: Table) {
        self.model.add_table(table);
    }

    fn add_page_break(&mut self) {
        self.model.add_page_break();
    }

    fn finish(self) -> Result<Vec<u8>> {
        let doc = self.model.finish()?;
        self.writer.write(&doc)
    }
}

fn document_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    w.start("w:body", &[])?;

    for block in doc.blocks() {
        match block {
            Block::Paragraph(para) => write_paragraph(&mut w, para)?,
            Block::Table(table) => write_table(&mut w, table)?,
            Block::PageBreak => write_page_break(&mut w)?,
        }
    }

    let width = PAGE_WIDTH.to_string();
    let height = PAGE_HEIGHT.to_string();
    let margin = PAGE_MARGIN.to_string();
    w.start("w:sectPr", &[])?;
    w.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    w.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    w.end("w:sectPr")?;

    w.end("w:body")?;
    w.end("w:document")?;
    Ok(w.into_bytes())
}

fn write_table(w: &mut XmlWriter, table: &Table) -> Result<()> {
    let columns = table.column_count().max(1);
    let col_width = (TEXT_WIDTH / columns as u32).to_string();

    w.start("w:tbl", &[])?;
    w.start("w:tblPr", &[])?;
    if let Some(ref style) = table.style_id {
        w.empty("w:tblStyle", &[("w:val", style.as_str())])?;
    }
    w.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    w.empty(
        "w:tblLook",
        &[
            ("w:val", "04A0"),
            ("w:firstRow", "1"),
            ("w:lastRow", "0"),
            ("w:firstColumn", "1"),
            ("w:lastColumn", "0"),
            ("w:noHBand", "0"),
            ("w:noVBand", "1"),
        ],
    )?;
    w.end("w:tblPr")?;

    w.start("w:tblGrid", &[])?;
    for _ in 0..columns {
        w.empty("w:gridCol", &[("w:w", col_width.as_str())])?;
    }
    w.end("w:tblGrid")?;

    for row in &table.rows {
        w.start("w:tr", &[])?;
        if row.is_header {
            w.start("w:trPr", &[])?;
            w.empty("w:tblHeader", &[])?;
            w.end("w:trPr")?;
        }

        // Every grid column needs a cell, and every cell needs a paragraph.
        for i in 0..columns.max(row.len()) {
            w.start("w:tc", &[])?;
            w.start("w:tcPr", &[])?;
            w.empty("w:tcW", &[("w:w", col_width.as_str()), ("w:type", "dxa")])?;
            w.end("w:tcPr")?;
            match row.cells.get(i) {
                Some(cell) if !cell.content.is_empty() => {
                    for para in &cell.content {
                        write_paragraph(w, para)?;
                    }
                }
                _ => write_paragraph(w, &Paragraph::new())?,
            }
            w.end("w:tc")?;
        }
        w.end("w:tr")?;
    }

    w.end("w:tbl")
}

fn write_paragraph(w: &mut XmlWriter, para: &Paragraph) -> Result<()> {
    w.start("w:p", &[])?;
    if let Some(ref style) = para.style_id {
        w.start("w:pPr", &[])?;
        w.empty("w:pStyle", &[("w:val", style.as_str())])?;
        w.end("w:pPr")?;
    }
    for run in &para.runs {
        if run.is_empty() {
            continue;
        }
        w.start("w:r", &[])?;
        write_run_text(w, &run.text)?;
        w.end("w:r")?;
    }
    w.end("w:p")
}

/// Write run content, turning `\n` into `w:br` and `\t` into `w:tab`.
/// Characters XML cannot carry are dropped.
fn write_run_text(w: &mut XmlWriter, text: &str) -> Result<()> {
    let text = strip_xml_illegal(text);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            w.empty("w:br", &[])?;
        }
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                w.empty("w:tab", &[])?;
            }
            if !piece.is_empty() {
                w.start("w:t", &[("xml:space", "preserve")])?;
                w.text(piece)?;
                w.end("w:t")?;
            }
        }
    }
    Ok(())
}

fn write_page_break(w: &mut XmlWriter) -> Result<()> {
    w.start("w:p", &[])?;
    w.start("w:r", &[])?;
    w.empty("w:br", &[("w:type", "page")])?;
    w.end("w:r")?;
    w.end("w:p")
}

fn core_xml(meta: &Metadata) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(ref title) = meta.title {
        w.text_element("dc:title", &strip_xml_illegal(title))?;
    }
    if let Some(ref subject) = meta.subject {
        w.text_element("dc:subject", &strip_xml_illegal(subject))?;
    }
    if let Some(ref author) = meta.author {
        w.text_element("dc:creator", &strip_xml_illegal(author))?;
    }
    w.end("cp:coreProperties")?;
    Ok(w.into_bytes())
}

fn app_xml(meta: &Metadata) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    if let Some(ref application) = meta.application {
        w.text_element("Application", &strip_xml_illegal(application))?;
    }
    w.end("Properties")?;
    Ok(w.into_bytes())
}
