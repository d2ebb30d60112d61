//! DOCX styles part (`word/styles.xml`).

use crate::error::Result;
use crate::model::GRID_STYLE_ID;
use crate::xml::XmlWriter;

use super::W_NS;

/// A bordered table style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Style ID referenced by `w:tblStyle`
    pub id: String,
    /// Display name
    pub name: String,
    /// Border width in eighths of a point
    pub border_size: u32,
    /// Border color (hex or "auto")
    pub border_color: String,
}

impl TableStyle {
    /// The single-line grid style Word calls "Table Grid".
    pub fn grid() -> Self {
        Self {
            name: "Table Grid".to_string(),
            ..Self::bordered(GRID_STYLE_ID)
        }
    }

    /// A single-line grid style under a custom ID, named after the ID.
    pub fn bordered(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            border_size: 4,
            border_color: "auto".to_string(),
        }
    }
}

const BORDER_EDGES: [&str; 6] = [
    "w:top",
    "w:left",
    "w:bottom",
    "w:right",
    "w:insideH",
    "w:insideV",
];

/// Serialize `word/styles.xml` with document defaults, the Normal
/// paragraph style, the default table style and the given table styles.
pub fn styles_xml(table_styles: &[TableStyle]) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("w:styles", &[("xmlns:w", W_NS)])?;

    w.start("w:docDefaults", &[])?;
    w.start("w:rPrDefault", &[])?;
    w.start("w:rPr", &[])?;
    w.empty(
        "w:rFonts",
        &[
            ("w:ascii", "Calibri"),
            ("w:hAnsi", "Calibri"),
            ("w:eastAsia", "Calibri"),
            ("w:cs", "Times New Roman"),
        ],
    )?;
    w.empty("w:sz", &[("w:val", "22")])?;
    w.empty("w:szCs", &[("w:val", "22")])?;
    w.empty("w:lang", &[("w:val", "en-US")])?;
    w.end("w:rPr")?;
    w.end("w:rPrDefault")?;
    w.start("w:pPrDefault", &[])?;
    w.start("w:pPr", &[])?;
    w.empty(
        "w:spacing",
        &[("w:after", "0"), ("w:line", "240"), ("w:lineRule", "auto")],
    )?;
    w.end("w:pPr")?;
    w.end("w:pPrDefault")?;
    w.end("w:docDefaults")?;

    w.start(
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ],
    )?;
    w.empty("w:name", &[("w:val", "Normal")])?;
    w.empty("w:qFormat", &[])?;
    w.end("w:style")?;

    w.start(
        "w:style",
        &[
            ("w:type", "table"),
            ("w:default", "1"),
            ("w:styleId", "TableNormal"),
        ],
    )?;
    w.empty("w:name", &[("w:val", "Normal Table")])?;
    w.empty("w:uiPriority", &[("w:val", "99")])?;
    w.empty("w:semiHidden", &[])?;
    w.start("w:tblPr", &[])?;
    w.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    w.start("w:tblCellMar", &[])?;
    w.empty("w:top", &[("w:w", "0"), ("w:type", "dxa")])?;
    w.empty("w:left", &[("w:w", "108"), ("w:type", "dxa")])?;
    w.empty("w:bottom", &[("w:w", "0"), ("w:type", "dxa")])?;
    w.empty("w:right", &[("w:w", "108"), ("w:type", "dxa")])?;
    w.end("w:tblCellMar")?;
    w.end("w:tblPr")?;
    w.end("w:style")?;

    for style in table_styles {
        let size = style.border_size.to_string();
        w.start(
            "w:style",
            &[("w:type", "table"), ("w:styleId", style.id.as_str())],
        )?;
        w.empty("w:name", &[("w:val", style.name.as_str())])?;
        w.empty("w:basedOn", &[("w:val", "TableNormal")])?;
        w.empty("w:uiPriority", &[("w:val", "59")])?;
        w.start("w:tblPr", &[])?;
        w.start("w:tblBorders", &[])?;
        for edge in BORDER_EDGES {
            w.empty(
                edge,
                &[
                    ("w:val", "single"),
                    ("w:sz", size.as_str()),
                    ("w:space", "0"),
                    ("w:color", style.border_color.as_str()),
                ],
            )?;
        }
        w.end("w:tblBorders")?;
        w.end("w:tblPr")?;
        w.end("w:style")?;
    }

    w.end("w:styles")?;
    Ok(w.into_bytes())
}
