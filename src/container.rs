//! ZIP container abstraction for OOXML packages.
//!
//! [`PackageWriter`] assembles a package from parts and writes the
//! `[Content_Types].xml` index; [`OoxmlContainer`] reads parts back.

use crate::error::{Error, Result};
use crate::xml::XmlWriter;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Content type of relationship parts.
pub const RELATIONSHIPS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-package.relationships+xml";

/// A relationship entry of a .rels part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative to the source part)
    pub target: String,
}

/// Ordered relationships of one source part.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship with the next free `rIdN` and return the ID.
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });
        id
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a .rels part.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut w = XmlWriter::new()?;
        w.start(
            "Relationships",
            &[(
                "xmlns",
                "http://schemas.openxmlformats.org/package/2006/relationships",
            )],
        )?;
        for rel in &self.entries {
            w.empty(
                "Relationship",
                &[
                    ("Id", rel.id.as_str()),
                    ("Type", rel.rel_type.as_str()),
                    ("Target", rel.target.as_str()),
                ],
            )?;
        }
        w.end("Relationships")?;
        Ok(w.into_bytes())
    }
}

struct Part {
    path: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Assembles an OOXML package in memory.
///
/// Parts are written in insertion order after `[Content_Types].xml`.
#[derive(Default)]
pub struct PackageWriter {
    parts: Vec<Part>,
}

impl PackageWriter {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part. `content_type` registers an Override entry; parts without
    /// one fall back to the extension defaults (`rels`, `xml`).
    pub fn add_part(&mut self, path: &str, content_type: Option<&str>, data: Vec<u8>) {
        self.parts.push(Part {
            path: path.trim_start_matches('/').to_string(),
            content_type: content_type.map(String::from),
            data,
        });
    }

    /// Add a relationships part.
    pub fn add_relationships(&mut self, path: &str, rels: &Relationships) -> Result<()> {
        self.add_part(path, None, rels.to_xml()?);
        Ok(())
    }

    /// Number of parts added so far.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if no parts were added.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn content_types_xml(&self) -> Result<Vec<u8>> {
        let mut w = XmlWriter::new()?;
        w.start(
            "Types",
            &[(
                "xmlns",
                "http://schemas.openxmlformats.org/package/2006/content-types",
            )],
        )?;
        w.empty(
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", RELATIONSHIPS_CONTENT_TYPE),
            ],
        )?;
        w.empty(
            "Default",
            &[("Extension", "xml"), ("ContentType", "application/xml")],
        )?;
        for part in &self.parts {
            if let Some(ref content_type) = part.content_type {
                let name = format!("/{}", part.path);
                w.empty(
                    "Override",
                    &[
                        ("PartName", name.as_str()),
                        ("ContentType", content_type.as_str()),
                    ],
                )?;
            }
        }
        w.end("Types")?;
        Ok(w.into_bytes())
    }

    /// Write the ZIP archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let content_types = self.content_types_xml()?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(&content_types)?;

        for part in &self.parts {
            zip.start_file(part.path.as_str(), options)?;
            zip.write_all(&part.data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// OOXML container abstraction over a ZIP archive.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open an OOXML container from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create an OOXML container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as a string, skipping a UTF-8 BOM.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
        String::from_utf8(body.to_vec())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Read a binary part.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all parts in the archive.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}
