//! PDF document backed by `lopdf`
//!
//! Loading keeps every page and object of the source file, so saving writes
//! the full document back with the new outline attached.

use crate::error::{BookmarkError, Result};
use crate::structure::OutlineSink;
use lopdf::{Bookmark, Document, Object, ObjectId, StringFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Outline entries are drawn in black, regular style
const ENTRY_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
const ENTRY_FORMAT: u32 = 0;

/// A loaded PDF that can receive outline entries
pub struct PdfDocument {
    document: Document,
    /// Page object ids in page order
    pages: Vec<ObjectId>,
    /// Outline root once it has been written into the catalog
    outline_root: Option<ObjectId>,
}

impl PdfDocument {
    /// Load a PDF from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let document = Document::load(path.as_ref())?;
        Ok(Self::from_document(document))
    }

    /// Wrap an already loaded document
    pub fn from_document(document: Document) -> Self {
        let pages = document.get_pages().into_values().collect();
        Self {
            document,
            pages,
            outline_root: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_inner(self) -> Document {
        self.document
    }

    /// Save to `path`, flushing the buffered writer before returning
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finish_outline()?;

        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.document.save_to(&mut writer)?;
        writer.flush()?;

        tracing::debug!(path = %path.as_ref().display(), "saved PDF");
        Ok(())
    }

    /// Write the document into `buffer`
    pub fn write(&mut self, buffer: &mut Vec<u8>) -> Result<()> {
        self.finish_outline()?;
        self.document.save_to(buffer)?;
        Ok(())
    }

    /// Build the outline objects and hook them into the catalog
    fn finish_outline(&mut self) -> Result<()> {
        if self.outline_root.is_some() {
            return Ok(());
        }
        let Some(root) = self.document.build_outline() else {
            return Ok(());
        };
        self.encode_titles(root)?;

        let catalog_id = self
            .document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|_| BookmarkError::InvalidStructure("trailer has no /Root catalog".to_string()))?;
        let catalog = self.document.get_object_mut(catalog_id)?.as_dict_mut()?;
        if catalog.has(b"Outlines") {
            tracing::debug!("replacing existing document outline");
        }
        catalog.set("Outlines", Object::Reference(root));
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        self.outline_root = Some(root);
        Ok(())
    }

    /// Store non-ASCII titles as UTF-16BE text strings so viewers decode them
    fn encode_titles(&mut self, root: ObjectId) -> Result<()> {
        let mut pending = first_child(&self.document, root)?.into_iter().collect::<Vec<_>>();

        while let Some(id) = pending.pop() {
            let item = self.document.get_object(id)?.as_dict()?;
            let title = item.get(b"Title").and_then(Object::as_str).ok().map(<[u8]>::to_vec);
            let next = item.get(b"Next").and_then(Object::as_reference).ok();
            let first = item.get(b"First").and_then(Object::as_reference).ok();
            pending.extend(next);
            pending.extend(first);

            let Some(title) = title else { continue };
            if title.is_ascii() || title.starts_with(&[0xFE, 0xFF]) {
                continue;
            }
            // already in some other encoding, leave it alone
            let Ok(text) = String::from_utf8(title) else {
                continue;
            };
            self.document
                .get_object_mut(id)?
                .as_dict_mut()?
                .set("Title", text_string(&text));
        }

        Ok(())
    }
}

fn first_child(document: &Document, id: ObjectId) -> Result<Option<ObjectId>> {
    let dict = document.get_object(id)?.as_dict()?;
    Ok(dict.get(b"First").and_then(Object::as_reference).ok())
}

/// Encode `text` as a PDF text string (UTF-16BE with byte order mark)
pub fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

impl OutlineSink for PdfDocument {
    type Handle = u32;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn attach_outline_entry(
        &mut self,
        title: &str,
        page_index: usize,
        parent: Option<u32>,
    ) -> Result<u32> {
        let page = *self
            .pages
            .get(page_index)
            .ok_or(BookmarkError::PageIndexOutOfBounds(page_index, self.pages.len()))?;

        let bookmark = Bookmark::new(title.to_string(), ENTRY_COLOR, ENTRY_FORMAT, page);
        Ok(self.document.add_bookmark(bookmark, parent))
    }
}
