//! EPUB encoder implementation
//!
//! Produces an EPUB 3 container with an EPUB 2 NCX alongside the navigation
//! document, so older readers still get a table of contents. Package
//! documents are generated with quick-xml.

use crate::error::ConversionError;
use crate::packager::xhtml::xml_safe;
use crate::types::{Package, SpineItem};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// XML Namespaces
const NS_OPF: &str = "http://www.idpf.org/2007/opf";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_XHTML: &str = "http://www.w3.org/1999/xhtml";
const NS_OPS: &str = "http://www.idpf.org/2007/ops";
const NS_NCX: &str = "http://www.daisy.org/z3986/2005/ncx/";
const NS_CONTAINER: &str = "urn:oasis:names:tc:opendocument:xmlns:container";

/// Directory holding the package documents inside the container
const CONTENT_DIR: &str = "OEBPS";
const NAV_ID: &str = "nav";
const NAV_FILE: &str = "nav.xhtml";
const NCX_ID: &str = "ncx";
const NCX_FILE: &str = "toc.ncx";

/// Encoder for EPUB 3 format
#[derive(Debug, Default, Clone, Copy)]
pub struct EpubEncoder;

impl EpubEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Build the whole container in memory
    fn build_archive(&self, package: &Package) -> Result<Vec<u8>, ConversionError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        // The mimetype must come first and must not be compressed
        add_entry(
            &mut zip,
            "mimetype",
            b"application/epub+zip",
            FileOptions::default().compression_method(CompressionMethod::Stored),
        )?;
        add_entry(
            &mut zip,
            "META-INF/container.xml",
            &render_container().map_err(xml_error)?,
            options,
        )?;
        add_entry(
            &mut zip,
            &format!("{CONTENT_DIR}/content.opf"),
            &render_opf(package).map_err(xml_error)?,
            options,
        )?;
        add_entry(
            &mut zip,
            &format!("{CONTENT_DIR}/{NAV_FILE}"),
            &render_nav(package).map_err(xml_error)?,
            options,
        )?;
        add_entry(
            &mut zip,
            &format!("{CONTENT_DIR}/{NCX_FILE}"),
            &render_ncx(package).map_err(xml_error)?,
            options,
        )?;

        for unit in &package.units {
            add_entry(
                &mut zip,
                &format!("{CONTENT_DIR}/{}", unit.file_name),
                unit.xhtml.as_bytes(),
                options,
            )?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ConversionError::EncodingFailed(format!("Failed to finish zip: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

impl super::Encoder for EpubEncoder {
    fn encode(&self, package: &Package, writer: &mut dyn Write) -> Result<(), ConversionError> {
        let archive = self.build_archive(package)?;
        writer
            .write_all(&archive)
            .map_err(|e| ConversionError::EncodingFailed(format!("Failed to write EPUB: {}", e)))?;
        Ok(())
    }

    fn format_name(&self) -> &str {
        "EPUB"
    }
}

fn add_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    data: &[u8],
    options: FileOptions,
) -> Result<(), ConversionError> {
    zip.start_file(name, options)
        .map_err(|e| ConversionError::EncodingFailed(format!("Failed to add {}: {}", name, e)))?;
    zip.write_all(data)
        .map_err(|e| ConversionError::EncodingFailed(format!("Failed to write {}: {}", name, e)))?;
    Ok(())
}

fn xml_error(e: quick_xml::Error) -> ConversionError {
    ConversionError::EncodingFailed(format!("XML generation failed: {}", e))
}

fn new_writer() -> Writer<Cursor<Vec<u8>>> {
    Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
}

fn finish(writer: Writer<Cursor<Vec<u8>>>) -> Vec<u8> {
    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    bytes
}

/// Write a simple text element, dropping characters XML cannot carry
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    elem: BytesStart<'_>,
    content: &str,
) -> Result<(), quick_xml::Error> {
    let end = elem.to_end().into_owned();
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(&xml_safe(content))))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

/// Render META-INF/container.xml
fn render_container() -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = new_writer();
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut container = BytesStart::new("container");
    container.push_attribute(("version", "1.0"));
    container.push_attribute(("xmlns", NS_CONTAINER));
    writer.write_event(Event::Start(container))?;
    writer.write_event(Event::Start(BytesStart::new("rootfiles")))?;

    let full_path = format!("{CONTENT_DIR}/content.opf");
    let mut rootfile = BytesStart::new("rootfile");
    rootfile.push_attribute(("full-path", full_path.as_str()));
    rootfile.push_attribute(("media-type", "application/oebps-package+xml"));
    writer.write_event(Event::Empty(rootfile))?;

    writer.write_event(Event::End(BytesEnd::new("rootfiles")))?;
    writer.write_event(Event::End(BytesEnd::new("container")))?;
    Ok(finish(writer))
}

/// Render the OPF package document: metadata, manifest and spine
fn render_opf(package: &Package) -> Result<Vec<u8>, quick_xml::Error> {
    let language = package.metadata.language.tag();
    let mut writer = new_writer();
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("package");
    root.push_attribute(("xmlns", NS_OPF));
    root.push_attribute(("version", "3.0"));
    root.push_attribute(("unique-identifier", "book-id"));
    root.push_attribute(("xml:lang", language));
    writer.write_event(Event::Start(root))?;

    // Metadata
    let mut metadata = BytesStart::new("metadata");
    metadata.push_attribute(("xmlns:dc", NS_DC));
    writer.write_event(Event::Start(metadata))?;

    let mut identifier = BytesStart::new("dc:identifier");
    identifier.push_attribute(("id", "book-id"));
    write_text_element(&mut writer, identifier, &package.identifier)?;
    write_text_element(&mut writer, BytesStart::new("dc:title"), &package.metadata.title)?;
    write_text_element(&mut writer, BytesStart::new("dc:language"), language)?;
    if let Some(ref author) = package.metadata.author {
        let mut creator = BytesStart::new("dc:creator");
        creator.push_attribute(("id", "creator"));
        write_text_element(&mut writer, creator, author)?;
    }
    let mut modified = BytesStart::new("meta");
    modified.push_attribute(("property", "dcterms:modified"));
    write_text_element(
        &mut writer,
        modified,
        &package.modified.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    )?;

    writer.write_event(Event::End(BytesEnd::new("metadata")))?;

    // Manifest
    writer.write_event(Event::Start(BytesStart::new("manifest")))?;
    write_item(&mut writer, NCX_ID, NCX_FILE, "application/x-dtbncx+xml", None)?;
    write_item(&mut writer, NAV_ID, NAV_FILE, "application/xhtml+xml", Some("nav"))?;
    for unit in &package.units {
        write_item(&mut writer, &unit.id, &unit.file_name, "application/xhtml+xml", None)?;
    }
    writer.write_event(Event::End(BytesEnd::new("manifest")))?;

    // Spine
    let mut spine = BytesStart::new("spine");
    spine.push_attribute(("toc", NCX_ID));
    writer.write_event(Event::Start(spine))?;
    for item in &package.spine {
        let idref = match item {
            SpineItem::Navigation { .. } => NAV_ID,
            SpineItem::Chapter { id } => id.as_str(),
        };
        let mut itemref = BytesStart::new("itemref");
        itemref.push_attribute(("idref", idref));
        writer.write_event(Event::Empty(itemref))?;
    }
    writer.write_event(Event::End(BytesEnd::new("spine")))?;

    writer.write_event(Event::End(BytesEnd::new("package")))?;
    Ok(finish(writer))
}

/// Write one manifest item
fn write_item<W: Write>(
    writer: &mut Writer<W>,
    id: &str,
    href: &str,
    media_type: &str,
    properties: Option<&str>,
) -> Result<(), quick_xml::Error> {
    let mut item = BytesStart::new("item");
    item.push_attribute(("id", id));
    item.push_attribute(("href", href));
    item.push_attribute(("media-type", media_type));
    if let Some(properties) = properties {
        item.push_attribute(("properties", properties));
    }
    writer.write_event(Event::Empty(item))?;
    Ok(())
}

/// Render the EPUB 3 navigation document
fn render_nav(package: &Package) -> Result<Vec<u8>, quick_xml::Error> {
    let language = package.metadata.language.tag();
    let mut writer = new_writer();
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;

    let mut html = BytesStart::new("html");
    html.push_attribute(("xmlns", NS_XHTML));
    html.push_attribute(("xmlns:epub", NS_OPS));
    html.push_attribute(("lang", language));
    html.push_attribute(("xml:lang", language));
    writer.write_event(Event::Start(html))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    write_text_element(&mut writer, BytesStart::new("title"), &package.nav_label)?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "UTF-8"));
    writer.write_event(Event::Empty(meta))?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    let mut nav = BytesStart::new("nav");
    nav.push_attribute(("epub:type", "toc"));
    nav.push_attribute(("id", "toc"));
    writer.write_event(Event::Start(nav))?;
    write_text_element(&mut writer, BytesStart::new("h1"), &package.nav_label)?;

    writer.write_event(Event::Start(BytesStart::new("ol")))?;
    for (label, href) in nav_targets(package) {
        writer.write_event(Event::Start(BytesStart::new("li")))?;
        let mut link = BytesStart::new("a");
        link.push_attribute(("href", href));
        write_text_element(&mut writer, link, label)?;
        writer.write_event(Event::End(BytesEnd::new("li")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("ol")))?;

    writer.write_event(Event::End(BytesEnd::new("nav")))?;
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;
    Ok(finish(writer))
}

/// Render the EPUB 2 NCX table of contents
fn render_ncx(package: &Package) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = new_writer();
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut ncx = BytesStart::new("ncx");
    ncx.push_attribute(("xmlns", NS_NCX));
    ncx.push_attribute(("version", "2005-1"));
    writer.write_event(Event::Start(ncx))?;

    let uid = xml_safe(&package.identifier);
    writer.write_event(Event::Start(BytesStart::new("head")))?;
    for (name, content) in [
        ("dtb:uid", uid.as_ref()),
        ("dtb:depth", "1"),
        ("dtb:totalPageCount", "0"),
        ("dtb:maxPageNumber", "0"),
    ] {
        let mut meta = BytesStart::new("meta");
        meta.push_attribute(("name", name));
        meta.push_attribute(("content", content));
        writer.write_event(Event::Empty(meta))?;
    }
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("docTitle")))?;
    write_text_element(&mut writer, BytesStart::new("text"), &package.metadata.title)?;
    writer.write_event(Event::End(BytesEnd::new("docTitle")))?;

    writer.write_event(Event::Start(BytesStart::new("navMap")))?;
    for (position, (label, href)) in nav_targets(package).into_iter().enumerate() {
        let id = format!("navpoint-{}", position + 1);
        let play_order = (position + 1).to_string();
        let mut nav_point = BytesStart::new("navPoint");
        nav_point.push_attribute(("id", id.as_str()));
        nav_point.push_attribute(("playOrder", play_order.as_str()));
        writer.write_event(Event::Start(nav_point))?;

        writer.write_event(Event::Start(BytesStart::new("navLabel")))?;
        write_text_element(&mut writer, BytesStart::new("text"), label)?;
        writer.write_event(Event::End(BytesEnd::new("navLabel")))?;

        let mut content = BytesStart::new("content");
        content.push_attribute(("src", href));
        writer.write_event(Event::Empty(content))?;

        writer.write_event(Event::End(BytesEnd::new("navPoint")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("navMap")))?;

    writer.write_event(Event::End(BytesEnd::new("ncx")))?;
    Ok(finish(writer))
}

/// Table of contents targets as (label, href).
///
/// Both navigation formats require at least one entry, so a package without
/// chapters links its navigation document to itself under the book title.
fn nav_targets(package: &Package) -> Vec<(&str, &str)> {
    if package.toc.is_empty() {
        return vec![(package.metadata.title.as_str(), NAV_FILE)];
    }
    package
        .toc
        .iter()
        .map(|entry| (entry.label.as_str(), entry.href.as_str()))
        .collect()
}
