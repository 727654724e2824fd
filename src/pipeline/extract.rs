//! Plain-text extraction from `.pptx` presentations.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use roxmltree::{Document, Node};

const P_NAMESPACE: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const A_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const R_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_RELS_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Text emitted for `a:br` inside a paragraph (vertical tab).
pub const LINE_BREAK: char = '\u{000B}';

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("No <p:spTree> in slide")]
    MissingShapeTree,
}

/// An opened presentation archive with its slides resolved into display order.
pub struct Presentation {
    archive: zip::ZipArchive<File>,
    slide_paths: Vec<String>,
}

impl Presentation {
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)?;

        let slide_paths = match ordered_slide_paths(&mut archive) {
            Ok(paths) if !paths.is_empty() => paths,
            Ok(_) => numbered_slide_paths(&archive),
            Err(e) => {
                log::debug!("presentation.xml slide order unavailable ({e}), using file names");
                numbered_slide_paths(&archive)
            }
        };

        Ok(Self { archive, slide_paths })
    }

    pub fn slide_paths(&self) -> &[String] {
        &self.slide_paths
    }

    /// Text of every text-bearing shape on one slide, in shape order.
    pub fn slide_texts(&mut self, slide_path: &str) -> Result<Vec<String>, ExtractError> {
        let xml = read_entry(&mut self.archive, slide_path)?;
        parse_slide_texts(&xml)
    }
}

/// Flatten all shape text of a presentation into one newline-joined string.
///
/// Never fails: an unreadable file yields an empty string and unreadable
/// slides are skipped.
pub fn extract_text(path: &Path) -> String {
    let mut presentation = match Presentation::open(path) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Could not open presentation {}: {e}", path.display());
            return String::new();
        }
    };

    let mut texts = Vec::new();
    for slide_path in presentation.slide_paths().to_vec() {
        match presentation.slide_texts(&slide_path) {
            Ok(mut slide) => texts.append(&mut slide),
            Err(e) => log::warn!("Skipping {slide_path}: {e}"),
        }
    }
    texts.join("\n")
}

/// Parse one slide's XML and collect the text of each top-level `<p:sp>`.
pub fn parse_slide_texts(xml: &str) -> Result<Vec<String>, ExtractError> {
    let doc = Document::parse(xml)?;
    let sp_tree = doc
        .root_element()
        .children()
        .find(|n| is_elem(n, P_NAMESPACE, "cSld"))
        .and_then(|c_sld| c_sld.children().find(|n| is_elem(n, P_NAMESPACE, "spTree")))
        .ok_or(ExtractError::MissingShapeTree)?;

    Ok(sp_tree
        .children()
        .filter(|n| is_elem(n, P_NAMESPACE, "sp"))
        .map(|sp| shape_text(&sp))
        .collect())
}

/// Paragraphs of the shape's text body joined by newlines; empty without a body.
fn shape_text(sp: &Node) -> String {
    let Some(tx_body) = sp.children().find(|n| is_elem(n, P_NAMESPACE, "txBody")) else {
        return String::new();
    };

    tx_body
        .children()
        .filter(|n| is_elem(n, A_NAMESPACE, "p"))
        .map(|p| paragraph_text(&p))
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph_text(p: &Node) -> String {
    let mut text = String::new();
    for child in p.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(A_NAMESPACE) {
            continue;
        }
        match child.tag_name().name() {
            "r" | "fld" => {
                if let Some(t) = child
                    .children()
                    .find(|n| is_elem(n, A_NAMESPACE, "t"))
                    .and_then(|t| t.text())
                {
                    text.push_str(t);
                }
            }
            // Soft line break, kept distinct from the paragraph separator
            "br" => text.push(LINE_BREAK),
            _ => {}
        }
    }
    text
}

/// Slide part names in the order declared by `<p:sldIdLst>`.
fn ordered_slide_paths(archive: &mut zip::ZipArchive<File>) -> Result<Vec<String>, ExtractError> {
    let presentation = read_entry(archive, PRESENTATION_PATH)?;
    let rels = read_entry(archive, PRESENTATION_RELS_PATH)?;

    let rels_doc = Document::parse(&rels)?;
    let targets: Vec<(&str, &str)> = rels_doc
        .root_element()
        .children()
        .filter(|n| is_elem(n, PKG_RELS_NAMESPACE, "Relationship"))
        .filter_map(|n| Some((n.attribute("Id")?, n.attribute("Target")?)))
        .collect();

    let doc = Document::parse(&presentation)?;
    let Some(id_list) = doc
        .root_element()
        .children()
        .find(|n| is_elem(n, P_NAMESPACE, "sldIdLst"))
    else {
        return Ok(Vec::new());
    };

    let paths = id_list
        .children()
        .filter(|n| is_elem(n, P_NAMESPACE, "sldId"))
        .filter_map(|n| n.attribute((R_NAMESPACE, "id")))
        .filter_map(|rid| targets.iter().find(|(id, _)| *id == rid))
        .map(|(_, target)| resolve_part_name(target))
        .collect();
    Ok(paths)
}

/// Fallback ordering: `ppt/slides/slideN.xml` sorted by N.
fn numbered_slide_paths(archive: &zip::ZipArchive<File>) -> Vec<String> {
    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort();
    numbered.into_iter().map(|(_, name)| name).collect()
}

/// Relationship targets are relative to `ppt/` unless they start with `/`.
fn resolve_part_name(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target.trim_start_matches("./")),
    }
}

fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Result<String, ExtractError> {
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn is_elem(node: &Node, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}
