//! Shared test infrastructure.
//!
//! - `write_pptx()` / `write_pptx_ordered()` / `write_pptx_without_manifest()` build minimal presentations on disk
//! - `ScriptedCompleter` stands in for the remote chat completion service
//! - `multipart_body()` encodes a /generate form
//! - `read_docx_paragraphs()` reads back a written report

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use proposal_report::config::{ConfigError, LlmConfig};
use proposal_report::pipeline::{LlmError, TextCompleter};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const BOUNDARY: &str = "----proposal-report-test-boundary";

const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

// ============================================================================
// PRESENTATION FIXTURES
// ============================================================================

/// Write a presentation whose slides appear in the given order.
/// Each slide is a list of text shapes; each shape is a list of paragraphs.
pub fn write_pptx(dir: &Path, name: &str, slides: &[&[&[&str]]]) -> PathBuf {
    let order: Vec<usize> = (1..=slides.len()).collect();
    write_pptx_ordered(dir, name, slides, &order)
}

/// Like `write_pptx`, but `order` lists slide file numbers (1-based) in the
/// order `presentation.xml` declares them. `slides[i]` is stored as `slide{i+1}.xml`.
pub fn write_pptx_ordered(
    dir: &Path,
    name: &str,
    slides: &[&[&[&str]]],
    order: &[usize],
) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("create pptx");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    let put = |zip: &mut zip::ZipWriter<std::fs::File>, entry: &str, body: &str| {
        zip.start_file(entry, options).expect("start entry");
        zip.write_all(body.as_bytes()).expect("write entry");
    };

    put(&mut zip, "[Content_Types].xml", r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#);

    let ids: String = order
        .iter()
        .enumerate()
        .map(|(i, n)| format!(r#"<p:sldId id="{}" r:id="rId{n}"/>"#, 256 + i))
        .collect();
    put(
        &mut zip,
        "ppt/presentation.xml",
        &format!(r#"<p:presentation xmlns:p="{P_NS}" xmlns:r="{R_NS}"><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>"#),
    );

    let rels: String = (1..=slides.len())
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#
            )
        })
        .collect();
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &format!(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#),
    );

    for (i, shapes) in slides.iter().enumerate() {
        put(&mut zip, &format!("ppt/slides/slide{}.xml", i + 1), &slide_xml(shapes));
    }

    zip.finish().expect("finish pptx");
    path
}

/// A bare archive with no `presentation.xml`: only `slide{n}.xml` entries,
/// stored in the order given so the reader has to sort them itself.
pub fn write_pptx_without_manifest(dir: &Path, name: &str, slides: &[(usize, &str)]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("create pptx");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    for (n, text) in slides {
        zip.start_file(format!("ppt/slides/slide{n}.xml"), options).expect("start entry");
        zip.write_all(slide_xml(&[&[*text]]).as_bytes()).expect("write entry");
    }

    zip.finish().expect("finish pptx");
    path
}

fn slide_xml(shapes: &[&[&str]]) -> String {
    let body: String = shapes
        .iter()
        .map(|paragraphs| {
            let ps: String = paragraphs
                .iter()
                .map(|t| format!("<a:p><a:r><a:t>{t}</a:t></a:r></a:p>"))
                .collect();
            format!("<p:sp><p:nvSpPr/><p:spPr/><p:txBody><a:bodyPr/>{ps}</p:txBody></p:sp>")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><p:sld xmlns:a="{A_NS}" xmlns:p="{P_NS}" xmlns:r="{R_NS}"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{body}</p:spTree></p:cSld></p:sld>"#
    )
}

// ============================================================================
// COMPLETION FAKE
// ============================================================================

thread_local! {
    static PROMPTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Prompts seen by any `ScriptedCompleter` on this thread, oldest first.
pub fn recorded_prompts() -> Vec<String> {
    PROMPTS.with(|p| p.borrow().clone())
}

pub fn clear_recorded_prompts() {
    PROMPTS.with(|p| p.borrow_mut().clear());
}

/// Answers `Body of <title>` and fails for any title in `fail_titles`.
#[derive(Default)]
pub struct ScriptedCompleter {
    pub fail_titles: Vec<String>,
}

impl ScriptedCompleter {
    pub fn failing_on(titles: &[&str]) -> Self {
        Self { fail_titles: titles.iter().map(|t| t.to_string()).collect() }
    }
}

/// The title the generator quoted at the start of the prompt.
pub fn prompt_title(prompt: &str) -> &str {
    prompt
        .strip_prefix("Write the section titled \"")
        .and_then(|rest| rest.split_once("\". Target length"))
        .map(|(title, _)| title)
        .unwrap_or("")
}

impl TextCompleter for ScriptedCompleter {
    fn connect(_config: &LlmConfig, _api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self::default())
    }

    async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        PROMPTS.with(|p| p.borrow_mut().push(user_prompt.to_string()));
        let title = prompt_title(user_prompt);
        if self.fail_titles.iter().any(|t| t == title) {
            return Err(LlmError::Status { status: 503, body: format!("upstream unavailable for {title}") });
        }
        Ok(format!("Body of {title}"))
    }
}

// ============================================================================
// MULTIPART
// ============================================================================

pub enum Part<'a> {
    Text { name: &'a str, value: &'a str },
    File { name: &'a str, filename: &'a str, content: &'a [u8] },
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
                );
            }
            Part::File { name, filename, content } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

// ============================================================================
// DOCX READBACK
// ============================================================================

/// (paragraph style id, paragraph text) for every body paragraph.
/// Line breaks inside a paragraph come back as `\n`.
pub fn read_docx_paragraphs(path: &Path) -> Vec<(Option<String>, String)> {
    let file = std::fs::File::open(path).expect("open docx");
    let mut archive = zip::ZipArchive::new(file).expect("docx is a zip");
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .expect("document.xml present")
        .read_to_string(&mut xml)
        .expect("read document.xml");

    let doc = roxmltree::Document::parse(&xml).expect("document.xml parses");
    doc.descendants()
        .filter(|n| n.has_tag_name((W_NS, "p")))
        .map(|p| {
            let style = p
                .descendants()
                .find(|n| n.has_tag_name((W_NS, "pStyle")))
                .and_then(|n| n.attribute((W_NS, "val")))
                .map(str::to_string);
            let mut text = String::new();
            for n in p.descendants() {
                if n.has_tag_name((W_NS, "t")) {
                    text.push_str(n.text().unwrap_or(""));
                } else if n.has_tag_name((W_NS, "br")) {
                    text.push('\n');
                }
            }
            (style, text)
        })
        .collect()
}
