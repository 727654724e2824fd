use std::fs::File;
use std::path::Path;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};

use crate::models::GeneratedSections;

pub const HEADING_STYLE: &str = "Heading1";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not package document: {0}")]
    Pack(String),
}

/// Build the document: one level-1 heading and one paragraph per section.
pub fn build_document(sections: &GeneratedSections) -> Docx {
    let heading = Style::new(HEADING_STYLE, StyleType::Paragraph)
        .name("Heading 1")
        .bold()
        .size(32);

    sections.iter().fold(Docx::new().add_style(heading), |doc, section| {
        doc.add_paragraph(
            Paragraph::new()
                .style(HEADING_STYLE)
                .add_run(Run::new().add_text(&section.title)),
        )
        .add_paragraph(body_paragraph(&section.body))
    })
}

/// Newlines inside a body become line breaks within the one paragraph.
fn body_paragraph(body: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line.trim_end_matches('\r'));
    }
    Paragraph::new().add_run(run)
}

/// Write the sections to `out_path`, replacing any existing file.
pub fn write_docx(sections: &GeneratedSections, out_path: &Path) -> Result<(), WriteError> {
    let file = File::create(out_path)?;
    build_document(sections)
        .build()
        .pack(file)
        .map_err(|e| WriteError::Pack(e.to_string()))?;
    log::info!("Wrote {} sections to {}", sections.len(), out_path.display());
    Ok(())
}
