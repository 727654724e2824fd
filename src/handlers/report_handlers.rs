use actix_files::NamedFile;
use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_session::Session;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::Template;
use crate::pipeline::{extract_text, generate_sections, write_docx, TextCompleter};
use crate::session::{redirect_with_flash, take_flash};
use crate::templates_structs::{IndexTemplate, ResultTemplate, SectionView};
use crate::uploads::{allowed_file, report_file_name, secure_filename};

/// Multipart body of POST /generate.
#[derive(MultipartForm)]
pub struct GenerateForm {
    pub proposal: Option<TempFile>,
    pub notes: Option<Text<String>>,
    pub template_json: Option<Text<String>>,
}

/// GET /
/// Upload form with a preview of the default template.
pub async fn index(session: Session) -> Result<HttpResponse, AppError> {
    let template = Template::bundled()?;
    let tmpl = IndexTemplate {
        flash: take_flash(&session),
        template_preview: template.to_pretty_json(),
        section_count: template.sections.len(),
    };
    render(tmpl)
}

/// POST /generate
/// Validates the upload, then runs extract -> generate -> write and shows the result.
pub async fn generate<C: TextCompleter>(
    config: web::Data<AppConfig>,
    session: Session,
    MultipartForm(form): MultipartForm<GenerateForm>,
) -> Result<HttpResponse, AppError> {
    let Some(upload) = form.proposal else {
        return Ok(redirect_with_flash(&session, "No proposal file part"));
    };

    let original_name = upload.file_name.clone().unwrap_or_default();
    if original_name.is_empty() {
        return Ok(redirect_with_flash(&session, "No selected file"));
    }

    let filename = secure_filename(&original_name);
    if !allowed_file(&original_name) || filename.is_empty() {
        return Ok(redirect_with_flash(&session, "Allowed file types: pptx"));
    }

    // Template errors are reported before anything touches the upload.
    let raw_template = form.template_json.map(Text::into_inner);
    let template = match Template::load(raw_template.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            log::info!("Rejected template for {filename}: {e}");
            return Ok(redirect_with_flash(&session, &format!("Template JSON parse error: {e}")));
        }
    };
    let notes = form.notes.map(Text::into_inner).unwrap_or_default();

    let work_dir = config.work_dir.clone();
    let save_path = work_dir.join(&filename);
    let temp_path = upload.file.path().to_path_buf();
    let proposal_text = web::block(move || -> std::io::Result<String> {
        std::fs::create_dir_all(&work_dir)?;
        std::fs::copy(&temp_path, &save_path)?;
        Ok(extract_text(&save_path))
    })
    .await??;
    log::info!(
        "Extracted {} chars from {filename}, generating {} sections",
        proposal_text.len(),
        template.sections.len()
    );

    let api_key = config.llm.require_api_key()?;
    let client = C::connect(&config.llm, api_key)?;
    let sections = generate_sections(&client, &template, &proposal_text, &notes).await;

    let out_name = report_file_name(&filename);
    let out_path = config.work_dir.join(&out_name);
    let sections = web::block(move || write_docx(&sections, &out_path).map(|()| sections)).await??;

    let tmpl = ResultTemplate {
        sections: sections
            .into_iter()
            .map(|s| SectionView { title: s.title, body: s.body })
            .collect(),
        download_path: format!("/download/{out_name}"),
        file_name: out_name,
    };
    render(tmpl)
}

/// GET /download/{filename}
/// Serves a generated file from the working directory as an attachment.
pub async fn download(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = secure_filename(&path.into_inner());
    let file_path = config.work_dir.join(&filename);

    if filename.is_empty() || !file_path.is_file() {
        return Ok(redirect_with_flash(&session, "File not found"));
    }

    let file = NamedFile::open(&file_path)?.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    });
    Ok(file.into_response(&req))
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
