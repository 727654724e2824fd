use actix_web::error::BlockingError;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::config::ConfigError;
use crate::models::TemplateError;
use crate::pipeline::writer::WriteError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Template(askama::Error),
    ReportTemplate(TemplateError),
    Io(std::io::Error),
    Write(WriteError),
    Blocking(BlockingError),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::ReportTemplate(e) => write!(f, "Report template error: {e}"),
            AppError::Io(e) => write!(f, "IO error: {e}"),
            AppError::Write(e) => write!(f, "Document write error: {e}"),
            AppError::Blocking(e) => write!(f, "Background task error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::ReportTemplate(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<WriteError> for AppError {
    fn from(e: WriteError) -> Self {
        AppError::Write(e)
    }
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        AppError::Blocking(e)
    }
}

/// Render an Askama template into an HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
