pub mod report_handlers;

use actix_web::web;

use crate::pipeline::TextCompleter;

/// Register all routes. `C` is the completion backend used by /generate.
pub fn configure<C: TextCompleter + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(report_handlers::index))
        .route("/generate", web::post().to(report_handlers::generate::<C>))
        .route("/download/{filename}", web::get().to(report_handlers::download))
        .default_service(web::to(report_handlers::not_found));
}
