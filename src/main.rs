use actix_multipart::form::MultipartFormConfig;
use actix_web::{App, HttpServer, middleware, web};

use proposal_report::config::AppConfig;
use proposal_report::handlers;
use proposal_report::pipeline::{ChatClient, install_crypto_provider};
use proposal_report::session::session_middleware;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    install_crypto_provider();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    std::fs::create_dir_all(&config.work_dir)?;
    log::info!("Working directory: {}", config.work_dir.display());

    if config.llm.api_key.is_none() {
        log::warn!("No HF_ROUTER_API_KEY or OPENAI_API_KEY set - report generation will fail");
    }
    log::info!("Using model {} at {}", config.llm.model, config.llm.base_url);

    let secret_key = config.session_key();
    let bind = (config.host.clone(), config.port);
    let upload_limit = config.max_upload_bytes;
    let config = web::Data::new(config);

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(upload_limit)
                    .memory_limit(1024 * 1024),
            )
            .configure(handlers::configure::<ChatClient>)
    })
    .bind(bind)?
    .run()
    .await
}
