mod config;
mod entities;
mod media;
mod services;
mod state;
mod store;

use crate::config::Settings;
use crate::state::AppState;
use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env();
    info!("Settings: {}", settings);

    let state = AppState::open(&settings);
    state.ensure_upload_dirs()?;
    state.log_stores();

    let upload_root = settings.upload_root.clone();
    info!("Server running at {}", settings.bind_address());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .service(Files::new("/static/uploads", upload_root.clone()))
            .configure(services::configure_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
