mod config;
mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod middlewares;
pub mod request;
pub mod response;
#[cfg(test)]
mod testing;

use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use log::info;

use crate::config::Config;
use crate::database::postgres::PgStore;
use crate::error::Error;
use crate::impls::mailers::relay::RelayMailer;
use crate::impls::uploaders::imgbb::ImgbbHost;
use crate::middlewares::cors::cors_headers;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,actix_web=info");
    }
    env_logger::init();
    let config = Config::load()?;
    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    store.migrate().await?;
    info!("database ready, listening on {}:{}", config.bind_address, config.port);

    let store = Data::new(store);
    let mailer = Data::new(RelayMailer::new(config.mail.clone()));
    let image_host = Data::new(ImgbbHost::new(config.image_host.clone()));
    let notify = Data::new(config.notify.clone());
    let roles = Data::new(config.admin_roles.clone());
    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::default())
            .wrap(cors_headers())
            .app_data(store.clone())
            .app_data(mailer.clone())
            .app_data(image_host.clone())
            .app_data(notify.clone())
            .app_data(roles.clone())
            .configure(handlers::configure::<PgStore, RelayMailer, ImgbbHost>);
        match &static_dir {
            Some(dir) => app.service(actix_files::Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
