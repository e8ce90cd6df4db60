use std::error::Error;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use eatreal_api::{config::Config, routes, AppState};
use log::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let config = Config::from_env();
    let port = config.port;
    let state = web::Data::new(AppState::from_config(config));

    info!("Listening on port {}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header(),
            )
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;
    Ok(())
}
