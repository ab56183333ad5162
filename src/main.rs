use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

use todoapp::{auth::TokenKeys, config::Config, db, routes};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let keys = web::Data::new(TokenKeys::new(&config.jwt_secret, config.token_ttl()));
    let pool = web::Data::new(pool);
    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!("Starting todoapp server at {}", config.server_url());
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(keys.clone())
            .app_data(config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
