use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use log::info;

use taskpad::auth::TokenService;
use taskpad::config::Config;
use taskpad::routes;
use taskpad::store::Store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let store = web::Data::new(
        Store::connect(&config.database_url)
            .await
            .expect("Failed to connect to database"),
    );
    let tokens = web::Data::new(TokenService::new(
        &config.jwt_secret,
        config.token_ttl_minutes,
    ));

    info!("Starting taskpad server at {}", config.server_url());

    let cors_origin = config.cors_origin.clone();
    let app_store = store.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(app_store.clone())
            .app_data(tokens.clone())
            .wrap(
                // Session cookies are same-site=none, so the browser only
                // sends them cross-origin when the origin is explicitly
                // allowed with credentials.
                Cors::default()
                    .allowed_origin(&cors_origin)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                    .allowed_header("x-csrf-token")
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    store.close().await;
    Ok(())
}
