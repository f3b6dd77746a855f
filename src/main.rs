mod inference;
mod models;
mod routes;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use log::info;

use inference::{load_model, AppState, MODEL_PATH};
use models::ErrorResponse;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("Iniciando la API de riesgo cardiovascular");

    let state = web::Data::new(AppState::new(load_model(MODEL_PATH)));

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let workers = std::env::var("WORKERS")
        .ok()
        .and_then(|w| w.parse().ok())
        .unwrap_or_else(num_cpus::get);

    let bind_address = format!("{}:{}", host, port);
    info!("Servidor escuchando en http://{}", bind_address);
    info!("   POST /predict - Clasificación de riesgo");
    info!("   GET  /health  - Estado del servicio");

    HttpServer::new(move || {
        // El frontend se sirve desde cualquier origen; la API es abierta.
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .app_data(routes::json_config())
            .service(routes::predict)
            .service(routes::health)
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ErrorResponse::new("Recurso no encontrado"))
            }))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
