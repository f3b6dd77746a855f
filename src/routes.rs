use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, warn};

use crate::inference::AppState;
use crate::models::{
    coerce_features, ErrorResponse, HealthResponse, PredictionRequest, PredictionResponse,
    MSG_INVALID_INPUT, MSG_MODEL_UNAVAILABLE,
};

#[post("/predict")]
pub async fn predict(
    state: web::Data<AppState>,
    input: web::Json<PredictionRequest>,
) -> impl Responder {
    // Sin modelo no se valida nada: toda petición falla igual.
    let Some(model) = state.model.as_ref() else {
        error!("Petición rechazada: no hay modelo cargado");
        return HttpResponse::InternalServerError().json(ErrorResponse::new(MSG_MODEL_UNAVAILABLE));
    };

    let features = match coerce_features(&input) {
        Ok(features) => features,
        Err(fields) => {
            warn!("Entrada incompleta o no numérica, campos: {:?}", fields);
            return HttpResponse::BadRequest().json(ErrorResponse::new(MSG_INVALID_INPUT));
        }
    };

    let outcome = model
        .predict(&features)
        .and_then(|label| model.predict_proba(&features).map(|proba| (label, proba)));

    match outcome {
        Ok((label, proba)) => {
            let risk_percentage = format!("{:.2}", proba[1] * 100.0);
            HttpResponse::Ok().json(PredictionResponse {
                cardio_risk: label,
                risk_percentage,
            })
        }
        Err(e) => {
            error!("Error crítico en la predicción: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
                "Error interno del servidor. Detalle: {}",
                e
            )))
        }
    }
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        modelo_cargado: state.model.is_some(),
    })
}

/// Configuración JSON compartida entre el binario y los tests: cuerpo acotado
/// y errores de deserialización convertidos al mismo cuerpo JSON que una
/// entrada inválida, para que el cliente reciba JSON en todos los caminos.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().limit(64 * 1024).error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::new(MSG_INVALID_INPUT)),
        )
        .into()
    })
}
