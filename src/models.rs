use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FEATURE_COUNT: usize = 11;

/// Orden de columnas con el que se entrenó el pipeline; no cambiar.
pub const COLUMNS: [&str; FEATURE_COUNT] = [
    "edad",
    "genero",
    "altura",
    "peso",
    "presion_sistolica",
    "presion_diastolica",
    "colesterol",
    "glucosa",
    "fuma",
    "bebe",
    "actividad",
];

pub const MSG_MODEL_UNAVAILABLE: &str = "Modelo no disponible";
pub const MSG_INVALID_INPUT: &str = "Datos de entrada incompletos o inválidos.";

/// Registro crudo tal como llega por el endpoint. Cada campo es opcional y
/// de tipo libre: la coerción numérica decide después qué vale y qué no.
#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub edad: Option<Value>,
    pub genero: Option<Value>,
    pub altura: Option<Value>,
    pub peso: Option<Value>,
    pub presion_sistolica: Option<Value>,
    pub presion_diastolica: Option<Value>,
    pub colesterol: Option<Value>,
    pub glucosa: Option<Value>,
    pub fuma: Option<Value>,
    pub bebe: Option<Value>,
    pub actividad: Option<Value>,
}

impl PredictionRequest {
    /// Valores crudos en el mismo orden que `COLUMNS`.
    fn values(&self) -> [Option<&Value>; FEATURE_COUNT] {
        [
            self.edad.as_ref(),
            self.genero.as_ref(),
            self.altura.as_ref(),
            self.peso.as_ref(),
            self.presion_sistolica.as_ref(),
            self.presion_diastolica.as_ref(),
            self.colesterol.as_ref(),
            self.glucosa.as_ref(),
            self.fuma.as_ref(),
            self.bebe.as_ref(),
            self.actividad.as_ref(),
        ]
    }
}

/// Coerción numérica de un valor JSON, de mejor esfuerzo y uniforme para
/// todos los campos: número, cadena numérica o booleano. Cualquier otra
/// cosa (ausente, null, "abc", objetos) queda sin valor.
fn coerce(value: Option<&Value>) -> Option<f32> {
    match value? {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse::<f32>().ok().filter(|v| !v.is_nan()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Construye el vector de características en el orden de entrenamiento.
///
/// Política de todo o nada: si algún campo queda sin valor tras la coerción
/// se rechaza el registro completo y se devuelven los nombres de los campos
/// problemáticos. No se valida rango: cualquier valor numérico se acepta.
pub fn coerce_features(
    request: &PredictionRequest,
) -> Result<[f32; FEATURE_COUNT], Vec<&'static str>> {
    let mut features = [0.0_f32; FEATURE_COUNT];
    let mut invalid = Vec::new();

    for (i, (name, value)) in COLUMNS.iter().zip(request.values()).enumerate() {
        match coerce(value) {
            Some(v) => features[i] = v,
            None => invalid.push(*name),
        }
    }

    if invalid.is_empty() {
        Ok(features)
    } else {
        Err(invalid)
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub cardio_risk: i64,
    pub risk_percentage: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub modelo_cargado: bool,
}
