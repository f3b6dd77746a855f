use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use tract_onnx::prelude::*;

use crate::models::FEATURE_COUNT;

/// Artefacto exportado por el entrenamiento offline. La ruta es fija: no hay
/// recarga ni versionado, el modelo queda congelado al arrancar el proceso.
pub const MODEL_PATH: &str = "models/modelo_regresion_logistica.onnx";

/// Interfaz del clasificador ya entrenado.
pub trait Predictor: Send + Sync {
    /// Etiqueta binaria de riesgo (0/1).
    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> anyhow::Result<i64>;

    /// Probabilidades por clase: `[sin riesgo, con riesgo]`.
    fn predict_proba(&self, features: &[f32; FEATURE_COUNT]) -> anyhow::Result<[f32; 2]>;
}

type RunnableOnnx = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Regresión logística exportada a ONNX. El grafo emite un único logit; la
/// probabilidad de la clase de riesgo es su sigmoide.
pub struct RiskModel {
    model: RunnableOnnx,
}

impl RiskModel {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1usize, FEATURE_COUNT)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model })
    }

    fn risk_probability(&self, features: &[f32; FEATURE_COUNT]) -> TractResult<f32> {
        let input = Tensor::from_shape(&[1, FEATURE_COUNT], features)?;
        let outputs = self.model.run(tvec!(input.into()))?;

        let logit: f32 = *outputs[0]
            .to_array_view::<f32>()?
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("el modelo no produjo ninguna salida"))?;

        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}

impl Predictor for RiskModel {
    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> anyhow::Result<i64> {
        let p = self.risk_probability(features)?;
        Ok(i64::from(p >= 0.5))
    }

    fn predict_proba(&self, features: &[f32; FEATURE_COUNT]) -> anyhow::Result<[f32; 2]> {
        let p = self.risk_probability(features)?;
        Ok([1.0 - p, p])
    }
}

/// Estado compartido de la aplicación: el predictor cargado al arranque,
/// inmutable y de solo lectura para todas las peticiones concurrentes.
pub struct AppState {
    pub model: Option<Arc<dyn Predictor>>,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn Predictor>>) -> Self {
        Self { model }
    }
}

/// Intenta cargar el artefacto. Si falta o está corrupto el proceso sigue en
/// modo degradado y todas las inferencias fallan rápido.
pub fn load_model(path: &str) -> Option<Arc<dyn Predictor>> {
    match RiskModel::load(path) {
        Ok(model) => {
            info!("Modelo cargado exitosamente desde {}", path);
            Some(Arc::new(model))
        }
        Err(e) => {
            error!("No se pudo cargar el modelo desde {}: {}", path, e);
            None
        }
    }
}
