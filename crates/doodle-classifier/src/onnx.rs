//! QuickDraw-style sketch classifier on ONNX Runtime.

use std::sync::Mutex;

use async_trait::async_trait;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, Value};
use tracing::{debug, info};

use doodle_media::DrawingImage;

use crate::error::{ClassifierError, ClassifyResult};
use crate::model::{
    input_tensor, parse_labels, rank_top_k, ClassifierModelConfig, Prediction, SketchModel,
};

/// Sketch classifier backed by an ONNX model and a labels file.
pub struct OnnxSketchModel {
    session: Mutex<Session>,
    labels: Vec<String>,
    config: ClassifierModelConfig,
}

impl OnnxSketchModel {
    /// Load the model and labels named in `config`.
    ///
    /// Returns error if either file is missing or the model cannot be loaded.
    pub fn load(config: ClassifierModelConfig) -> ClassifyResult<Self> {
        if !config.model_path.exists() {
            return Err(ClassifierError::model_not_found(
                config.model_path.display().to_string(),
            ));
        }
        if !config.labels_path.exists() {
            return Err(ClassifierError::model_not_found(
                config.labels_path.display().to_string(),
            ));
        }

        let labels = parse_labels(&std::fs::read_to_string(&config.labels_path)?)?;
        let model_bytes = std::fs::read(&config.model_path)?;
        let session = create_session(&model_bytes)?;

        info!(
            model_path = %config.model_path.display(),
            labels = labels.len(),
            "Sketch classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            config,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn run_inference(&self, input: Value) -> ClassifyResult<Vec<f32>> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::inference("Session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ClassifierError::inference(format!("ONNX inference failed: {}", e)))?;

        let output = outputs.get(self.config.output_name.as_str()).ok_or_else(|| {
            ClassifierError::inference(format!("Missing {} tensor", self.config.output_name))
        })?;

        let tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::inference(format!("Failed to extract tensor: {}", e)))?;

        Ok(tensor.1.iter().copied().collect())
    }
}

#[async_trait]
impl SketchModel for OnnxSketchModel {
    async fn predict(&self, input: &DrawingImage) -> ClassifyResult<Vec<Prediction>> {
        let (shape, data) = input_tensor(input, self.config.layout);
        let tensor = Tensor::from_array((shape, data.into_boxed_slice()))
            .map(Value::from)
            .map_err(|e| ClassifierError::inference(format!("Failed to create tensor: {}", e)))?;

        let scores = self.run_inference(tensor)?;
        let ranked = rank_top_k(&scores, &self.labels, self.config.top_k)?;

        debug!(
            top = ranked.first().map(|p| p.class_name.as_str()).unwrap_or(""),
            "Sketch classified"
        );
        Ok(ranked)
    }
}

fn create_session(model_bytes: &[u8]) -> ClassifyResult<Session> {
    Session::builder()
        .map_err(|e| ClassifierError::inference(format!("ORT session builder: {e}")))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ClassifierError::inference(format!("ORT opt level: {e}")))?
        .commit_from_memory(model_bytes)
        .map_err(|e| ClassifierError::inference(format!("ORT load model: {e}")))
}
