//! Classifier pipeline over an explicitly owned model.
//!
//! The caller loads the model and hands it to [`ClassifierPipeline::new`];
//! the pipeline reuses it for every call until [`ClassifierPipeline::shutdown`]
//! gives it back. Errors propagate to the caller unchanged.

use tracing::{debug, info};

use doodle_media::{prepare_for_classifier, DrawingImage};
use doodle_models::ClassifierResult;

use crate::error::ClassifyResult;
use crate::model::SketchModel;

/// Ask-once classifier: preprocess, predict, report ranked labels.
pub struct ClassifierPipeline<M> {
    model: M,
}

impl<M: SketchModel> ClassifierPipeline<M> {
    /// Wrap an already loaded model.
    pub fn new(model: M) -> Self {
        info!("Classifier pipeline ready");
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Classify a canvas; labels come back in model rank order.
    pub async fn analyze(&self, canvas: &DrawingImage) -> ClassifyResult<ClassifierResult> {
        let input = prepare_for_classifier(canvas)?;
        let predictions = self.model.predict(&input).await?;

        debug!(
            width = canvas.width(),
            height = canvas.height(),
            labels = predictions.len(),
            "Canvas classified"
        );

        Ok(ClassifierResult::new(
            predictions.into_iter().map(|p| p.class_name).collect(),
        ))
    }

    /// Tear the pipeline down and hand the model back.
    pub fn shutdown(self) -> M {
        info!("Classifier pipeline shut down");
        self.model
    }
}

#[cfg(feature = "onnx")]
impl ClassifierPipeline<crate::onnx::OnnxSketchModel> {
    /// Load the ONNX model from `config` and wrap it.
    pub fn load(config: crate::model::ClassifierModelConfig) -> ClassifyResult<Self> {
        Ok(Self::new(crate::onnx::OnnxSketchModel::load(config)?))
    }
}
