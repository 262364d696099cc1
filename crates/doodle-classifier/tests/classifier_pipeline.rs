//! Classifier pipeline tests with an in-process model.

use std::sync::Mutex;

use async_trait::async_trait;

use doodle_classifier::{
    rank_top_k, ClassifierError, ClassifierPipeline, ClassifyResult, Prediction, SketchModel,
};
use doodle_media::DrawingImage;

/// Scores fixed per label and remembers every input it saw.
struct FixedScoresModel {
    labels: Vec<String>,
    scores: Vec<f32>,
    inputs: Mutex<Vec<DrawingImage>>,
}

impl FixedScoresModel {
    fn new(pairs: &[(&str, f32)]) -> Self {
        Self {
            labels: pairs.iter().map(|(l, _)| l.to_string()).collect(),
            scores: pairs.iter().map(|(_, s)| *s).collect(),
            inputs: Mutex::new(Vec::new()),
        }
    }

    fn inputs(&self) -> Vec<DrawingImage> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SketchModel for FixedScoresModel {
    async fn predict(&self, input: &DrawingImage) -> ClassifyResult<Vec<Prediction>> {
        self.inputs.lock().unwrap().push(input.clone());
        rank_top_k(&self.scores, &self.labels, 5)
    }
}

struct BrokenModel;

#[async_trait]
impl SketchModel for BrokenModel {
    async fn predict(&self, _input: &DrawingImage) -> ClassifyResult<Vec<Prediction>> {
        Err(ClassifierError::inference("session crashed"))
    }
}

#[tokio::test]
async fn test_ranked_labels_verbatim() {
    let model = FixedScoresModel::new(&[
        ("cat", 0.02),
        ("sun", 0.70),
        ("tree", 0.01),
        ("house", 0.15),
        ("apple", 0.08),
        ("car", 0.04),
    ]);
    let pipeline = ClassifierPipeline::new(model);

    let canvas = DrawingImage::filled(300, 300, [255, 255, 255, 255]);
    let result = pipeline.analyze(&canvas).await.unwrap();

    assert_eq!(result.guesses, vec!["sun", "house", "apple", "car", "cat"]);
    assert_eq!(result.top(), Some("sun"));
}

#[tokio::test]
async fn test_model_receives_inverted_28x28() {
    let pipeline = ClassifierPipeline::new(FixedScoresModel::new(&[("sun", 1.0)]));

    let canvas = DrawingImage::filled(28, 28, [0, 0, 0, 255]);
    pipeline.analyze(&canvas).await.unwrap();

    let inputs = pipeline.model().inputs();
    assert_eq!(inputs.len(), 1);
    assert_eq!((inputs[0].width(), inputs[0].height()), (28, 28));
    assert!(inputs[0].pixels().all(|px| px == [255, 255, 255, 255]));
}

#[tokio::test]
async fn test_model_reused_until_shutdown() {
    let pipeline = ClassifierPipeline::new(FixedScoresModel::new(&[("sun", 1.0)]));
    let canvas = DrawingImage::filled(56, 56, [10, 10, 10, 255]);

    pipeline.analyze(&canvas).await.unwrap();
    pipeline.analyze(&canvas).await.unwrap();

    let model = pipeline.shutdown();
    assert_eq!(model.inputs().len(), 2);
}

#[tokio::test]
async fn test_model_errors_propagate() {
    let pipeline = ClassifierPipeline::new(BrokenModel);
    let canvas = DrawingImage::filled(28, 28, [0, 0, 0, 255]);

    let err = pipeline.analyze(&canvas).await.unwrap_err();
    assert!(matches!(err, ClassifierError::Inference(_)));
}

#[tokio::test]
async fn test_empty_canvas_is_preprocess_error() {
    let pipeline = ClassifierPipeline::new(BrokenModel);
    let canvas = DrawingImage::new(0, 0, Vec::new()).unwrap();

    let err = pipeline.analyze(&canvas).await.unwrap_err();
    assert!(matches!(err, ClassifierError::Media(_)));
}
