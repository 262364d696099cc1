//! Classifier model seam and the model-independent pieces of inference.

use std::path::PathBuf;

use async_trait::async_trait;

use doodle_media::DrawingImage;

use crate::error::{ClassifierError, ClassifyResult};

/// Number of labels the QuickDraw model reports.
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked label with its model score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub score: f32,
}

/// Pretrained sketch classifier.
///
/// Receives the already preprocessed 28x28 canvas and returns labels
/// most likely first.
#[async_trait]
pub trait SketchModel: Send + Sync {
    async fn predict(&self, input: &DrawingImage) -> ClassifyResult<Vec<Prediction>>;
}

/// Memory order of the model's input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TensorLayout {
    /// `[1, 28, 28, 1]`, the Keras export of the QuickDraw model
    #[default]
    Nhwc,
    /// `[1, 1, 28, 28]`
    Nchw,
}

impl std::str::FromStr for TensorLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nhwc" => Ok(TensorLayout::Nhwc),
            "nchw" => Ok(TensorLayout::Nchw),
            other => Err(format!("unknown tensor layout '{other}'")),
        }
    }
}

/// Configuration for the ONNX sketch model.
#[derive(Debug, Clone)]
pub struct ClassifierModelConfig {
    /// Path to ONNX model file
    pub model_path: PathBuf,
    /// Newline-separated class names, in model output order
    pub labels_path: PathBuf,
    /// Name of the score output tensor
    pub output_name: String,
    pub layout: TensorLayout,
    /// How many labels to report
    pub top_k: usize,
}

impl Default for ClassifierModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/quickdraw/quickdraw.onnx"),
            labels_path: PathBuf::from("models/quickdraw/labels.txt"),
            output_name: "output".to_string(),
            layout: TensorLayout::Nhwc,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Parse a labels file: one class name per line, blank lines skipped.
pub fn parse_labels(text: &str) -> ClassifyResult<Vec<String>> {
    let labels: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        return Err(ClassifierError::invalid_labels("labels file is empty"));
    }
    Ok(labels)
}

/// Flatten a grayscale canvas into a `[0, 1]` float tensor.
///
/// Returns the tensor shape and data. Only the red channel is read since
/// the preprocessed canvas is gray.
pub fn input_tensor(input: &DrawingImage, layout: TensorLayout) -> (Vec<usize>, Vec<f32>) {
    let (w, h) = (input.width() as usize, input.height() as usize);
    let data = input.pixels().map(|px| px[0] as f32 / 255.0).collect();

    let shape = match layout {
        TensorLayout::Nhwc => vec![1, h, w, 1],
        TensorLayout::Nchw => vec![1, 1, h, w],
    };
    (shape, data)
}

/// Pair scores with labels and keep the `k` best, highest first.
pub fn rank_top_k(scores: &[f32], labels: &[String], k: usize) -> ClassifyResult<Vec<Prediction>> {
    if scores.len() != labels.len() {
        return Err(ClassifierError::inference(format!(
            "Unexpected output size: expected {}, got {}",
            labels.len(),
            scores.len()
        )));
    }

    let mut ranked: Vec<Prediction> = scores
        .iter()
        .zip(labels)
        .map(|(&score, label)| Prediction {
            class_name: label.clone(),
            score,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);
    Ok(ranked)
}
