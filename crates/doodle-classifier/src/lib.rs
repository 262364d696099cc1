//! Pretrained sketch classifier pipeline.
//!
//! This crate provides:
//! - The [`SketchModel`] seam and top-k ranking
//! - An explicitly owned classifier pipeline (no global model state)
//! - An ONNX Runtime backed model behind the `onnx` feature

pub mod error;
pub mod model;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod pipeline;

pub use error::{ClassifierError, ClassifyResult};
pub use model::{
    parse_labels, rank_top_k, ClassifierModelConfig, Prediction, SketchModel, TensorLayout,
    DEFAULT_TOP_K,
};
#[cfg(feature = "onnx")]
pub use onnx::OnnxSketchModel;
pub use pipeline::ClassifierPipeline;
