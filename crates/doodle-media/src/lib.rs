//! Drawing decode and preprocessing.
//!
//! This crate provides:
//! - A plain RGBA drawing buffer
//! - Base64 data-URI parsing and validation
//! - Grayscale + contrast simplification for the generative model
//! - 28x28 inverted input for the sketch classifier

pub mod classifier_input;
pub mod data_uri;
pub mod drawing;
pub mod error;
pub mod simplify;

pub use classifier_input::{prepare_for_classifier, CLASSIFIER_INPUT_SIZE};
pub use data_uri::{validate_image_data_uri, DataUri, ImageMime, MIN_PAYLOAD_LEN};
pub use drawing::DrawingImage;
pub use error::{MediaError, MediaResult};
pub use simplify::{contrast_in_place, grayscale_in_place, simplify_data_uri, CONTRAST_FACTOR};
