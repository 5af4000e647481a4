pub mod augment;
pub mod bbox;
pub mod box_mask;
pub mod error;
pub mod interval;
pub mod json_parser;
pub mod json_structs;
pub mod numeric;
pub mod sampler;

pub mod prelude;

pub use augment::{Augment, KeySet, SampleSet, VolumeSet};
pub use box_mask::{BoxMaskAugmenter, BoxMaskConfig, MaskStats};
pub use error::AugmentError;
