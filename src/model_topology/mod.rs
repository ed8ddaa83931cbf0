//! Layer-by-layer description of the emotion CNN.
//!
//! Training happens elsewhere; this module only records the topology the
//! exported artifacts were trained with, so loaded models can be checked
//! against it and inference engines know the exact op sequence and shapes.

pub mod layer;
pub mod topology;
