//! Operators the engine dispatches to: the transform library and its
//! registry, the batch operator and the sequence matcher.

pub mod batch;
pub mod registry;
pub mod sequence;
pub mod transforms;

pub use batch::batch;
pub use registry::{DEFAULT_TRANSFORM, TransformRegistry, normalize_tag};
pub use sequence::{SequenceState, advance, sequence_state};
pub use transforms::TransformFn;
