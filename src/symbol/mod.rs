//! Definition records and the normalizer that produces them

pub mod definition;
pub mod normalize;

pub use definition::{Definition, Param, encode_type, function_signature};
pub use normalize::{DropReason, Normalized, NormalizedDoc, PropertyTag, normalize};
