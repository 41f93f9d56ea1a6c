//! Convert frame-by-frame SVG exports (Blender Freestyle) into ShapeShifter keyframe animations,
//! and merge several animation documents into one.
//!
//! - [`convert_svg`] / [`convert_file`]: SVG frames -> [`Document`]
//! - [`merge_documents`] / [`merge_files`]: documents -> one [`Document`]
#![forbid(unsafe_code)]

mod foundation;

pub mod compose;
pub mod config;
pub mod extract;
pub mod merge;
pub mod scene;
pub mod synth;

pub use crate::foundation::error::{ConvertError, ConvertResult};
pub use crate::foundation::ids::{IdCounter, fresh_id};

pub use crate::compose::{
    Conversion, compose_animation, compose_static, convert_file, convert_svg, default_output_path,
};
pub use crate::config::ConvertOpts;
pub use crate::extract::attrs::AttrNode;
pub use crate::extract::frame::{Frame, Role, SourceDrawing};
pub use crate::merge::{MergeInput, merge_documents, merge_files};
pub use crate::scene::document::Document;
pub use crate::scene::model::{Group, Layer, Mask, Node, NodeKind, Path};
pub use crate::scene::timeline::{
    AnimationTimeline, BlockValue, Interpolator, TimelineBlock, TimelineProperty, ValueType,
};
pub use crate::synth::{IndexLookupFailure, SkippedShape, Synthesis, synthesize};
