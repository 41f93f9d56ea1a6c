use crate::config::ConvertOpts;
use crate::extract::attrs::AttrNode;
use crate::extract::frame::{
    FRAME_PREFIX, Frame, SourceDrawing, extract_frame, frame_number,
};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::foundation::ids::fresh_id;
use crate::scene::document::Document;
use crate::scene::model::Layer;
use crate::scene::timeline::AnimationTimeline;
use crate::synth::{SkippedShape, base_time, synthesize};
use std::path::{Path, PathBuf};

pub const LAYER_NAME: &str = "vector";
pub const OUTPUT_EXTENSION: &str = "shapeshifter";

/// A composed document plus the shapes the synthesizer had to leave out.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: Document,
    pub skipped: Vec<SkippedShape>,
}

/// Frame zero becomes the static drawing; the timeline animates its shapes.
pub fn compose_animation(
    width: u32,
    height: u32,
    frame_zero: Frame,
    timeline: AnimationTimeline,
) -> ConvertResult<Document> {
    let layer = Layer::new(fresh_id(), LAYER_NAME, width, height, frame_zero.into_nodes())?;
    Ok(Document::new(layer, timeline))
}

/// A non-animated drawing with an empty timeline.
pub fn compose_static(width: u32, height: u32, frame: Frame) -> ConvertResult<Document> {
    compose_animation(width, height, frame, AnimationTimeline::new(fresh_id()))
}

pub fn convert_drawing(drawing: &SourceDrawing, opts: &ConvertOpts) -> ConvertResult<Conversion> {
    if !drawing.is_multi_frame() {
        let frame = extract_frame(&drawing.render_layer)?;
        tracing::info!(
            fills = frame.fills.len(),
            strokes = frame.strokes.len(),
            "converting single frame"
        );
        return Ok(Conversion {
            document: compose_static(drawing.width, drawing.height, frame)?,
            skipped: Vec::new(),
        });
    }

    let frame_nodes: Vec<&AttrNode> = drawing
        .render_layer
        .children
        .iter()
        .filter(|c| c.id().is_some_and(|id| id.starts_with(FRAME_PREFIX)))
        .collect();
    let first = frame_nodes[0];
    let number = frame_number(first);
    if number.is_none() {
        tracing::warn!(id = ?first.id(), "first frame id has no numeric suffix, starting at 0");
    }

    let frames = frame_nodes
        .iter()
        .map(|n| extract_frame(n))
        .collect::<ConvertResult<Vec<_>>>()?;
    tracing::info!(frames = frames.len(), "converting animation");

    let synthesis = synthesize(frames, base_time(number), opts)?;
    Ok(Conversion {
        document: compose_animation(
            drawing.width,
            drawing.height,
            synthesis.frame_zero,
            synthesis.timeline,
        )?,
        skipped: synthesis.skipped,
    })
}

pub fn convert_svg(text: &str, opts: &ConvertOpts) -> ConvertResult<Conversion> {
    let root = AttrNode::parse_svg(text)?;
    let drawing = SourceDrawing::from_root(&root)?;
    convert_drawing(&drawing, opts)
}

pub fn convert_file(path: impl AsRef<Path>, opts: &ConvertOpts) -> ConvertResult<Conversion> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        ConvertError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
    })?;
    convert_svg(&text, opts)
}

/// `dir/name.svg` -> `dir/name.shapeshifter`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}
