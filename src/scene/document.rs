use crate::foundation::error::{ConvertError, ConvertResult};
use crate::scene::model::Layer;
use crate::scene::timeline::AnimationTimeline;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const FORMAT_VERSION: u32 = 1;
pub const GENERATOR: &str = concat!("svg2shapeshifter ", env!("CARGO_PKG_VERSION"));

/// One complete animation: a single vector layer plus its timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    #[serde(
        rename = "generatedby",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_by: Option<String>,
    pub layers: Layers,
    pub timeline: Timeline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layers {
    #[serde(rename = "vectorLayer")]
    pub vector_layer: Layer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub animation: AnimationTimeline,
}

impl Document {
    pub fn new(layer: Layer, animation: AnimationTimeline) -> Self {
        Self {
            version: FORMAT_VERSION,
            generated_by: Some(GENERATOR.to_owned()),
            layers: Layers {
                vector_layer: layer,
            },
            timeline: Timeline { animation },
        }
    }

    pub fn layer(&self) -> &Layer {
        &self.layers.vector_layer
    }

    pub fn animation(&self) -> &AnimationTimeline {
        &self.timeline.animation
    }

    pub fn into_parts(self) -> (Layer, AnimationTimeline) {
        (self.layers.vector_layer, self.timeline.animation)
    }

    pub fn from_json_str(s: &str) -> ConvertResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ConvertError::document_format(format!("decode document JSON: {e}")))
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> ConvertResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ConvertError::document_format(format!("decode document JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ConvertError::document_format(format!("open document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f)).map_err(|e| match e {
            ConvertError::DocumentFormat(msg) => {
                ConvertError::document_format(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Pretty-printed JSON; absent optional fields are omitted.
    pub fn to_json_pretty(&self) -> ConvertResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConvertError::json(e.to_string()))
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> ConvertResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, self).map_err(|e| ConvertError::json(e.to_string()))?;
        w.flush()?;
        Ok(())
    }

    /// Check referential integrity: node identifiers are unique, every block targets an
    /// existing node, and every block has `start_time < end_time`.
    pub fn validate(&self) -> ConvertResult<()> {
        let mut ids = HashSet::new();
        let mut dup = None;
        for child in &self.layers.vector_layer.children {
            walk(child, &mut |id| {
                if !ids.insert(id.to_owned()) && dup.is_none() {
                    dup = Some(id.to_owned());
                }
            });
        }
        if let Some(id) = dup {
            return Err(ConvertError::document_format(format!(
                "duplicate node identifier '{id}'"
            )));
        }

        let animation = &self.timeline.animation;
        animation.validate()?;
        for b in animation.blocks() {
            if !ids.contains(&b.layer_id) {
                return Err(ConvertError::document_format(format!(
                    "timeline block '{}' targets unknown shape '{}'",
                    b.id, b.layer_id
                )));
            }
        }
        Ok(())
    }
}

fn walk(node: &crate::scene::model::Node, f: &mut impl FnMut(&str)) {
    f(node.id());
    if let Some(g) = node.as_group() {
        for child in &g.children {
            walk(child, f);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
