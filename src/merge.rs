//! Combine several animation documents into one.
//!
//! Each input's top-level children are wrapped in a new group named after the input, every node
//! receives a new identifier from one [`IdCounter`], and the timeline blocks are retargeted in the
//! same walk before being appended. Timestamps are left untouched, so merged animations play side
//! by side at their original times.

use crate::compose::{LAYER_NAME, OUTPUT_EXTENSION};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::foundation::ids::IdCounter;
use crate::scene::document::Document;
use crate::scene::model::{Group, Layer, Node};
use crate::scene::timeline::{AnimationTimeline, TimelineBlock};
use std::collections::HashMap;
use std::path::Path;

/// One decoded merge input and the group name its shapes are filed under.
#[derive(Debug, Clone)]
pub struct MergeInput {
    pub name: String,
    pub document: Document,
}

impl MergeInput {
    pub fn new(name: impl Into<String>, document: Document) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        Ok(Self::new(group_name_for(path), Document::from_path(path)?))
    }
}

/// `dir/red-circle.shapeshifter` -> `red_circle`.
pub fn group_name_for(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{OUTPUT_EXTENSION}");
    let stem = file.strip_suffix(suffix.as_str()).unwrap_or(&file);
    stem.chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Decode every file, then merge. Any decode failure aborts before anything is merged.
pub fn merge_files<P: AsRef<Path>>(paths: &[P], ids: &mut IdCounter) -> ConvertResult<Document> {
    let inputs = paths
        .iter()
        .map(MergeInput::from_path)
        .collect::<ConvertResult<Vec<_>>>()?;
    merge_documents(inputs, ids)
}

#[tracing::instrument(skip_all, fields(inputs = inputs.len()))]
pub fn merge_documents(inputs: Vec<MergeInput>, ids: &mut IdCounter) -> ConvertResult<Document> {
    // The first document decides the canvas.
    let (width, height) = match inputs.first() {
        Some(first) => (first.document.layer().width, first.document.layer().height),
        None => return Err(ConvertError::document_format("no documents to merge")),
    };

    let mut groups = Vec::with_capacity(inputs.len());
    let mut blocks = Vec::new();

    for input in inputs {
        let (layer, animation) = input.document.into_parts();
        animation.validate()?;
        if (layer.width, layer.height) != (width, height) {
            tracing::warn!(
                name = %input.name,
                width = layer.width,
                height = layer.height,
                "canvas size differs from the first document, ignoring"
            );
        }

        // The wrapper starts out with the source layer's id so blocks aimed at the layer follow it.
        let mut group = Node::Group(Group::new(layer.id, input.name.as_str(), layer.children));
        let mut doc_blocks = animation.into_blocks();
        let retargeted = remap_ids(&mut group, &mut doc_blocks, ids);
        if retargeted != doc_blocks.len() {
            return Err(ConvertError::document_format(format!(
                "document '{}' has {} timeline blocks targeting unknown shapes",
                input.name,
                doc_blocks.len() - retargeted
            )));
        }
        tracing::debug!(name = %input.name, blocks = doc_blocks.len(), "merged document");

        groups.push(group);
        blocks.extend(doc_blocks);
    }

    let layer = Layer::new(ids.next_id(), LAYER_NAME, width, height, groups)?;
    let timeline = AnimationTimeline::with_blocks(ids.next_id(), blocks);
    tracing::info!(
        blocks = timeline.blocks().len(),
        duration = timeline.duration(),
        "merge complete"
    );
    Ok(Document::new(layer, timeline))
}

/// Reissue every identifier under `root` (pre-order) and retarget the blocks that pointed at the
/// old ones. Each block is retargeted at most once. Returns the number of retargeted blocks.
fn remap_ids(root: &mut Node, blocks: &mut [TimelineBlock], ids: &mut IdCounter) -> usize {
    let mut by_target: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, b) in blocks.iter().enumerate() {
        by_target.entry(b.layer_id.clone()).or_default().push(i);
    }

    let mut retargeted = 0;
    root.walk_mut(&mut |node| {
        let new_id = ids.next_id();
        let old_id = node.set_id(new_id.clone());
        if let Some(targets) = by_target.remove(&old_id) {
            for i in targets {
                blocks[i].layer_id = new_id.clone();
                retargeted += 1;
            }
        }
    });
    retargeted
}

#[cfg(test)]
#[path = "../tests/unit/merge/merge.rs"]
mod tests;
