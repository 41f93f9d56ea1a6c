use crate::foundation::error::{ConvertError, ConvertResult};
use crate::foundation::ids::fresh_id;
use serde::{Deserialize, Serialize};

/// Duration reported by a timeline that has no blocks.
pub const DEFAULT_DURATION: u64 = 300;
pub const DEFAULT_TIMELINE_NAME: &str = "anim";

/// Ordered list of timed property changes.
///
/// `duration` is always `max(end_time)` over the blocks (or [`DEFAULT_DURATION`] when empty);
/// it is recomputed on every mutation and on decode, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnimationTimelineDef")]
pub struct AnimationTimeline {
    pub id: String,
    pub name: String,
    duration: u64,
    blocks: Vec<TimelineBlock>,
}

#[derive(Deserialize)]
struct AnimationTimelineDef {
    id: String,
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    blocks: Vec<TimelineBlock>,
}

fn default_name() -> String {
    DEFAULT_TIMELINE_NAME.to_owned()
}

impl From<AnimationTimelineDef> for AnimationTimeline {
    fn from(def: AnimationTimelineDef) -> Self {
        let mut t = Self {
            id: def.id,
            name: def.name,
            duration: DEFAULT_DURATION,
            blocks: def.blocks,
        };
        t.fix_duration();
        t
    }
}

impl AnimationTimeline {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: default_name(),
            duration: DEFAULT_DURATION,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(id: impl Into<String>, blocks: Vec<TimelineBlock>) -> Self {
        let mut t = Self::new(id);
        t.extend(blocks);
        t
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn blocks(&self) -> &[TimelineBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<TimelineBlock> {
        self.blocks
    }

    pub fn push(&mut self, block: TimelineBlock) {
        self.blocks.push(block);
        self.fix_duration();
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = TimelineBlock>) {
        self.blocks.extend(blocks);
        self.fix_duration();
    }

    fn fix_duration(&mut self) {
        self.duration = self
            .blocks
            .iter()
            .map(|b| b.end_time)
            .max()
            .unwrap_or(DEFAULT_DURATION);
    }

    /// Check per-block timing: every block must satisfy `start_time < end_time`.
    pub fn validate(&self) -> ConvertResult<()> {
        for b in &self.blocks {
            if b.start_time >= b.end_time {
                return Err(ConvertError::document_format(format!(
                    "timeline block '{}' has start {} >= end {}",
                    b.id, b.start_time, b.end_time
                )));
            }
        }
        Ok(())
    }
}

/// One timed single-property change on one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBlock {
    pub id: String,
    /// Identifier of the animated shape (not of the layer, despite the name).
    pub layer_id: String,
    pub property_name: TimelineProperty,
    pub start_time: u64,
    pub end_time: u64,
    #[serde(default)]
    pub interpolator: Interpolator,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_value: Option<BlockValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_value: Option<BlockValue>,
}

impl TimelineBlock {
    /// Linear block over `[start_time, end_time)` with a fresh identifier.
    /// The value type follows from the property.
    pub fn new(
        layer_id: impl Into<String>,
        property_name: TimelineProperty,
        start_time: u64,
        end_time: u64,
        from_value: Option<BlockValue>,
        to_value: Option<BlockValue>,
    ) -> Self {
        Self {
            id: fresh_id(),
            layer_id: layer_id.into(),
            property_name,
            start_time,
            end_time,
            interpolator: Interpolator::Linear,
            value_type: property_name.value_type(),
            from_value,
            to_value,
        }
    }
}

/// Animatable properties known to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimelineProperty {
    // group properties
    Rotation,
    ScaleX,
    ScaleY,
    PivotX,
    PivotY,
    TranslateX,
    TranslateY,

    // path properties
    PathData,
    FillColor,
    FillAlpha,
    StrokeColor,
    StrokeAlpha,
    StrokeWidth,
    TrimPathStart,
    TrimPathEnd,
    TrimPathOffset,
}

impl TimelineProperty {
    pub fn value_type(self) -> ValueType {
        match self {
            Self::PathData => ValueType::Path,
            Self::FillColor | Self::StrokeColor => ValueType::Color,
            _ => ValueType::Number,
        }
    }
}

/// Dynamic type of a block's `fromValue`/`toValue` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Path,
    Color,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockValue {
    Number(f64),
    Text(String),
}

impl From<f64> for BlockValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for BlockValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for BlockValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interpolator {
    FastOutSlowIn,
    FastOutLinearIn,
    LinearOutSlowIn,
    AccelerateDecelerate,
    Accelerate,
    Decelerate,
    #[default]
    Linear,
    Anticipate,
    Overshoot,
    Bounce,
    AnticipateOvershoot,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
