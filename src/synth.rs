//! Timeline synthesis from a sequence of structurally identical frames.
//!
//! Shapes correspond across frames by their index inside the `fills` / `strokes` groups. Only every
//! `frame_interval`-th frame is compared with the frame `frame_interval` steps ahead; each compared
//! pair occupies one `time_interval` slot on the timeline, whether or not anything changed.

use crate::config::ConvertOpts;
use crate::extract::frame::{Frame, Role};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::foundation::ids::fresh_id;
use crate::scene::model::{Node, NodeKind, Path};
use crate::scene::timeline::{AnimationTimeline, BlockValue, TimelineBlock, TimelineProperty};

/// Output of [`synthesize`].
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// The static drawing: frame zero's shapes, whose identifiers the blocks target.
    pub frame_zero: Frame,
    pub timeline: AnimationTimeline,
    /// Shapes that could not be diffed for some pair; synthesis carried on without them.
    pub skipped: Vec<SkippedShape>,
}

/// A shape index that failed lookup while diffing one sampled pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShape {
    pub role: Role,
    pub index: usize,
    /// Start time of the pair being diffed.
    pub start_time: u64,
    pub failure: IndexLookupFailure,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexLookupFailure {
    #[error("frame {frame} has no shape at this index")]
    OutOfRange { frame: usize },
    #[error("frame {frame} holds a {kind:?} where a path is expected")]
    NotAPath { frame: usize, kind: NodeKind },
}

/// Timeline start for a sequence whose first frame is numbered `first_frame`.
///
/// Frame numbers of 10 and up are kept as a lead-in of `number * 10`; lower numbers start at 0.
pub fn base_time(first_frame: Option<u64>) -> u64 {
    match first_frame {
        Some(n) if n >= 10 => n.saturating_mul(10),
        _ => 0,
    }
}

#[tracing::instrument(skip(frames, opts), fields(frames = frames.len()))]
pub fn synthesize(
    frames: Vec<Frame>,
    start_time: u64,
    opts: &ConvertOpts,
) -> ConvertResult<Synthesis> {
    let Some(frame_zero) = frames.first() else {
        return Err(ConvertError::malformed("animation has no frames"));
    };

    let stride = opts.frame_interval();
    let step = opts.time_interval();
    let last = frames.len() - 1;

    let mut blocks = Vec::new();
    let mut skipped = Vec::new();
    let mut current_time = start_time;

    for index in (0..last).step_by(stride) {
        let next_index = index + stride;
        if next_index > last {
            break;
        }
        check_topology(frame_zero, &frames[index], index)?;
        check_topology(frame_zero, &frames[next_index], next_index)?;
        let end_time = current_time
            .checked_add(step)
            .ok_or(ConvertError::TimeOverflow {
                start: current_time,
                step,
            })?;

        let pair = Pair {
            anchor: frame_zero,
            current: (index, &frames[index]),
            next: (next_index, &frames[next_index]),
            start: current_time,
            end: end_time,
        };
        let before = blocks.len();
        for role in [Role::Fills, Role::Strokes] {
            for i in 0..frame_zero.role(role).len() {
                if let Err(failure) = pair.diff_shape(role, i, &mut blocks) {
                    tracing::warn!(role = role.tag(), index = i, %failure, "skipping shape");
                    skipped.push(SkippedShape {
                        role,
                        index: i,
                        start_time: current_time,
                        failure,
                    });
                }
            }
        }
        tracing::debug!(
            from = index,
            to = next_index,
            time = current_time,
            emitted = blocks.len() - before,
            "diffed frame pair"
        );

        current_time = end_time;
    }

    let timeline = AnimationTimeline::with_blocks(fresh_id(), blocks);
    tracing::info!(
        blocks = timeline.blocks().len(),
        duration = timeline.duration(),
        skipped = skipped.len(),
        "synthesized timeline"
    );

    let frame_zero = frames
        .into_iter()
        .next()
        .ok_or_else(|| ConvertError::malformed("animation has no frames"))?;
    Ok(Synthesis {
        frame_zero,
        timeline,
        skipped,
    })
}

fn check_topology(frame_zero: &Frame, frame: &Frame, index: usize) -> ConvertResult<()> {
    for role in [Role::Fills, Role::Strokes] {
        let expected = frame_zero.role(role).len();
        let found = frame.role(role).len();
        if expected != found {
            return Err(ConvertError::FrameMismatch {
                frame: index,
                role: role.tag(),
                expected,
                found,
            });
        }
    }
    Ok(())
}

struct Pair<'a> {
    anchor: &'a Frame,
    current: (usize, &'a Frame),
    next: (usize, &'a Frame),
    start: u64,
    end: u64,
}

impl Pair<'_> {
    fn diff_shape(
        &self,
        role: Role,
        i: usize,
        out: &mut Vec<TimelineBlock>,
    ) -> Result<(), IndexLookupFailure> {
        let target = lookup(self.anchor.role(role).children.get(i), 0)?;
        let cur = lookup(self.current.1.role(role).children.get(i), self.current.0)?;
        let next = lookup(self.next.1.role(role).children.get(i), self.next.0)?;

        if cur.path_data != next.path_data {
            out.push(self.block(
                target,
                TimelineProperty::PathData,
                Some(cur.path_data.as_str().into()),
                Some(next.path_data.as_str().into()),
            ));
        }

        let (color_prop, alpha_prop, cur_color, next_color, cur_alpha, next_alpha) = match role {
            Role::Fills => (
                TimelineProperty::FillColor,
                TimelineProperty::FillAlpha,
                &cur.fill_color,
                &next.fill_color,
                cur.fill_alpha,
                next.fill_alpha,
            ),
            Role::Strokes => (
                TimelineProperty::StrokeColor,
                TimelineProperty::StrokeAlpha,
                &cur.stroke_color,
                &next.stroke_color,
                cur.stroke_alpha,
                next.stroke_alpha,
            ),
        };

        if cur_color != next_color {
            out.push(self.block(
                target,
                color_prop,
                cur_color.clone().map(BlockValue::from),
                next_color.clone().map(BlockValue::from),
            ));
        }
        if cur_alpha != next_alpha {
            out.push(self.block(
                target,
                alpha_prop,
                cur_alpha.map(BlockValue::from),
                next_alpha.map(BlockValue::from),
            ));
        }
        Ok(())
    }

    fn block(
        &self,
        target: &Path,
        property: TimelineProperty,
        from: Option<BlockValue>,
        to: Option<BlockValue>,
    ) -> TimelineBlock {
        TimelineBlock::new(target.id.as_str(), property, self.start, self.end, from, to)
    }
}

fn lookup(node: Option<&Node>, frame: usize) -> Result<&Path, IndexLookupFailure> {
    match node {
        None => Err(IndexLookupFailure::OutOfRange { frame }),
        Some(Node::Path(p)) => Ok(p),
        Some(other) => Err(IndexLookupFailure::NotAPath {
            frame,
            kind: other.kind(),
        }),
    }
}

#[cfg(test)]
#[path = "../tests/unit/synth/synth.rs"]
mod tests;
