use crate::extract::attrs::AttrNode;
use crate::extract::color::convert_color;
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::foundation::ids::fresh_id;
use crate::scene::model::{FillType, Group, LineCap, LineJoin, Node, Path};

pub const FILLS: &str = "fills";
pub const STROKES: &str = "strokes";
pub const FRAME_PREFIX: &str = "frame_";

/// Shapes of one sampled frame, split by role.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub fills: Group,
    pub strokes: Group,
}

impl Frame {
    pub fn role(&self, role: Role) -> &Group {
        match role {
            Role::Fills => &self.fills,
            Role::Strokes => &self.strokes,
        }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        vec![self.fills.into(), self.strokes.into()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Fills,
    Strokes,
}

impl Role {
    pub fn tag(self) -> &'static str {
        match self {
            Role::Fills => FILLS,
            Role::Strokes => STROKES,
        }
    }
}

/// The parts of a Blender Freestyle SVG the converter needs.
#[derive(Debug, Clone)]
pub struct SourceDrawing {
    pub width: u32,
    pub height: u32,
    /// First `<g>` under the root: either frame groups or a single fills/strokes pair.
    pub render_layer: AttrNode,
}

impl SourceDrawing {
    pub fn from_root(root: &AttrNode) -> ConvertResult<Self> {
        let width = dimension(root, "width")?;
        let height = dimension(root, "height")?;
        let render_layer = root
            .child_by_tag("g")
            .cloned()
            .ok_or_else(|| ConvertError::malformed("SVG has no render layer group"))?;
        Ok(Self {
            width,
            height,
            render_layer,
        })
    }

    pub fn is_multi_frame(&self) -> bool {
        is_multi_frame(&self.render_layer)
    }
}

fn dimension(root: &AttrNode, key: &str) -> ConvertResult<u32> {
    let raw = root
        .attr(key)
        .ok_or_else(|| ConvertError::malformed(format!("SVG root is missing '{key}'")))?;
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed);
    trimmed
        .parse::<u32>()
        .map_err(|_| ConvertError::malformed(format!("SVG root '{key}' is not an integer: {raw:?}")))
}

/// More than one direct child tagged as a keyframe container.
pub fn is_multi_frame(node: &AttrNode) -> bool {
    node.children
        .iter()
        .filter(|c| c.id().is_some_and(|id| id.starts_with(FRAME_PREFIX)))
        .count()
        > 1
}

/// Numeric suffix of a `frame_NNNN` container id.
pub fn frame_number(node: &AttrNode) -> Option<u64> {
    node.id()?.strip_prefix(FRAME_PREFIX)?.parse().ok()
}

pub fn extract_frame(node: &AttrNode) -> ConvertResult<Frame> {
    Ok(Frame {
        fills: extract_role(Role::Fills, node)?,
        strokes: extract_role(Role::Strokes, node)?,
    })
}

/// Map the children of the first `id == role` group to paths named `{role}-{index}`.
/// A missing role group yields an empty group.
pub fn extract_role(role: Role, node: &AttrNode) -> ConvertResult<Group> {
    let tag = role.tag();
    let children = match node.child_by_id(tag) {
        Some(src) => src
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| extract_path(fresh_id(), format!("{tag}-{i}"), c).map(Node::from))
            .collect::<ConvertResult<Vec<_>>>()?,
        None => Vec::new(),
    };
    Ok(Group::new(fresh_id(), tag, children))
}

pub fn extract_path(id: String, name: String, src: &AttrNode) -> ConvertResult<Path> {
    let d = src
        .attr("d")
        .ok_or_else(|| ConvertError::malformed(format!("shape '{name}' has no 'd' attribute")))?;
    let mut path = Path::new(id, name.as_str(), d)?;

    path.fill_color = src.attr("fill").and_then(convert_color);
    path.fill_alpha = number(src, "fill-opacity");

    path.stroke_color = src.attr("stroke").and_then(convert_color);
    path.stroke_width = number(src, "stroke-width");
    path.stroke_alpha = number(src, "stroke-opacity");
    path.stroke_line_cap = src
        .attr("stroke-linecap")
        .map(|v| line_cap(&name, v))
        .transpose()?;
    path.stroke_line_join = src
        .attr("stroke-linejoin")
        .map(|v| line_join(&name, v))
        .transpose()?;
    path.stroke_miter_limit = src
        .attr("stroke-miterlimit")
        .and_then(|v| v.trim().parse().ok());

    // Blender writes `fill_rule`; accept the standard spelling as well.
    path.fill_type = src
        .attr("fill_rule")
        .or_else(|| src.attr("fill-rule"))
        .and_then(fill_type);

    Ok(path)
}

/// Finite numbers only: `NaN` and infinities have no JSON representation.
fn number(src: &AttrNode, key: &str) -> Option<f64> {
    src.attr(key)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn line_cap(name: &str, v: &str) -> ConvertResult<LineCap> {
    match v.trim().to_ascii_lowercase().as_str() {
        "butt" => Ok(LineCap::Butt),
        "square" => Ok(LineCap::Square),
        "round" => Ok(LineCap::Round),
        _ => Err(ConvertError::malformed(format!(
            "shape '{name}' has unknown stroke-linecap {v:?}"
        ))),
    }
}

fn line_join(name: &str, v: &str) -> ConvertResult<LineJoin> {
    match v.trim().to_ascii_lowercase().as_str() {
        // Freestyle's exporter misspells miter.
        "miter" | "mitter" => Ok(LineJoin::Miter),
        "round" => Ok(LineJoin::Round),
        "bevel" => Ok(LineJoin::Bevel),
        _ => Err(ConvertError::malformed(format!(
            "shape '{name}' has unknown stroke-linejoin {v:?}"
        ))),
    }
}

fn fill_type(v: &str) -> Option<FillType> {
    match v.trim() {
        "nonZero" | "nonzero" => Some(FillType::NonZero),
        "evenOdd" | "evenodd" => Some(FillType::EvenOdd),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/frame.rs"]
mod tests;
