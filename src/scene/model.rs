use crate::foundation::error::{ConvertError, ConvertResult};
use serde::{Deserialize, Serialize};

/// Layer type tag understood by the player.
pub const VECTOR_LAYER_TYPE: &str = "vector";

/// The animation canvas. A document holds exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default = "default_layer_type")]
    pub layer_type: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "one")]
    pub alpha: f64,
    #[serde(default)]
    pub children: Vec<Node>,
}

fn default_layer_type() -> String {
    VECTOR_LAYER_TYPE.to_owned()
}

fn one() -> f64 {
    1.0
}

impl Layer {
    /// Build a fully opaque vector layer. Zero dimensions are rejected.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width: u32,
        height: u32,
        children: Vec<Node>,
    ) -> ConvertResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConvertError::malformed(format!(
                "layer dimensions must be > 0 (got {width}x{height})"
            )));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            layer_type: default_layer_type(),
            width,
            height,
            alpha: 1.0,
            children,
        })
    }

    /// Visit every shape primitive under the layer, depth-first, in child order.
    pub fn visit_shapes<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        visit_shapes(&self.children, f);
    }

    pub fn collect_shapes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.visit_shapes(&mut |n| out.push(n));
        out
    }

    /// Find any node (group or shape) with the given identifier.
    pub fn find(&self, id: &str) -> Option<&Node> {
        find_in(&self.children, id)
    }
}

/// A layer child: a nestable group or a shape primitive, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Group(Group),
    Path(Path),
    Mask(Mask),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Path,
    Mask,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Group(_) => NodeKind::Group,
            Node::Path(_) => NodeKind::Path,
            Node::Mask(_) => NodeKind::Mask,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Group(g) => &g.id,
            Node::Path(p) => &p.id,
            Node::Mask(m) => &m.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Group(g) => &g.name,
            Node::Path(p) => &p.name,
            Node::Mask(m) => &m.name,
        }
    }

    /// Replace the identifier, returning the previous one.
    pub fn set_id(&mut self, id: String) -> String {
        let slot = match self {
            Node::Group(g) => &mut g.id,
            Node::Path(p) => &mut p.id,
            Node::Mask(m) => &mut m.id,
        };
        std::mem::replace(slot, id)
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Node::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Depth-first pre-order walk: this node first, then each child in order.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        if let Node::Group(g) = self {
            for child in &mut g.children {
                child.walk_mut(f);
            }
        }
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Group(g)
    }
}

impl From<Path> for Node {
    fn from(p: Path) -> Self {
        Node::Path(p)
    }
}

impl From<Mask> for Node {
    fn from(m: Mask) -> Self {
        Node::Mask(m)
    }
}

/// Named, ordered container. Child order is the cross-frame correspondence key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    #[serde(default)]
    pub pivot_x: i32,
    #[serde(default)]
    pub pivot_y: i32,
    #[serde(default)]
    pub translate_x: i32,
    #[serde(default)]
    pub translate_y: i32,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Group {
    /// Group with an identity transform.
    pub fn new(id: impl Into<String>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rotation: 0,
            scale_x: 1.0,
            scale_y: 1.0,
            pivot_x: 0,
            pivot_y: 0,
            translate_x: 0,
            translate_y: 0,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn visit_shapes<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        visit_shapes(&self.children, f);
    }

    pub fn collect_shapes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.visit_shapes(&mut |n| out.push(n));
        out
    }
}

/// A stroked and/or filled path. Absent attributes stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub id: String,
    pub name: String,
    pub path_data: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_alpha: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_line_cap: Option<LineCap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_line_join: Option<LineJoin>,
    // Older documents carry the misspelled key.
    #[serde(
        default,
        alias = "strokeMitterLimit",
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_miter_limit: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_path_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_path_end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_path_offset: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_type: Option<FillType>,
}

impl Path {
    /// Path with geometry only; every optional attribute is absent.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        path_data: impl Into<String>,
    ) -> ConvertResult<Self> {
        let id = id.into();
        let path_data = required_geometry(&id, path_data.into())?;
        Ok(Self {
            id,
            name: name.into(),
            path_data,
            fill_color: None,
            fill_alpha: None,
            stroke_color: None,
            stroke_width: None,
            stroke_alpha: None,
            stroke_line_cap: None,
            stroke_line_join: None,
            stroke_miter_limit: None,
            trim_path_start: None,
            trim_path_end: None,
            trim_path_offset: None,
            fill_type: None,
        })
    }
}

/// Clip geometry. Carries nothing but its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mask {
    pub id: String,
    pub name: String,
    pub path_data: String,
}

impl Mask {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        path_data: impl Into<String>,
    ) -> ConvertResult<Self> {
        let id = id.into();
        let path_data = required_geometry(&id, path_data.into())?;
        Ok(Self {
            id,
            name: name.into(),
            path_data,
        })
    }
}

fn required_geometry(id: &str, path_data: String) -> ConvertResult<String> {
    if path_data.trim().is_empty() {
        return Err(ConvertError::malformed(format!(
            "shape '{id}' has empty path data"
        )));
    }
    Ok(path_data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillType {
    #[serde(rename = "nonZero")]
    NonZero,
    #[serde(rename = "evenOdd")]
    EvenOdd,
}

pub(crate) fn visit_shapes<'a>(nodes: &'a [Node], f: &mut impl FnMut(&'a Node)) {
    for node in nodes {
        match node {
            Node::Group(g) => visit_shapes(&g.children, f),
            Node::Path(_) | Node::Mask(_) => f(node),
        }
    }
}

fn find_in<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Group(g) = node {
            if let Some(found) = find_in(&g.children, id) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
