use crate::foundation::error::{ConvertError, ConvertResult};
use std::collections::BTreeMap;
use usvg::roxmltree;

/// Element tree with raw string attributes, as handed over by the markup parser.
///
/// Only element nodes are kept; text, comments and processing instructions are dropped.
/// Attribute keys are local names (namespace prefixes stripped).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrNode {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<AttrNode>,
}

impl AttrNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: AttrNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// First direct child whose `id` equals `id`.
    pub fn child_by_id(&self, id: &str) -> Option<&AttrNode> {
        self.children.iter().find(|c| c.id() == Some(id))
    }

    /// First direct child with the given tag name.
    pub fn child_by_tag(&self, tag: &str) -> Option<&AttrNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Parse SVG markup and return its root element.
    pub fn parse_svg(text: &str) -> ConvertResult<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| ConvertError::malformed(format!("parse SVG markup: {e}")))?;
        Ok(Self::from_xml(doc.root_element()))
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        Self {
            tag: node.tag_name().name().to_owned(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_owned(), a.value().to_owned()))
                .collect(),
            children: node
                .children()
                .filter(|c| c.is_element())
                .map(Self::from_xml)
                .collect(),
        }
    }
}
