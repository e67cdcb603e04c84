/// Document node model: the markdown-like AST the rewriter splices in place.
///
/// The tree is produced and owned by the host text-processing pipeline; the
/// crate receives a mutable reference and performs local splicing only.
/// Fields the rewriter never touches (source positions, custom data) are
/// carried through `extra` so a document round-trips losslessly.
use serde::{Deserialize, Serialize};

/// Node type tag for plain text nodes.
pub const TEXT: &str = "text";
/// Node type tag for link-reference nodes (the legacy symbol-link syntax).
pub const LINK_REFERENCE: &str = "linkReference";
/// Node type tag for resolved link nodes.
pub const LINK: &str = "link";

/// One node of the document tree. Only the fields the rewriter reads or
/// writes are modeled; everything else rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdNode {
    /// Node type tag ("root", "paragraph", "text", "linkReference", ...).
    #[serde(rename = "type")]
    pub node_type: String,
    /// Text content for text-bearing nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Raw label of a link-reference node (the `symbol|alias` string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Destination URL of a link node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tooltip title of a link node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Rendering data attached to produced link nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
    /// Ordered child nodes; absent for leaf nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MdNode>>,
    /// Host-pipeline fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Rendering metadata the downstream HTML stage picks up from link nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Element properties forwarded to the rendered anchor tag.
    #[serde(rename = "hProperties")]
    pub h_properties: HProperties,
}

/// Anchor-tag properties for a produced symbol link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HProperties {
    /// Space-separated style tags: base, then aliased, then missing.
    #[serde(rename = "className")]
    pub class_name: String,
    /// Marker attribute set only on links whose symbol did not resolve.
    #[serde(rename = "data-missing", default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<bool>,
    /// Link target window; produced links always open a new tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl MdNode {
    /// A bare node with the given type tag and no content.
    pub fn new(node_type: &str) -> Self {
        return Self {
            node_type: node_type.to_string(),
            value: None,
            label: None,
            url: None,
            title: None,
            data: None,
            children: None,
            extra: serde_json::Map::new(),
        };
    }

    /// A plain text node.
    pub fn text(value: impl Into<String>) -> Self {
        let mut node = Self::new(TEXT);
        node.value = Some(value.into());
        return node;
    }

    /// A link node with one text child carrying the display text.
    pub fn link(url: String, title: String, data: NodeData, display: String) -> Self {
        let mut node = Self::new(LINK);
        node.url = Some(url);
        node.title = Some(title);
        node.data = Some(data);
        node.children = Some(vec![Self::text(display)]);
        return node;
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        return self.node_type == TEXT;
    }

    /// Whether this is a link-reference node.
    pub fn is_link_reference(&self) -> bool {
        return self.node_type == LINK_REFERENCE;
    }

    /// The text value, or empty when this is not a text-bearing node.
    pub fn text_value(&self) -> &str {
        return self.value.as_deref().unwrap_or("");
    }
}
