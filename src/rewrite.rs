/// Text-span rewriting: find symbol-link syntax in a document tree and
/// splice in resolved link nodes.
///
/// Two syntaxes denote the same concept and are handled by independent
/// matchers dispatched on node type:
///
/// 1. reference-node syntax — a `linkReference` node sandwiched between a
///    text node ending in `[` and a text node starting with `]` (older
///    markdown parsers emit `[[Engine]]` this way);
/// 2. inline-bracket syntax — literal `[[Engine|the engine]]` occurrences
///    inside a single text node (newer parsers leave the brackets alone).
use regex::Regex;

use crate::diagnostics;
use crate::index::{SymbolIndex, build_symbol_index};
use crate::link::generate_link;
use crate::mdast::{HProperties, MdNode, NodeData};
use crate::types::Options;

/// Matches one `[[symbol]]` or `[[symbol|alias]]` occurrence.
const INLINE_PATTERN: &str = r"\[\[([^\[\]]+)\]\]";

/// A transformer session: the symbol index is built once from the options
/// and shared read-only across every document passed to [`transform`].
///
/// [`transform`]: LinkTransformer::transform
pub struct LinkTransformer {
    /// Symbol expression lookup built from the documentation model.
    index: SymbolIndex,
    /// Presentation and resolution configuration.
    options: Options,
    /// Compiled inline-bracket matcher.
    inline: Regex,
}

/// Plugin-style factory: take the configuration, return the tree transform.
pub fn transformer(options: Options) -> LinkTransformer {
    return LinkTransformer::new(options);
}

impl LinkTransformer {
    /// Build the symbol index and compile the inline matcher.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded inline regex is invalid (compile-time
    /// invariant).
    #[allow(clippy::expect_used, reason = "hardcoded pattern, cannot fail at runtime")]
    pub fn new(options: Options) -> Self {
        let index = build_symbol_index(options.reflection.as_ref(), &options.profile);
        let inline = Regex::new(INLINE_PATTERN).expect("valid inline pattern");
        return Self { index, options, inline };
    }

    /// Read-only view of the symbol index, shared across documents.
    pub fn index(&self) -> &SymbolIndex {
        return &self.index;
    }

    /// Resolve one symbol expression with this session's configuration.
    pub fn resolve(&self, expression: &str) -> Option<String> {
        return generate_link(
            expression,
            &self.options.base_path,
            &self.index,
            &self.options.profile,
            self.options.fold_case,
        );
    }

    /// Rewrite every symbol reference in the tree, in place. Documents with
    /// no symbol-link syntax come back structurally unchanged, and running
    /// the transform again on its own output is a no-op.
    pub fn transform(&self, tree: &mut MdNode) {
        self.walk(tree);
    }

    /// Depth-first walk. Children are recursed into before this node's
    /// child vector is spliced, so rewrites at a shallow level never hide
    /// nested occurrences.
    fn walk(&self, node: &mut MdNode) {
        let Some(children) = node.children.as_mut() else {
            return;
        };
        for child in children.iter_mut() {
            self.walk(child);
        }
        self.rewrite_children(children);
    }

    /// Scan one sibling list for both syntaxes and splice matches.
    fn rewrite_children(&self, children: &mut Vec<MdNode>) {
        let mut i = 0;
        while i < children.len() {
            if self.try_reference_syntax(children, i) {
                // Continue at the following text node: it may still hold
                // the opening bracket of another reference.
                i += 1;
                continue;
            }
            if let Some(replacement) = self.try_inline_syntax(children.get(i)) {
                let produced = replacement.len();
                let _ = children.splice(i..=i, replacement);
                i += produced;
                continue;
            }
            i += 1;
        }
    }

    /// Matcher for reference-node syntax. Returns true when the node at `i`
    /// was replaced by a link; the neighbours lose their bracket characters.
    ///
    /// Guards: any missing label, missing neighbour, non-text neighbour, or
    /// absent bracket character leaves the span completely untouched.
    fn try_reference_syntax(&self, children: &mut [MdNode], i: usize) -> bool {
        let Some(node) = children.get(i) else {
            return false;
        };
        if !node.is_link_reference() {
            return false;
        }
        let Some(label) = node.label.clone().filter(|l| !l.is_empty()) else {
            return false;
        };

        let Some(prev_index) = i.checked_sub(1) else {
            return false;
        };
        let prev_ok = children
            .get(prev_index)
            .is_some_and(|prev| prev.is_text() && prev.text_value().ends_with('['));
        let next_ok = children
            .get(i + 1)
            .is_some_and(|next| next.is_text() && next.text_value().starts_with(']'));
        if !prev_ok || !next_ok {
            return false;
        }

        let link = self.make_symbol_link(&label);

        if let Some(prev) = children.get_mut(prev_index)
            && let Some(value) = prev.value.as_mut()
        {
            value.pop();
        }
        if let Some(slot) = children.get_mut(i) {
            *slot = link;
        }
        if let Some(next) = children.get_mut(i + 1)
            && let Some(value) = next.value.as_mut()
        {
            *value = value.chars().skip(1).collect();
        }

        return true;
    }

    /// Matcher for inline-bracket syntax. Returns the replacement node list
    /// when the text node at `node` holds at least one `[[...]]` occurrence:
    /// each match becomes a before-text/link/after-text triple, with empty
    /// text segments dropped.
    fn try_inline_syntax(&self, node: Option<&MdNode>) -> Option<Vec<MdNode>> {
        let node = node?;
        if !node.is_text() {
            return None;
        }
        let value = node.value.as_deref()?;

        let mut out: Vec<MdNode> = Vec::new();
        let mut last = 0;
        for captures in self.inline.captures_iter(value) {
            let whole = captures.get(0)?;
            let label = captures.get(1)?.as_str();

            if let Some(before) = value.get(last..whole.start())
                && !before.is_empty()
            {
                out.push(MdNode::text(before));
            }
            out.push(self.make_symbol_link(label));
            last = whole.end();
        }

        if out.is_empty() {
            return None;
        }
        if let Some(after) = value.get(last..)
            && !after.is_empty()
        {
            out.push(MdNode::text(after));
        }
        return Some(out);
    }

    /// Build the link node for one raw `symbol|alias` label.
    ///
    /// Resolution failure is an expected outcome, not an error: the link is
    /// produced with an empty URL and the missing style tag so the document
    /// stays readable, and under a development context the symbol is
    /// reported once on stderr.
    fn make_symbol_link(&self, label: &str) -> MdNode {
        let (expression, alias) = match label.split_once('|') {
            Some((expression, alias)) => (expression, Some(alias)),
            None => (label, None),
        };
        let display = alias.unwrap_or(label);

        let url = self.resolve(expression);
        let missing = url.is_none();
        if missing && self.options.development {
            diagnostics::warn_unresolved(label);
        }

        let mut class_name = self.options.link_class.clone();
        if alias.is_some() {
            class_name.push(' ');
            class_name.push_str(&self.options.aliased_class);
        }
        if missing {
            class_name.push(' ');
            class_name.push_str(&self.options.missing_class);
        }

        let title = match &self.options.title_message {
            Some(message) => message(expression, missing),
            None => default_title(expression, missing),
        };

        let data = NodeData {
            h_properties: HProperties {
                class_name,
                missing: missing.then_some(true),
                target: Some("_blank".to_string()),
            },
        };

        return MdNode::link(url.unwrap_or_default(), title, data, display.to_string());
    }
}

/// Built-in tooltip text for produced links.
fn default_title(expression: &str, missing: bool) -> String {
    if missing {
        return "Missing link to symbol in API docs, we're happy to accept a PR to fix this!"
            .to_string();
    }
    return format!("View '{expression}' in API reference docs");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Reflection, ReflectionKind};

    /// Shorthand reflection node for building test trees.
    fn node(name: &str, kind: ReflectionKind, children: Vec<Reflection>) -> Reflection {
        return Reflection {
            name: name.to_string(),
            kind,
            children,
        };
    }

    /// Project > module "engine" > class Engine { start }.
    fn engine_reflection() -> Reflection {
        return node(
            "my-engine",
            ReflectionKind::Project,
            vec![node(
                "engine",
                ReflectionKind::Module,
                vec![node(
                    "Engine",
                    ReflectionKind::Class,
                    vec![node("start", ReflectionKind::Method, vec![])],
                )],
            )],
        );
    }

    /// Transformer over the engine reflection with an empty base path.
    fn engine_transformer() -> LinkTransformer {
        return transformer(Options {
            reflection: Some(engine_reflection()),
            base_path: String::new(),
            ..Options::default()
        });
    }

    /// A root node holding the given children.
    fn root(children: Vec<MdNode>) -> MdNode {
        let mut root = MdNode::new("root");
        root.children = Some(children);
        return root;
    }

    /// A linkReference node with the given label.
    fn link_reference(label: Option<&str>) -> MdNode {
        let mut node = MdNode::new(crate::mdast::LINK_REFERENCE);
        node.label = label.map(String::from);
        node.children = Some(vec![MdNode::text(label.unwrap_or("invalid"))]);
        return node;
    }

    /// The children of a node, panicking helpfully when absent.
    fn children_of(tree: &MdNode) -> &[MdNode] {
        return tree.children.as_deref().unwrap();
    }

    #[test]
    fn passes_through_with_no_documentation_model() {
        let mut tree = root(vec![MdNode::text("a text node")]);
        let expected = tree.clone();

        transformer(Options::default()).transform(&mut tree);

        assert_eq!(tree, expected);
    }

    #[test]
    fn document_without_link_syntax_is_untouched() {
        let mut tree = root(vec![
            MdNode::text("plain prose with [single] brackets and "),
            MdNode::text("no references"),
        ]);
        let expected = tree.clone();

        engine_transformer().transform(&mut tree);

        assert_eq!(tree, expected);
    }

    #[test]
    fn replaces_reference_node_between_bracket_texts() {
        let mut tree = root(vec![
            MdNode::text("A link to ["),
            link_reference(Some("Engine")),
            MdNode::text("] docs"),
        ]);

        engine_transformer().transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].text_value(), "A link to ");
        assert_eq!(children[2].text_value(), " docs");

        let link = &children[1];
        assert_eq!(link.node_type, crate::mdast::LINK);
        assert_eq!(link.url.as_deref(), Some("/classes/engine.engine.html"));
        let class = &link.data.as_ref().unwrap().h_properties.class_name;
        assert_eq!(class, "tsdoc-link");
        assert_eq!(children_of(link)[0].text_value(), "Engine");
    }

    #[test]
    fn replaces_inline_bracket_occurrence() {
        let mut tree = root(vec![MdNode::text("A link to [[Engine]] docs")]);

        engine_transformer().transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].text_value(), "A link to ");
        assert_eq!(children[1].url.as_deref(), Some("/classes/engine.engine.html"));
        assert_eq!(children[2].text_value(), " docs");
    }

    #[test]
    fn multiple_inline_occurrences_in_one_span() {
        let mut tree = root(vec![MdNode::text(
            "A link to [[Engine]] docs and [[Engine.start]] docs",
        )]);

        engine_transformer().transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children.len(), 5);
        assert_eq!(children[0].text_value(), "A link to ");
        assert_eq!(children[1].url.as_deref(), Some("/classes/engine.engine.html"));
        assert_eq!(children[2].text_value(), " docs and ");
        assert_eq!(
            children[3].url.as_deref(),
            Some("/classes/engine.engine.html#start")
        );
        assert_eq!(children[4].text_value(), " docs");
    }

    #[test]
    fn alias_controls_display_text_and_style() {
        let mut tree = root(vec![MdNode::text("A link to [[Engine|the engine]] docs")]);

        engine_transformer().transform(&mut tree);

        let link = &children_of(&tree)[1];
        assert_eq!(children_of(link)[0].text_value(), "the engine");
        let class = &link.data.as_ref().unwrap().h_properties.class_name;
        assert_eq!(class, "tsdoc-link tsdoc-link--aliased");
        assert_eq!(link.data.as_ref().unwrap().h_properties.missing, None);
    }

    #[test]
    fn reference_node_label_supports_alias() {
        let mut tree = root(vec![
            MdNode::text("A link to ["),
            link_reference(Some("Engine|the engine")),
            MdNode::text("] docs"),
        ]);

        engine_transformer().transform(&mut tree);

        let link = &children_of(&tree)[1];
        assert_eq!(children_of(link)[0].text_value(), "the engine");
        assert!(
            link.data
                .as_ref()
                .unwrap()
                .h_properties
                .class_name
                .contains("aliased")
        );
    }

    #[test]
    fn missing_symbol_produces_empty_url_and_missing_tag() {
        let mut tree = root(vec![MdNode::text("A link to [[abcdefg]] docs")]);

        engine_transformer().transform(&mut tree);

        let link = &children_of(&tree)[1];
        assert_eq!(link.url.as_deref(), Some(""));
        let props = &link.data.as_ref().unwrap().h_properties;
        assert_eq!(props.class_name, "tsdoc-link tsdoc-link--missing");
        assert_eq!(props.missing, Some(true));
        assert_eq!(children_of(link)[0].text_value(), "abcdefg");
    }

    #[test]
    fn transforms_nested_children() {
        let mut paragraph = MdNode::new("paragraph");
        paragraph.children = Some(vec![MdNode::text("A link to [[Engine|the engine]] docs")]);
        let mut tree = root(vec![paragraph]);

        engine_transformer().transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children.len(), 1);
        let inner = children_of(&children[0]);
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[1].node_type, crate::mdast::LINK);
    }

    #[test]
    fn skips_reference_without_label() {
        let mut tree = root(vec![
            MdNode::text("A link to ["),
            link_reference(None),
            MdNode::text("] docs"),
        ]);

        engine_transformer().transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children[1].node_type, crate::mdast::LINK_REFERENCE);
        assert_eq!(children[0].text_value(), "A link to [");
    }

    #[test]
    fn skips_unbalanced_brackets() {
        let mut tree = root(vec![
            MdNode::text("A link to"),
            link_reference(Some("Engine")),
            MdNode::text("] docs"),
        ]);

        engine_transformer().transform(&mut tree);

        assert_eq!(children_of(&tree)[1].node_type, crate::mdast::LINK_REFERENCE);
    }

    #[test]
    fn skips_reference_missing_a_neighbour() {
        let mut lhs_only = root(vec![MdNode::text("A link to ["), link_reference(Some("Engine"))]);
        engine_transformer().transform(&mut lhs_only);
        assert_eq!(children_of(&lhs_only)[1].node_type, crate::mdast::LINK_REFERENCE);

        let mut rhs_only = root(vec![link_reference(Some("Engine")), MdNode::text("] docs")]);
        engine_transformer().transform(&mut rhs_only);
        assert_eq!(children_of(&rhs_only)[0].node_type, crate::mdast::LINK_REFERENCE);
    }

    #[test]
    fn consecutive_reference_nodes_both_rewrite() {
        let mut tree = root(vec![
            MdNode::text("See ["),
            link_reference(Some("Engine")),
            MdNode::text("] and ["),
            link_reference(Some("Engine.start")),
            MdNode::text("]."),
        ]);

        engine_transformer().transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children.len(), 5);
        assert_eq!(children[1].node_type, crate::mdast::LINK);
        assert_eq!(children[3].node_type, crate::mdast::LINK);
        assert_eq!(children[2].text_value(), " and ");
        assert_eq!(children[4].text_value(), ".");
    }

    #[test]
    fn rewriting_is_idempotent() {
        let session = engine_transformer();
        let mut tree = root(vec![MdNode::text("A link to [[Engine]] docs")]);

        session.transform(&mut tree);
        let once = tree.clone();
        session.transform(&mut tree);

        assert_eq!(tree, once);
    }

    #[test]
    fn custom_title_message_is_used() {
        let session = transformer(Options {
            reflection: Some(engine_reflection()),
            base_path: String::new(),
            title_message: Some(Box::new(|expression, missing| {
                return format!("{expression} (missing: {missing})");
            })),
            ..Options::default()
        });
        let mut tree = root(vec![MdNode::text("[[Engine]]")]);

        session.transform(&mut tree);

        let children = children_of(&tree);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].title.as_deref(), Some("Engine (missing: false)"));
    }

    #[test]
    fn one_index_serves_many_documents() {
        let session = engine_transformer();

        let mut first = root(vec![MdNode::text("[[Engine]]")]);
        let mut second = root(vec![MdNode::text("[[Engine.start]]")]);
        session.transform(&mut first);
        session.transform(&mut second);

        assert_eq!(
            children_of(&first)[0].url.as_deref(),
            Some("/classes/engine.engine.html")
        );
        assert_eq!(
            children_of(&second)[0].url.as_deref(),
            Some("/classes/engine.engine.html#start")
        );
    }
}
