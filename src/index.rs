/// Symbol index construction: flatten the documentation-model tree into a
/// map from symbol expression to ancestor path.
use std::collections::{HashMap, HashSet};

use crate::kinds::KindProfile;
use crate::types::{Reflection, ReflectionKind, SymbolPathItem};

/// Mapping from a symbol expression to its full ancestor path, root first.
/// First occurrence wins on collision; stored paths are never empty.
pub type SymbolIndex = HashMap<String, Vec<SymbolPathItem>>;

/// Build the symbol index for one documentation-model tree.
///
/// An absent root yields an empty index — the transform then degrades to
/// marking every symbol link as missing, which keeps the host pipeline
/// running with no documentation model supplied.
pub fn build_symbol_index(root: Option<&Reflection>, profile: &KindProfile) -> SymbolIndex {
    let mut index = SymbolIndex::new();
    visit_expressions(root, profile, &mut |expression, path| {
        if !index.contains_key(&expression) {
            index.insert(expression, path.to_vec());
        }
    });
    return index;
}

/// Expressions discovered more than once, in traversal order.
///
/// Resolution behavior is unaffected (the first occurrence still wins);
/// this exists so the CLI can surface genuine ambiguity in large codebases
/// that silent first-wins would otherwise hide.
pub fn shadowed_expressions(root: Option<&Reflection>, profile: &KindProfile) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut shadowed = Vec::new();
    visit_expressions(root, profile, &mut |expression, _path| {
        if !seen.insert(expression.clone()) {
            shadowed.push(expression);
        }
    });
    return shadowed;
}

/// Run the traversal, feeding every non-empty expression to `visit`.
fn visit_expressions(
    root: Option<&Reflection>,
    profile: &KindProfile,
    visit: &mut impl FnMut(String, &[SymbolPathItem]),
) {
    if let Some(node) = root {
        let mut ancestors: Vec<SymbolPathItem> = Vec::new();
        visit_reflection(node, &mut ancestors, profile, visit);
    }
}

/// Depth-first walk, children before self, threading the ancestor chain.
///
/// Children whose kind is neither linkable nor a container are pruned
/// outright: not traversed, not indexed. The node's own entry is computed
/// after all qualifying children so insertion order matches traversal order
/// and first-wins collisions stay deterministic.
fn visit_reflection(
    node: &Reflection,
    ancestors: &mut Vec<SymbolPathItem>,
    profile: &KindProfile,
    visit: &mut impl FnMut(String, &[SymbolPathItem]),
) {
    ancestors.push(SymbolPathItem {
        name: node.name.clone(),
        kind: node.kind,
    });

    for child in &node.children {
        if profile.is_indexed(child.kind) {
            visit_reflection(child, ancestors, profile, visit);
        }
    }

    let expression = symbol_expression(ancestors, profile);
    if !expression.is_empty() {
        visit(expression, ancestors);
    }

    ancestors.pop();
}

/// Synthesize the dotted/hash expression users write for this path.
///
/// Non-linkable ancestors (the project root, unknown kinds) contribute
/// nothing; constructors append the literal `#ctor` suffix instead of a
/// name; functions restart the expression at their own name, since the
/// expression grammar never qualifies a function by its module.
fn symbol_expression(path: &[SymbolPathItem], profile: &KindProfile) -> String {
    let mut expression = String::new();

    for item in path {
        if !profile.is_linkable(item.kind) {
            continue;
        }
        match item.kind {
            ReflectionKind::Constructor => expression.push_str("#ctor"),
            ReflectionKind::Function => expression = item.name.clone(),
            _ => {
                if !expression.is_empty() {
                    expression.push('.');
                }
                expression.push_str(&item.name);
            },
        }
    }

    return expression;
}
