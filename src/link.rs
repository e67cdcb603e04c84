/// Link path generation: derive the page path and in-page anchor for a
/// symbol expression, following the target site's naming convention.
///
/// The convention is owned by a separately versioned static-site generator
/// and has changed across schema versions (quoted file-module names, case
/// folding), so everything variable lives in the `KindProfile` and the
/// `fold_case` flag rather than in version checks scattered below.
use crate::index::SymbolIndex;
use crate::kinds::KindProfile;
use crate::types::ReflectionKind;

/// Resolve one symbol expression to a site-relative URL.
///
/// Returns `None` when the expression is not in the index; the caller
/// decides whether that is a warning, a styled missing link, or both.
pub fn generate_link(
    expression: &str,
    base_path: &str,
    index: &SymbolIndex,
    profile: &KindProfile,
    fold_case: bool,
) -> Option<String> {
    let path = index.get(expression)?;
    let base = ensure_trailing_slash(base_path);

    // The owning container is the LAST container-kind item: a method inside
    // a class inside a module belongs to the class page, not the module page.
    let container_index = path.iter().rposition(|item| profile.is_container(item.kind));
    let container_kind = container_index.and_then(|i| path.get(i)).map(|item| item.kind);

    let mut container_prefix = match container_kind {
        Some(ReflectionKind::Class) => "classes/",
        Some(ReflectionKind::Interface) => "interfaces/",
        Some(ReflectionKind::Enum) => "enums/",
        Some(
            ReflectionKind::Module | ReflectionKind::Namespace | ReflectionKind::SomeModule,
        ) => "modules/",
        _ => "",
    };

    // A symbol exactly one level below the project root with no intermediate
    // container has no page of its own; the site collects those on a single
    // shared listing page.
    let is_top_level_export = container_prefix.is_empty()
        && path.len() == 2
        && container_kind == Some(ReflectionKind::Project);
    if is_top_level_export {
        container_prefix = "modules.html";
    }

    let mut assembled = String::new();
    for (position, item) in path.iter().enumerate() {
        match item.kind {
            ReflectionKind::Project => {},
            ReflectionKind::Module | ReflectionKind::Namespace | ReflectionKind::SomeModule => {
                assembled.push_str(&sanitize_module_name(&item.name));
                assembled.push('.');
            },
            ReflectionKind::Class | ReflectionKind::Interface | ReflectionKind::Enum => {
                assembled.push_str(&item.name);
            },
            _ => {
                assembled.push('#');
                assembled.push_str(&item.name);
            },
        }

        // The owning container closes the file name. The project root never
        // does: its shared page is already carried by the prefix above.
        if container_kind != Some(ReflectionKind::Project) && Some(position) == container_index {
            if !assembled.ends_with('.') {
                assembled.push('.');
            }
            assembled.push_str("html");
        }
    }

    if fold_case {
        assembled = assembled.to_lowercase();
    }

    return Some(format!("{base}{container_prefix}{assembled}"));
}

/// File-module names may contain path separators or quoting from older
/// schema versions; the site replaces every non-ASCII-alphanumeric
/// character with `_` when forming file names.
fn sanitize_module_name(name: &str) -> String {
    return name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
}

/// Normalize the base path to end with exactly the separator it needs.
fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        return path.to_string();
    }
    return format!("{path}/");
}
