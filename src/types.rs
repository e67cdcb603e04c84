/// Core domain types: reflection nodes, symbol paths, and transform options.
use serde::Deserialize;

use crate::kinds::KindProfile;

/// Category tag of a reflection node, mirroring the numeric kind codes the
/// documentation-model producer writes into its JSON output. Codes the crate
/// does not know about deserialize to `Unknown` so a newer producer never
/// breaks tree loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "u32")]
pub enum ReflectionKind {
    /// The tree root owning every exported symbol.
    Project,
    /// A file-level module.
    Module,
    /// A nested namespace.
    Namespace,
    /// Composite module tag emitted by older schema versions.
    SomeModule,
    /// An enum declaration.
    Enum,
    /// A member of an enum.
    EnumMember,
    /// An exported variable or constant.
    Variable,
    /// A free function.
    Function,
    /// A class declaration.
    Class,
    /// An interface declaration.
    Interface,
    /// A class constructor.
    Constructor,
    /// A property of a class or interface.
    Property,
    /// A method of a class or interface.
    Method,
    /// A get/set accessor pair.
    Accessor,
    /// An object-literal constant (older schema versions).
    ObjectLiteral,
    /// A type alias.
    TypeAlias,
    /// Any kind code this crate has no use for.
    Unknown(u32),
}

impl ReflectionKind {
    /// Human-readable kind name for index listings and diagnostics.
    pub fn name(self) -> &'static str {
        return match self {
            ReflectionKind::Project => "project",
            ReflectionKind::Module => "module",
            ReflectionKind::Namespace => "namespace",
            ReflectionKind::SomeModule => "module",
            ReflectionKind::Enum => "enum",
            ReflectionKind::EnumMember => "enum member",
            ReflectionKind::Variable => "variable",
            ReflectionKind::Function => "function",
            ReflectionKind::Class => "class",
            ReflectionKind::Interface => "interface",
            ReflectionKind::Constructor => "constructor",
            ReflectionKind::Property => "property",
            ReflectionKind::Method => "method",
            ReflectionKind::Accessor => "accessor",
            ReflectionKind::ObjectLiteral => "object literal",
            ReflectionKind::TypeAlias => "type alias",
            ReflectionKind::Unknown(_) => "unknown",
        };
    }
}

impl From<u32> for ReflectionKind {
    /// Map a numeric kind code to its tag, preserving unrecognized codes.
    fn from(code: u32) -> Self {
        return match code {
            0x1 => ReflectionKind::Project,
            0x2 => ReflectionKind::Module,
            0x4 => ReflectionKind::Namespace,
            0x6 => ReflectionKind::SomeModule,
            0x8 => ReflectionKind::Enum,
            0x10 => ReflectionKind::EnumMember,
            0x20 => ReflectionKind::Variable,
            0x40 => ReflectionKind::Function,
            0x80 => ReflectionKind::Class,
            0x100 => ReflectionKind::Interface,
            0x200 => ReflectionKind::Constructor,
            0x400 => ReflectionKind::Property,
            0x800 => ReflectionKind::Method,
            0x40000 => ReflectionKind::Accessor,
            0x200000 => ReflectionKind::ObjectLiteral,
            0x400000 => ReflectionKind::TypeAlias,
            other => ReflectionKind::Unknown(other),
        };
    }
}

/// One node of the externally produced documentation-model tree.
/// The crate only ever reads these, once, while building the symbol index.
#[derive(Debug, Clone, Deserialize)]
pub struct Reflection {
    /// Declared name of the exported symbol.
    pub name: String,
    /// Category tag driving indexing and link-shape decisions.
    pub kind: ReflectionKind,
    /// Nested member reflections; absent in the JSON for leaf symbols.
    #[serde(default)]
    pub children: Vec<Reflection>,
}

/// One ancestor step in a resolved symbol path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPathItem {
    /// Declared name of the ancestor symbol.
    pub name: String,
    /// Kind of the ancestor symbol.
    pub kind: ReflectionKind,
}

/// Tooltip generator: `(symbol_path, missing)` to human-readable title text.
pub type TitleMessageFn = Box<dyn Fn(&str, bool) -> String + Send + Sync>;

/// Configuration for one transformer session. The symbol index is built once
/// from `reflection` and shared read-only across every document transformed.
pub struct Options {
    /// Root of the documentation-model tree. `None` degrades the transform
    /// to a pass that marks every symbol link as missing.
    pub reflection: Option<Reflection>,
    /// URL prefix under which the generated documentation pages live.
    pub base_path: String,
    /// Schema-dependent kind classification.
    pub profile: KindProfile,
    /// Lower-case assembled link paths (case-insensitive static hosts).
    pub fold_case: bool,
    /// Style tag applied to every produced link.
    pub link_class: String,
    /// Additional style tag when the reference carries a display alias.
    pub aliased_class: String,
    /// Additional style tag when the symbol could not be resolved.
    pub missing_class: String,
    /// Tooltip text override; `None` uses the built-in messages.
    pub title_message: Option<TitleMessageFn>,
    /// Emit a stderr warning for every unresolved symbol.
    pub development: bool,
}

impl Default for Options {
    /// Modern schema profile, folding on, `tsdoc-link` class family.
    fn default() -> Self {
        return Self {
            reflection: None,
            base_path: "/".to_string(),
            profile: KindProfile::modern(),
            fold_case: true,
            link_class: "tsdoc-link".to_string(),
            aliased_class: "tsdoc-link--aliased".to_string(),
            missing_class: "tsdoc-link--missing".to_string(),
            title_message: None,
            development: false,
        };
    }
}
