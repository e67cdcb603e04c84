/// Symbol classification: which kinds are linkable and which own a page.
///
/// The documentation-model schema has added kinds over time (`Namespace`,
/// `Variable`, `Project` participation changed between versions), so the
/// classification is plain data rather than logic. Supporting a new schema
/// version means building a new `KindProfile`, not editing the algorithms.
use std::collections::HashSet;

use serde::Deserialize;

use crate::types::ReflectionKind;

/// Kinds eligible to appear, by name, in a symbol expression under every
/// supported schema version.
const BASE_LINK_KINDS: &[ReflectionKind] = &[
    ReflectionKind::Enum,
    ReflectionKind::EnumMember,
    ReflectionKind::Class,
    ReflectionKind::Interface,
    ReflectionKind::Constructor,
    ReflectionKind::Property,
    ReflectionKind::Method,
    ReflectionKind::Accessor,
    ReflectionKind::Function,
    ReflectionKind::TypeAlias,
    ReflectionKind::ObjectLiteral,
];

/// Kinds that own a documentation page under every supported schema version.
const BASE_CONTAINER_KINDS: &[ReflectionKind] = &[
    ReflectionKind::Class,
    ReflectionKind::Interface,
    ReflectionKind::Enum,
    ReflectionKind::Module,
    ReflectionKind::SomeModule,
];

/// Two sets of kind tags deciding how each reflection node participates in
/// indexing and link generation. Immutable once built.
#[derive(Debug, Clone)]
pub struct KindProfile {
    /// Kinds whose names appear in symbol expressions.
    link_kinds: HashSet<ReflectionKind>,
    /// Kinds that own a distinct documentation page.
    container_kinds: HashSet<ReflectionKind>,
}

impl KindProfile {
    /// Build a profile from arbitrary kind sets.
    pub fn new(
        link_kinds: impl IntoIterator<Item = ReflectionKind>,
        container_kinds: impl IntoIterator<Item = ReflectionKind>,
    ) -> Self {
        return Self {
            link_kinds: link_kinds.into_iter().collect(),
            container_kinds: container_kinds.into_iter().collect(),
        };
    }

    /// Classification for older schema versions: no namespaces or variables,
    /// and the project root owns no page of its own.
    pub fn legacy() -> Self {
        return Self::new(
            BASE_LINK_KINDS.iter().copied(),
            BASE_CONTAINER_KINDS.iter().copied(),
        );
    }

    /// Classification for newer schema versions: namespaces link and own
    /// pages, variables link, and true top-level exports hang off the
    /// project root (which therefore counts as a container).
    pub fn modern() -> Self {
        let link = BASE_LINK_KINDS
            .iter()
            .copied()
            .chain([ReflectionKind::Namespace, ReflectionKind::Variable]);
        let containers = BASE_CONTAINER_KINDS
            .iter()
            .copied()
            .chain([ReflectionKind::Namespace, ReflectionKind::Project]);
        return Self::new(link, containers);
    }

    /// Whether this kind's name appears in symbol expressions.
    pub fn is_linkable(&self, kind: ReflectionKind) -> bool {
        return self.link_kinds.contains(&kind);
    }

    /// Whether this kind owns a distinct documentation page.
    pub fn is_container(&self, kind: ReflectionKind) -> bool {
        return self.container_kinds.contains(&kind);
    }

    /// Whether a reflection of this kind is traversed at all during
    /// index construction.
    pub fn is_indexed(&self, kind: ReflectionKind) -> bool {
        return self.is_linkable(kind) || self.is_container(kind);
    }
}

/// Named schema profile selectable from the CLI and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaProfile {
    /// Older documentation-model schema (quoted file-module names).
    Legacy,
    /// Current documentation-model schema.
    Modern,
}

impl SchemaProfile {
    /// Materialize the kind sets for this named profile.
    pub fn kind_profile(self) -> KindProfile {
        return match self {
            SchemaProfile::Legacy => KindProfile::legacy(),
            SchemaProfile::Modern => KindProfile::modern(),
        };
    }
}
