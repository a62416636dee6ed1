//! Kind registry: frozen `isa` discriminants + per-kind reference-field specs.
//!
//! # Identity rules
//! Every record in a project document carries an `isa` string naming its
//! kind.  The mapping from `isa` to [`ObjectKind`] is total: every known
//! discriminant maps to exactly one kind, and every unrecognised one maps to
//! [`ObjectKind::Unknown`].  Project documents grow new record kinds with
//! every Xcode release, so classification never fails.
//!
//! A kind is fixed when its record enters the object table and never changes
//! for the lifetime of the document.
//!
//! # Reference specs
//! [`KindSpec`] declares, per kind, which field names hold identifiers
//! (single) and which hold identifier sequences.  Only the graph audit and
//! full-traversal paths consume these; the typed views in [`crate::views`]
//! know their own fields statically.

use std::fmt;

// ── ObjectKind ───────────────────────────────────────────────────────────────

/// Runtime discriminant for one record in the object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Project,
    NativeTarget,
    FileReference,
    Group,
    VariantGroup,
    SourcesBuildPhase,
    ResourcesBuildPhase,
    FrameworksBuildPhase,
    ShellScriptBuildPhase,
    BuildFile,
    BuildConfiguration,
    ConfigurationList,
    ContainerItemProxy,
    ReferenceProxy,
    TargetDependency,
    /// Catch-all for discriminants this build does not know.  The raw record
    /// stays fully accessible through the generic accessors.
    Unknown,
}

/// Every known kind, Unknown last.  Order is the display order used by the
/// CLI `info` listing.
pub const ALL_KINDS: [ObjectKind; 16] = [
    ObjectKind::Project,
    ObjectKind::NativeTarget,
    ObjectKind::FileReference,
    ObjectKind::Group,
    ObjectKind::VariantGroup,
    ObjectKind::SourcesBuildPhase,
    ObjectKind::ResourcesBuildPhase,
    ObjectKind::FrameworksBuildPhase,
    ObjectKind::ShellScriptBuildPhase,
    ObjectKind::BuildFile,
    ObjectKind::BuildConfiguration,
    ObjectKind::ConfigurationList,
    ObjectKind::ContainerItemProxy,
    ObjectKind::ReferenceProxy,
    ObjectKind::TargetDependency,
    ObjectKind::Unknown,
];

impl ObjectKind {
    /// Map an `isa` discriminant to its kind.  Total: anything unrecognised
    /// is `Unknown`, never an error.
    pub fn classify(isa: &str) -> ObjectKind {
        match isa {
            "PBXProject"               => ObjectKind::Project,
            "PBXNativeTarget"          => ObjectKind::NativeTarget,
            "PBXFileReference"         => ObjectKind::FileReference,
            "PBXGroup"                 => ObjectKind::Group,
            "PBXVariantGroup"          => ObjectKind::VariantGroup,
            "PBXSourcesBuildPhase"     => ObjectKind::SourcesBuildPhase,
            "PBXResourcesBuildPhase"   => ObjectKind::ResourcesBuildPhase,
            "PBXFrameworksBuildPhase"  => ObjectKind::FrameworksBuildPhase,
            "PBXShellScriptBuildPhase" => ObjectKind::ShellScriptBuildPhase,
            "PBXBuildFile"             => ObjectKind::BuildFile,
            "XCBuildConfiguration"     => ObjectKind::BuildConfiguration,
            "XCConfigurationList"      => ObjectKind::ConfigurationList,
            "PBXContainerItemProxy"    => ObjectKind::ContainerItemProxy,
            "PBXReferenceProxy"        => ObjectKind::ReferenceProxy,
            "PBXTargetDependency"      => ObjectKind::TargetDependency,
            _                          => ObjectKind::Unknown,
        }
    }

    /// The frozen `isa` string for this kind.  `None` for `Unknown`, whose
    /// records keep whatever discriminant the document carried.
    pub fn isa(self) -> Option<&'static str> {
        match self {
            ObjectKind::Project               => Some("PBXProject"),
            ObjectKind::NativeTarget          => Some("PBXNativeTarget"),
            ObjectKind::FileReference         => Some("PBXFileReference"),
            ObjectKind::Group                 => Some("PBXGroup"),
            ObjectKind::VariantGroup          => Some("PBXVariantGroup"),
            ObjectKind::SourcesBuildPhase     => Some("PBXSourcesBuildPhase"),
            ObjectKind::ResourcesBuildPhase   => Some("PBXResourcesBuildPhase"),
            ObjectKind::FrameworksBuildPhase  => Some("PBXFrameworksBuildPhase"),
            ObjectKind::ShellScriptBuildPhase => Some("PBXShellScriptBuildPhase"),
            ObjectKind::BuildFile             => Some("PBXBuildFile"),
            ObjectKind::BuildConfiguration    => Some("XCBuildConfiguration"),
            ObjectKind::ConfigurationList     => Some("XCConfigurationList"),
            ObjectKind::ContainerItemProxy    => Some("PBXContainerItemProxy"),
            ObjectKind::ReferenceProxy        => Some("PBXReferenceProxy"),
            ObjectKind::TargetDependency      => Some("PBXTargetDependency"),
            ObjectKind::Unknown               => None,
        }
    }

    /// Human-readable name (for diagnostics only — never parsed).
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Project               => "project",
            ObjectKind::NativeTarget          => "native target",
            ObjectKind::FileReference         => "file reference",
            ObjectKind::Group                 => "group",
            ObjectKind::VariantGroup          => "variant group",
            ObjectKind::SourcesBuildPhase     => "sources build phase",
            ObjectKind::ResourcesBuildPhase   => "resources build phase",
            ObjectKind::FrameworksBuildPhase  => "frameworks build phase",
            ObjectKind::ShellScriptBuildPhase => "shell script build phase",
            ObjectKind::BuildFile             => "build file",
            ObjectKind::BuildConfiguration    => "build configuration",
            ObjectKind::ConfigurationList     => "configuration list",
            ObjectKind::ContainerItemProxy    => "container item proxy",
            ObjectKind::ReferenceProxy        => "reference proxy",
            ObjectKind::TargetDependency      => "target dependency",
            ObjectKind::Unknown               => "unknown",
        }
    }

    pub fn is_build_phase(self) -> bool {
        matches!(
            self,
            ObjectKind::SourcesBuildPhase
                | ObjectKind::ResourcesBuildPhase
                | ObjectKind::FrameworksBuildPhase
                | ObjectKind::ShellScriptBuildPhase
        )
    }

    /// The reference-field declaration for this kind.
    pub fn spec(self) -> &'static KindSpec {
        match self {
            ObjectKind::Project               => &SPEC_PROJECT,
            ObjectKind::NativeTarget          => &SPEC_NATIVE_TARGET,
            ObjectKind::FileReference         => &SPEC_EMPTY,
            ObjectKind::Group                 => &SPEC_GROUP,
            ObjectKind::VariantGroup          => &SPEC_GROUP,
            ObjectKind::SourcesBuildPhase     => &SPEC_BUILD_PHASE,
            ObjectKind::ResourcesBuildPhase   => &SPEC_BUILD_PHASE,
            ObjectKind::FrameworksBuildPhase  => &SPEC_BUILD_PHASE,
            ObjectKind::ShellScriptBuildPhase => &SPEC_BUILD_PHASE,
            ObjectKind::BuildFile             => &SPEC_BUILD_FILE,
            ObjectKind::BuildConfiguration    => &SPEC_BUILD_CONFIGURATION,
            ObjectKind::ConfigurationList     => &SPEC_CONFIGURATION_LIST,
            ObjectKind::ContainerItemProxy    => &SPEC_CONTAINER_ITEM_PROXY,
            ObjectKind::ReferenceProxy        => &SPEC_REFERENCE_PROXY,
            ObjectKind::TargetDependency      => &SPEC_TARGET_DEPENDENCY,
            ObjectKind::Unknown               => &SPEC_EMPTY,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ── KindSpec ─────────────────────────────────────────────────────────────────

/// Which fields of a kind hold identifiers that need indirection.
///
/// `refs` are single-identifier fields, `ref_seqs` hold ordered identifier
/// sequences.  Fields absent from both lists are plain attributes and are
/// never resolved.
#[derive(Debug)]
pub struct KindSpec {
    pub refs:     &'static [&'static str],
    pub ref_seqs: &'static [&'static str],
}

static SPEC_EMPTY: KindSpec = KindSpec { refs: &[], ref_seqs: &[] };

static SPEC_PROJECT: KindSpec = KindSpec {
    refs:     &["buildConfigurationList", "mainGroup", "productRefGroup"],
    ref_seqs: &["targets"],
};

static SPEC_NATIVE_TARGET: KindSpec = KindSpec {
    refs:     &["buildConfigurationList", "productReference"],
    ref_seqs: &["buildPhases", "dependencies"],
};

static SPEC_GROUP: KindSpec = KindSpec {
    refs:     &[],
    ref_seqs: &["children"],
};

static SPEC_BUILD_PHASE: KindSpec = KindSpec {
    refs:     &[],
    ref_seqs: &["files"],
};

static SPEC_BUILD_FILE: KindSpec = KindSpec {
    refs:     &["fileRef"],
    ref_seqs: &[],
};

static SPEC_BUILD_CONFIGURATION: KindSpec = KindSpec {
    refs:     &["baseConfigurationReference"],
    ref_seqs: &[],
};

static SPEC_CONFIGURATION_LIST: KindSpec = KindSpec {
    refs:     &[],
    ref_seqs: &["buildConfigurations"],
};

// `remoteGlobalIDString` looks like an identifier but may point into a
// different project document entirely, so it stays an opaque string.
static SPEC_CONTAINER_ITEM_PROXY: KindSpec = KindSpec {
    refs:     &["containerPortal"],
    ref_seqs: &[],
};

static SPEC_REFERENCE_PROXY: KindSpec = KindSpec {
    refs:     &["remoteRef"],
    ref_seqs: &[],
};

static SPEC_TARGET_DEPENDENCY: KindSpec = KindSpec {
    refs:     &["target", "targetProxy"],
    ref_seqs: &[],
};
