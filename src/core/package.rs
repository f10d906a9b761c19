//! Package descriptors
//!
//! A [`PackageDescriptor`] fully describes one buildable package: where its
//! source lives, which revision to use and how to build it. Descriptors are
//! created through one of two factory paths and never change afterwards:
//!
//! - [`PackageDescriptor::standard`] derives everything from the name
//! - [`PackageDescriptor::special`] takes explicit fields from the catalog

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{PATH_PLACEHOLDER, ROOT_PLACEHOLDER};
use crate::core::config::packages_dir;
use crate::error::CatalogError;
use crate::infra::git::{GitRef, HEAD};

/// Which catalog collection a package came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Name-only package following the URL and build conventions
    Standard,
    /// Package with an explicitly authored descriptor
    Special,
}

/// Catalog entry for a special package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialPackage {
    /// Package name
    pub name: String,

    /// Source URL (defaults to `<namespace>/<name>.git`)
    #[serde(default)]
    pub url: Option<String>,

    /// Branch for a shallow fresh clone
    #[serde(default)]
    pub branch: Option<String>,

    /// Tag for a full fresh clone; wins over `branch`
    #[serde(default)]
    pub tag: Option<String>,

    /// Revision existing working copies are reset to
    #[serde(default)]
    pub commit: Option<String>,

    /// Shell command replacing the default packaging command
    #[serde(default)]
    pub build: Option<String>,
}

/// Values shared by every descriptor built from one catalog
#[derive(Debug, Clone)]
pub struct PackageContext {
    /// Repository root
    pub root: PathBuf,
    /// URL namespace for default source URLs
    pub namespace: String,
    /// Branch given to standard packages
    pub default_branch: Option<String>,
}

/// One buildable package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    name: String,
    kind: PackageKind,
    url: String,
    commit: String,
    branch: Option<String>,
    tag: Option<String>,
    custom_build_command: Option<String>,
    path: PathBuf,
}

impl PackageDescriptor {
    /// Build a descriptor for a standard package from its name alone
    pub fn standard(name: &str, ctx: &PackageContext) -> Result<Self, CatalogError> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            kind: PackageKind::Standard,
            url: default_url(&ctx.namespace, name),
            commit: HEAD.to_string(),
            branch: non_empty(ctx.default_branch.as_deref()),
            tag: None,
            custom_build_command: None,
            path: package_path(&ctx.root, name),
        })
    }

    /// Build a descriptor for a special package from its catalog entry
    pub fn special(spec: &SpecialPackage, ctx: &PackageContext) -> Result<Self, CatalogError> {
        validate_name(&spec.name)?;
        let path = package_path(&ctx.root, &spec.name);
        let custom_build_command = non_empty(spec.build.as_deref())
            .map(|cmd| expand_placeholders(&cmd, &ctx.root, &path));

        Ok(Self {
            name: spec.name.clone(),
            kind: PackageKind::Special,
            url: non_empty(spec.url.as_deref())
                .unwrap_or_else(|| default_url(&ctx.namespace, &spec.name)),
            commit: non_empty(spec.commit.as_deref()).unwrap_or_else(|| HEAD.to_string()),
            branch: non_empty(spec.branch.as_deref()),
            tag: non_empty(spec.tag.as_deref()),
            custom_build_command,
            path,
        })
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog collection the package came from
    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    /// Source URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Revision existing working copies are reset to
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Branch used for a fresh clone when no tag is set
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Tag used for a fresh clone
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Custom build command, if any
    pub fn custom_build_command(&self) -> Option<&str> {
        self.custom_build_command.as_deref()
    }

    /// Local working copy
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reference a fresh clone checks out; a tag always wins over a branch
    pub fn clone_ref(&self) -> Option<GitRef> {
        match (&self.tag, &self.branch) {
            (Some(tag), _) => Some(GitRef::Tag(tag.clone())),
            (None, Some(branch)) => Some(GitRef::Branch(branch.clone())),
            (None, None) => None,
        }
    }
}

/// Check that a name can be used for selection and as a directory name
pub fn validate_name(name: &str) -> Result<(), CatalogError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative directory")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.chars().any(char::is_whitespace) {
        Some("name contains whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// `<root>/packages/<name>`
pub fn package_path(root: &Path, name: &str) -> PathBuf {
    packages_dir(root).join(name)
}

/// `<namespace>/<name>.git`
pub fn default_url(namespace: &str, name: &str) -> String {
    format!("{}/{name}.git", namespace.trim_end_matches('/'))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn expand_placeholders(command: &str, root: &Path, path: &Path) -> String {
    command
        .replace(ROOT_PLACEHOLDER, &root.to_string_lossy())
        .replace(PATH_PLACEHOLDER, &path.to_string_lossy())
}
