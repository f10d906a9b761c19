//! Package catalog
//!
//! The catalog holds two disjoint collections: standard package names that
//! share one URL and build convention, and special packages with their own
//! descriptors. Standard descriptors are only materialized when a run asks
//! for them.
//!
//! Catalogs are TOML:
//!
//! ```toml
//! namespace = "https://github.com/nos-packaging"
//! default_branch = "nos-master"
//! standard = ["libnl3", "libteam"]
//!
//! [[special]]
//! name = "linux-kernel"
//! branch = "nos-6.1"
//! build = "make -f debian/rules.gen binary-arch"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::defaults::{BUILTIN_CATALOG, CATALOG_FILE};
use crate::config::urls::DEFAULT_NAMESPACE;
use crate::core::package::{validate_name, PackageContext, PackageDescriptor, SpecialPackage};
use crate::error::CatalogError;
use crate::infra::filesystem;

/// On-disk catalog layout
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    standard: Vec<String>,
    #[serde(default)]
    special: Vec<SpecialPackage>,
}

/// Every package known to a run
#[derive(Debug, Clone)]
pub struct Catalog {
    context: PackageContext,
    standard: Vec<String>,
    special: Vec<PackageDescriptor>,
}

impl Catalog {
    /// Parse a catalog from TOML; `source` only labels errors
    pub fn from_toml(content: &str, root: &Path, source: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::ParseError {
            path: source.to_path_buf(),
            error: e.to_string(),
        })?;

        let context = PackageContext {
            root: root.to_path_buf(),
            namespace: file
                .namespace
                .filter(|ns| !ns.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            default_branch: file.default_branch,
        };

        let mut seen = HashSet::new();
        for name in file
            .standard
            .iter()
            .chain(file.special.iter().map(|s| &s.name))
        {
            validate_name(name)?;
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::DuplicateName { name: name.clone() });
            }
        }

        let special = file
            .special
            .iter()
            .map(|spec| PackageDescriptor::special(spec, &context))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            context,
            standard: file.standard,
            special,
        })
    }

    /// Load a catalog file
    pub fn load(path: &Path, root: &Path) -> Result<Self, CatalogError> {
        let content = filesystem::read_file(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content, root, path)
    }

    /// The catalog compiled into the binary
    pub fn builtin(root: &Path) -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_CATALOG, root, Path::new("<builtin>"))
    }

    /// Pick the catalog for a run
    ///
    /// An explicit file wins, then `<root>/debforge.toml`, then the
    /// built-in catalog.
    pub fn locate(explicit: Option<&Path>, root: &Path) -> Result<Self, CatalogError> {
        if let Some(path) = explicit {
            tracing::debug!("Using catalog {}", path.display());
            return Self::load(path, root);
        }

        let in_root: PathBuf = root.join(CATALOG_FILE);
        if in_root.is_file() {
            tracing::debug!("Using catalog {}", in_root.display());
            return Self::load(&in_root, root);
        }

        tracing::debug!("Using built-in catalog");
        Self::builtin(root)
    }

    /// Every package name: standard first, then special
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.standard
            .iter()
            .map(String::as_str)
            .chain(self.special.iter().map(PackageDescriptor::name))
    }

    /// Whether `name` is in either collection
    pub fn contains(&self, name: &str) -> bool {
        self.standard.iter().any(|n| n == name) || self.special.iter().any(|p| p.name() == name)
    }

    /// Descriptor for `name`, looked up among standard names first
    pub fn lookup(&self, name: &str) -> Option<PackageDescriptor> {
        if self.standard.iter().any(|n| n == name) {
            return self.materialize(name);
        }
        self.special.iter().find(|p| p.name() == name).cloned()
    }

    /// Descriptors for every package: standard first, then special
    pub fn descriptors(&self) -> Vec<PackageDescriptor> {
        self.standard
            .iter()
            .filter_map(|name| self.materialize(name))
            .chain(self.special.iter().cloned())
            .collect()
    }

    fn materialize(&self, name: &str) -> Option<PackageDescriptor> {
        // Names were validated when the catalog was loaded
        PackageDescriptor::standard(name, &self.context).ok()
    }
}
