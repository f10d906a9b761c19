//! Package selection
//!
//! Turns the catalog plus the `--build` and `--blacklist` arguments into the
//! ordered list of packages a run processes. All validation happens here,
//! before any package is touched.

use std::collections::HashSet;

use crate::core::catalog::Catalog;
use crate::core::package::PackageDescriptor;
use crate::error::SelectionError;

/// What the caller asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Explicit packages, in build order; empty means "everything"
    pub build: Vec<String>,
    /// Packages removed from the full catalog
    pub blacklist: Vec<String>,
}

/// Resolve the packages a run processes, in order
///
/// An explicit list keeps the caller's order and is not filtered by the
/// blacklist. Otherwise every standard package then every special package
/// is selected, minus the blacklist.
pub fn resolve(
    catalog: &Catalog,
    request: &SelectionRequest,
) -> Result<Vec<PackageDescriptor>, SelectionError> {
    check_blacklist(catalog, &request.blacklist)?;

    if request.build.is_empty() {
        let blacklist: HashSet<&str> = request.blacklist.iter().map(String::as_str).collect();
        return Ok(catalog
            .descriptors()
            .into_iter()
            .filter(|pkg| !blacklist.contains(pkg.name()))
            .collect());
    }

    let mut seen = HashSet::new();
    request
        .build
        .iter()
        .map(|name| {
            if !seen.insert(name.as_str()) {
                return Err(SelectionError::DuplicatePackage { name: name.clone() });
            }
            catalog
                .lookup(name)
                .ok_or_else(|| SelectionError::UnknownPackage { name: name.clone() })
        })
        .collect()
}

/// Names printed by `--list-packages`: the catalog minus the blacklist
pub fn list(catalog: &Catalog, blacklist: &[String]) -> Result<Vec<String>, SelectionError> {
    check_blacklist(catalog, blacklist)?;
    Ok(catalog
        .names()
        .filter(|name| !blacklist.iter().any(|b| b.as_str() == *name))
        .map(String::from)
        .collect())
}

fn check_blacklist(catalog: &Catalog, blacklist: &[String]) -> Result<(), SelectionError> {
    match blacklist.iter().find(|name| !catalog.contains(name)) {
        Some(name) => Err(SelectionError::UnknownBlacklisted { name: name.clone() }),
        None => Ok(()),
    }
}
