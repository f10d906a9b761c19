//! Source repository URLs

/// Namespace standard packages are cloned from when the catalog sets none
pub const DEFAULT_NAMESPACE: &str = "https://github.com/nos-packaging";
