//! Default configuration values

/// Directory under the repository root holding package working copies
pub const PACKAGES_DIR: &str = "packages";

/// Catalog file looked up in the repository root
pub const CATALOG_FILE: &str = "debforge.toml";

/// Default Debian packaging command, run inside the working copy
pub const DEFAULT_BUILD_COMMAND: &str = "dpkg-buildpackage -rfakeroot -b -us -uc";

/// Catalog compiled into the binary, used when no catalog file is found
pub const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.toml");

/// Placeholder expanded to the repository root in custom build commands
pub const ROOT_PLACEHOLDER: &str = "{root}";

/// Placeholder expanded to the package working copy in custom build commands
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Tools every run shells out to
pub const REQUIRED_TOOLS: &[&str] = &["git"];
