//! Git command construction and repository discovery
//!
//! Clone and reset are run through the `git` client as shell commands so
//! their output streams into the build log like any other step. Locating
//! the repository root and its HEAD revision uses the gix crate.

use std::path::{Path, PathBuf};

/// Revision meaning "whatever the current branch points at"
pub const HEAD: &str = "HEAD";

/// Revision reported when the root is not a git repository
pub const UNKNOWN_REVISION: &str = "unknown";

/// Git reference type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRef {
    /// Git tag (e.g., "v1.0.0")
    Tag(String),
    /// Git branch (e.g., "master")
    Branch(String),
}

impl std::fmt::Display for GitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(s) => write!(f, "tag:{s}"),
            Self::Branch(s) => write!(f, "branch:{s}"),
        }
    }
}

/// Build the `git clone` command for a fresh working copy
///
/// A tag gets a full clone checked out at the tag. A branch gets a depth-1
/// clone of that branch only. Anything else clones the default branch.
pub fn clone_command(url: &str, dest: &Path, git_ref: Option<&GitRef>) -> String {
    let url = quote(url);
    let dest = quote(&dest.to_string_lossy());
    match git_ref {
        Some(GitRef::Tag(tag)) => format!("git clone --branch {} {url} {dest}", quote(tag)),
        Some(GitRef::Branch(branch)) => format!(
            "git clone --depth 1 --single-branch --branch {} {url} {dest}",
            quote(branch)
        ),
        None => format!("git clone {url} {dest}"),
    }
}

/// Build the command that discards local changes and resets to `commit`
///
/// Runs inside the working copy.
pub fn reset_command(commit: &str) -> String {
    format!(
        "git reset --hard && git clean -xdff && git reset --hard {}",
        quote(commit)
    )
}

/// Quote a word for `sh` when it contains anything beyond a safe set
pub fn quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,~".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Whether `path` is the top of a git working copy
///
/// Only `path` itself is checked. A plain directory inside some other
/// repository does not count, so git commands run there would act on the
/// enclosing repository.
pub fn is_checkout(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Find the work tree of the repository containing `start`
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    let repo = gix::discover(start).ok()?;
    repo.work_dir().map(Path::to_path_buf)
}

/// HEAD commit of the repository at `root`, if it is one
pub fn head_revision(root: &Path) -> Option<String> {
    let repo = gix::open(root).ok()?;
    let id = repo.head_id().ok()?;
    Some(id.to_string())
}
