use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. The file system is never consulted, so the result is
/// stable for paths that do not exist.
///
/// `..` at the root of an absolute path is dropped; leading `..` segments of a
/// relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Resolve `reference` against `base` and normalize. Absolute references
/// are used as-is (still normalized).
pub fn resolve(base: &Path, reference: &Path) -> PathBuf {
    if reference.is_absolute() {
        normalize(reference)
    } else {
        normalize(&base.join(reference))
    }
}
