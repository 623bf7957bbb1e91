//! String-only path arithmetic. Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Express `path` relative to `base_dir`.
///
/// Relative inputs, a missing base, or paths with no common root (different drives) come back
/// verbatim.
pub fn relative_to(path: &str, base_dir: Option<&Path>) -> String {
    let Some(base) = base_dir else {
        return path.to_string();
    };
    let target = Path::new(path);
    if !target.is_absolute() || !base.is_absolute() {
        return path.to_string();
    }

    let target = normalize_lexically(target);
    let base = normalize_lexically(base);
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return path.to_string();
    }

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &target_parts[common..] {
        out.push(part.as_os_str());
    }
    if out.as_os_str().is_empty() {
        return ".".to_string();
    }
    out.to_string_lossy().into_owned()
}

/// Resolve a stored path against `base_dir`. Absolute paths and empty strings pass through.
pub fn resolve_against(path: &str, base_dir: &Path) -> String {
    if path.is_empty() || Path::new(path).is_absolute() {
        return path.to_string();
    }
    normalize_lexically(&base_dir.join(path))
        .to_string_lossy()
        .into_owned()
}

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above a root; leading `..` of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}
