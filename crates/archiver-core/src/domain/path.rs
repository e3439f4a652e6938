//! Vault path normalization.
//!
//! Vault paths are relative, `/`-separated strings. The vault root is `/`.

/// The root path of a vault.
pub const ROOT: &str = "/";

/// Normalize a vault path.
///
/// - surrounding whitespace is trimmed
/// - `\` becomes `/`
/// - empty and `.` segments are dropped (collapses `//`)
/// - leading and trailing `/` are stripped
///
/// An empty result is the root path `/`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let joined = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        ROOT.to_string()
    } else {
        joined
    }
}

/// Is this the vault root (or something that normalizes to it)?
pub fn is_root(path: &str) -> bool {
    normalize_path(path) == ROOT
}

/// Join a folder and a file name. Joining onto the root yields the bare name.
pub fn join(folder: &str, name: &str) -> String {
    if is_root(folder) {
        normalize_path(name)
    } else {
        normalize_path(&format!("{folder}/{name}"))
    }
}

/// Every ancestor prefix of `path`, root-to-leaf, including `path` itself.
///
/// `"X/Y/Z"` -> `["X", "X/Y", "X/Y/Z"]`. The root has no prefixes.
pub fn prefixes(path: &str) -> Vec<String> {
    let normalized = normalize_path(path);
    if normalized == ROOT {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for segment in normalized.split('/') {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        out.push(current.clone());
    }
    out
}

/// Parent folder of a path (`/` for top-level entries).
pub fn parent(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => ROOT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Archive", "Archive")]
    #[case("Archive/", "Archive")]
    #[case("/Archive//2024/", "Archive/2024")]
    #[case("  Templates\\Archive ", "Templates/Archive")]
    #[case("./Notes/./a.md", "Notes/a.md")]
    #[case("", "/")]
    #[case("/", "/")]
    fn normalize_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(input), expected);
    }

    #[test]
    fn prefixes_are_root_to_leaf() {
        assert_eq!(prefixes("X/Y/Z"), vec!["X", "X/Y", "X/Y/Z"]);
        assert!(prefixes("/").is_empty());
    }

    #[test]
    fn join_onto_root_yields_bare_name() {
        assert_eq!(join("/", "a.md"), "a.md");
        assert_eq!(join("Archive/", "a.md"), "Archive/a.md");
    }

    #[test]
    fn parent_of_top_level_is_root() {
        assert_eq!(parent("a.md"), "/");
        assert_eq!(parent("Archive/2024/a.md"), "Archive/2024");
    }
}
