/// Sentinel path for findings with no usable location.
pub const UNKNOWN_PATH: &str = "unknown";

/// Canonicalize a location URI into a repository-relative forward-slash path.
///
/// `working_dir` is the repository root the analyzer ran in; when the URI is
/// absolute and lives under it, the prefix is removed. Top-level directory
/// names like `src` are never stripped.
pub fn normalize_path(uri: Option<&str>, working_dir: &str) -> String {
    let raw = match uri {
        Some(u) if !u.trim().is_empty() => u,
        _ => return UNKNOWN_PATH.to_string(),
    };

    let mut path = raw.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("file://") {
        path = stripped.to_string();
    }
    let mut path = path.trim_start_matches('/').to_string();

    let cwd = working_dir.replace('\\', "/");
    let cwd = cwd.trim_start_matches('/').trim_end_matches('/');
    if !cwd.is_empty() {
        if let Some(stripped) = path.strip_prefix(cwd) {
            // the prefix must end at a path segment, not inside one
            if stripped.is_empty() || stripped.starts_with('/') {
                path = stripped.trim_start_matches('/').to_string();
            }
        }
    }

    let path = path.trim().to_string();
    if path.is_empty() {
        UNKNOWN_PATH.to_string()
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_uri_yields_sentinel() {
        assert_eq!(normalize_path(None, "/repo"), UNKNOWN_PATH);
        assert_eq!(normalize_path(Some(""), "/repo"), UNKNOWN_PATH);
        assert_eq!(normalize_path(Some("   "), "/repo"), UNKNOWN_PATH);
    }

    #[test]
    fn file_scheme_and_working_dir_prefix_are_removed() {
        assert_eq!(
            normalize_path(Some("file:///home/ci/repo/src/app.js"), "/home/ci/repo"),
            "src/app.js"
        );
    }

    #[test]
    fn backslashes_become_forward_slashes() {
        assert_eq!(
            normalize_path(Some("src\\lib\\util.js"), "/repo"),
            "src/lib/util.js"
        );
    }

    #[test]
    fn relative_uri_passes_through() {
        assert_eq!(normalize_path(Some("src/app.js"), "/repo"), "src/app.js");
    }

    #[test]
    fn first_segment_is_preserved() {
        // only the working-directory prefix comes off, never a source root
        assert_eq!(
            normalize_path(Some("/home/ci/repo/src/main.rs"), "/home/ci/repo"),
            "src/main.rs"
        );
        assert_eq!(normalize_path(Some("src/main.rs"), "/other/place"), "src/main.rs");
    }

    #[test]
    fn sibling_directory_with_a_shared_prefix_is_not_stripped() {
        assert_eq!(
            normalize_path(Some("/home/ci/repository/x.js"), "/home/ci/repo"),
            "home/ci/repository/x.js"
        );
        // exact match still strips down to the sentinel
        assert_eq!(normalize_path(Some("/home/ci/repo"), "/home/ci/repo"), UNKNOWN_PATH);
    }

    #[test]
    fn leading_slashes_are_stripped_without_working_dir_match() {
        assert_eq!(normalize_path(Some("/etc/config.yml"), "/repo"), "etc/config.yml");
    }
}
