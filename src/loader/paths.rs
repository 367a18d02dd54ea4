//! Volume source rewriting.
//!
//! Only `SOURCE:TARGET[:MODE]` mounts are touched; a bare container path has
//! no host side. A source starting with `.` is joined onto the working
//! directory and cleaned lexically, then a leading `~` is replaced by the
//! home directory when one is known. Nothing here touches the filesystem.

use super::PathContext;

/// Rewrite the host side of one volume mount.
pub fn resolve_volume_path(mount: &str, paths: PathContext<'_>) -> String {
    let Some((source, rest)) = mount.split_once(':') else {
        return mount.to_string();
    };

    let mut source = source.to_string();
    if source.starts_with('.') {
        source = join_clean(paths.working_dir, &source);
    }
    let source = expand_user(&source, paths.home_dir);

    format!("{}:{}", source, rest)
}

/// Replace a leading `~` with `home_dir`.
pub fn expand_user(path: &str, home_dir: Option<&str>) -> String {
    match (path.strip_prefix('~'), home_dir) {
        (Some(rest), Some(home)) => format!("{}{}", home, rest),
        _ => path.to_string(),
    }
}

/// Join two slash-separated paths and clean the result.
///
/// Cleaning drops empty and `.` segments and folds `..` into its parent.
/// A relative result that cleans away to nothing becomes `.`.
pub fn join_clean(base: &str, relative: &str) -> String {
    let joined = match (base.is_empty(), relative.is_empty()) {
        (true, true) => return String::new(),
        (true, false) => relative.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, relative),
    };
    clean(&joined)
}

fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` above the root stays at the root.
                _ if rooted => {}
                _ => segments.push(".."),
            },
            name => segments.push(name),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
