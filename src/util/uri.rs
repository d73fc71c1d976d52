use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Returns the directory portion of `href`, without a trailing slash.
pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

/// Returns the content base path of a package document: empty when the
/// document lives at the archive root, otherwise its directory with a trailing slash.
pub(crate) fn base_path(package_file: &str) -> String {
    match parent(package_file) {
        "" | "/" => String::new(),
        dir => format!("{dir}/"),
    }
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Splits `href` into its path and optional fragment (without `#`).
pub(crate) fn split_fragment(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (href, None),
    }
}

/// Resolves `relative` against `parent_dir`, normalizing `.` and `..`
/// segments and percent-decoding the result so it can be used as an archive entry name.
///
/// Any query or fragment is dropped.
pub(crate) fn resolve(parent_dir: &str, relative: &str) -> String {
    let main_href = relative
        .find(['?', '#'])
        .map_or(relative, |position| &relative[..position]);
    let main_href = decode(main_href.trim());

    if has_scheme(&main_href) {
        return main_href.into_owned();
    }

    let mut buf = if main_href.starts_with('/') {
        PathBuf::from(main_href.as_ref())
    } else {
        Path::new(parent_dir).join(main_href.as_ref())
    };
    normalize_href_path(&mut buf);

    // `buf` is UTF-8 as its data derives from `parent_dir` and `relative`.
    let resolved = buf.to_string_lossy().replace('\\', "/");

    match resolved.strip_prefix('/') {
        Some(stripped) => stripped.to_owned(),
        None => resolved,
    }
}

fn normalize_href_path(original: &mut PathBuf) {
    let mut stack = Vec::new();

    for component in original.components() {
        match component {
            Component::ParentDir => {
                if stack
                    .last()
                    // No content must come before the root when present.
                    .is_some_and(|component| !matches!(component, Component::RootDir))
                {
                    stack.pop();
                }
            }
            Component::CurDir => {}
            _ => stack.push(component),
        }
    }

    *original = PathBuf::from_iter(stack);
}

/// The provided `href` must not contain a fragment or query.
fn has_scheme(href: &str) -> bool {
    href.contains(':')
}
