use std::{
    fs,
    path::{Path, PathBuf},
};

/// Filesystem entries next to `incomplete`, directories marked with `/`.
///
/// The returned text keeps the directory part exactly as typed so it can be
/// spliced back over the word; only the directory that gets listed is
/// resolved (`~/` against `home`, empty against the working directory).
pub fn complete_path(incomplete: &str, home: Option<&str>, matches: &mut Vec<String>) {
    let (typed_dir, file_prefix) = split_incomplete(incomplete);
    let search_dir = resolve_search_dir(typed_dir, home);

    let Ok(entries) = fs::read_dir(&search_dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(file_prefix) {
            continue;
        }

        let marker = if entry.path().is_dir() { "/" } else { "" };
        matches.push(format!("{}{}{}", typed_dir, name, marker));
    }
}

/// Splits at the last `/`, keeping the slash with the directory part.
fn split_incomplete(incomplete: &str) -> (&str, &str) {
    match incomplete.rfind('/') {
        Some(idx) => incomplete.split_at(idx + 1),
        None => ("", incomplete),
    }
}

fn resolve_search_dir(typed_dir: &str, home: Option<&str>) -> PathBuf {
    if typed_dir.is_empty() {
        return PathBuf::from(".");
    }

    if let (Some(rest), Some(home)) = (typed_dir.strip_prefix("~/"), home) {
        return Path::new(home).join(rest);
    }

    PathBuf::from(typed_dir)
}
