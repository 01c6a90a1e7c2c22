use std::{
    env, fs,
    os::unix::fs::PermissionsExt,
    path::Path,
};

const OWNER_EXECUTE: u32 = 0o100;

/// Executables on the search path whose names start with `prefix`, each with
/// a trailing space so the next word can be typed right away.
pub fn complete_command(prefix: &str, search_path: Option<&str>, matches: &mut Vec<String>) {
    let Some(search_path) = search_path else {
        return;
    };

    for dir in env::split_paths(search_path) {
        add_dir_matches(&dir, prefix, matches);
    }
}

fn add_dir_matches(dir: &Path, prefix: &str, matches: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name.starts_with(prefix) && is_executable(&entry.path()) {
            matches.push(format!("{} ", name));
        }
    }
}

/// Regular file (after following links) with the owner execute bit set.
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & OWNER_EXECUTE != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn make_file(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        File::create(&path).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_only_owner_executable_files_match() {
        let dir = tempfile::tempdir().unwrap();
        make_file(dir.path(), "lsx", 0o755);
        make_file(dir.path(), "lsdata", 0o644);
        fs::create_dir(dir.path().join("lsdir")).unwrap();

        let mut matches = Vec::new();
        complete_command("ls", dir.path().to_str(), &mut matches);
        assert_eq!(matches, vec!["lsx ".to_string()]);
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        make_file(dir.path(), "tool", 0o700);
        let search_path = format!("/does/not/exist:{}", dir.path().display());

        let mut matches = Vec::new();
        complete_command("to", Some(&search_path), &mut matches);
        assert_eq!(matches, vec!["tool ".to_string()]);

        let mut none = Vec::new();
        complete_command("to", None, &mut none);
        assert!(none.is_empty());
    }
}
