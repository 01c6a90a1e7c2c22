use std::borrow::Cow;

/// Rewrites a leading `~` against `home`.
///
/// Only a line that starts with `~` is touched. With a `/` somewhere after it,
/// the text from `~` up to that slash becomes `home` and the rest is kept;
/// without one the whole line collapses to `home`. No home leaves the line
/// as it is.
pub fn expand_tilde<'a>(line: &'a str, home: Option<&str>) -> Cow<'a, str> {
    let (Some(rest), Some(home)) = (line.strip_prefix('~'), home) else {
        return Cow::Borrowed(line);
    };

    match rest.find('/') {
        Some(slash) => Cow::Owned(format!("{}{}", home, &rest[slash..])),
        None => Cow::Owned(home.to_string()),
    }
}
