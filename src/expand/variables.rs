use std::borrow::Cow;

use crate::core::env::EnvironmentStore;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replaces `$NAME` and `${NAME}` with their values.
///
/// Unknown names, a lone `$` and an unterminated `${` are copied through
/// verbatim. Substituted values are not scanned again.
pub fn expand_variables<'a>(line: &'a str, env: &EnvironmentStore) -> Cow<'a, str> {
    if !line.contains('$') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (name, consumed) = match after.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(close) if braced[..close].chars().all(is_name_char) => {
                    (&braced[..close], close + 2)
                }
                _ => ("", 0),
            },
            None => {
                let len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
                (&after[..len], len)
            }
        };

        match env.get(name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[dollar..dollar + 1 + consumed]),
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    Cow::Owned(out)
}
