use super::EnvError;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

/// Variable name to value mapping seen by expansion and by spawned children.
///
/// The store is seeded once from the process environment and from then on is
/// the source of truth: `$NAME` lookups, `PATH` resolution and the child
/// environment all read from here rather than from `std::env`.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentStore {
    vars: HashMap<Box<str>, Box<str>>,
}

/// Letters, digits and underscore, not starting with a digit.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl EnvironmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_os() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    /// Pairs that are not valid UTF-8 cannot be expanded or edited, so they
    /// are left out.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(
            vars.into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars = vars
            .into_iter()
            .filter(|(k, _)| !k.as_ref().is_empty())
            .map(|(k, v)| (k.as_ref().into(), v.as_ref().into()))
            .collect();
        Self { vars }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::EmptyName);
        }
        self.vars.insert(name.into(), value.into());
        Ok(())
    }

    /// Sets the variable here and in the interpreter's own OS environment.
    pub fn export(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if !is_valid_name(name) {
            return Err(if name.is_empty() {
                EnvError::EmptyName
            } else {
                EnvError::InvalidName(name.to_string())
            });
        }
        self.set(name, value)?;
        env::set_var(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|v| v.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn home(&self) -> Option<&str> {
        self.get("HOME").filter(|h| !h.is_empty())
    }

    pub fn search_path(&self) -> Option<&str> {
        self.get("PATH")
    }

    /// `NAME=VALUE` pairs in name order, for materialising a child environment.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.sort();
        pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }
}

/// Splits `NAME=VALUE`, requiring a well-formed name.
pub(crate) fn parse_assignment(token: &str) -> Result<(&str, &str), EnvError> {
    let (name, value) = token
        .split_once('=')
        .ok_or_else(|| EnvError::MissingSeparator(token.to_string()))?;
    if name.is_empty() {
        return Err(EnvError::EmptyName);
    }
    if !is_valid_name(name) {
        return Err(EnvError::InvalidName(name.to_string()));
    }
    Ok((name, value))
}
