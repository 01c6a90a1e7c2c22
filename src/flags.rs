use crate::error::ShellError;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: Vec<Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub name: &'static str,
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn new(name: &'static str, short: &'static str, long: &'static str, description: &'static str) -> Self {
        Flag {
            name,
            short,
            long,
            description,
            takes_value: false,
            value: None,
        }
    }

    fn with_value(mut self) -> Self {
        self.takes_value = true;
        self
    }

    fn matches(&self, arg: &str) -> bool {
        arg == self.short || arg == self.long
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let flags = vec![
            Flag::new("help", "-h", "--help", "Print this help message"),
            Flag::new("version", "-v", "--version", "Show version information"),
            Flag::new("quiet", "-q", "--quiet", "Suppress diagnostics"),
            Flag::new("debug", "-d", "--debug", "Trace each stage of line processing"),
            Flag::new("raw", "-r", "--raw", "Use the built-in raw-mode line editor"),
            Flag::new("config", "-c", "--config", "Run this startup file instead of ~/.pyroshellrc")
                .with_value(),
        ];

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let flag = self
                .flags
                .iter_mut()
                .find(|flag| flag.matches(arg))
                .ok_or_else(|| ShellError::FlagError(format!("unknown option {}", arg)))?;

            if flag.takes_value {
                let value = args
                    .next()
                    .ok_or_else(|| ShellError::FlagError(format!("Flag {} requires a value", arg)))?;
                flag.value = Some(value.clone());
            } else {
                flag.value = Some("true".to_string());
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: pyroshell [OPTIONS]");
        println!("\nOptions:");
        for flag in &self.flags {
            let long = if flag.takes_value {
                format!("{} <PATH>", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {}, {:<17} {}", flag.short, long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_and_long_forms() {
        let mut flags = Flags::new();
        flags.parse(&args(&["-q", "--debug", "-r"])).unwrap();
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("debug"));
        assert!(flags.is_set("raw"));
        assert!(!flags.is_set("help"));
        assert!(!flags.is_set("version"));
    }

    #[test]
    fn test_config_takes_value() {
        let mut flags = Flags::new();
        flags.parse(&args(&["-c", "/tmp/rc", "-q"])).unwrap();
        assert_eq!(flags.get_value("config").map(String::as_str), Some("/tmp/rc"));
        assert!(flags.is_set("quiet"));

        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["--config"])),
            Err(ShellError::FlagError(_))
        ));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut flags = Flags::new();
        let err = flags.parse(&args(&["--frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("--frobnicate"));
    }
}
