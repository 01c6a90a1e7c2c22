use std::ffi::{CString, OsStr};
use std::io;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use super::{ProcessError, STATUS_NOT_EXECUTABLE, STATUS_NOT_FOUND};
use crate::core::env::EnvironmentStore;
use crate::input::completer::is_executable;

/// Looks `program` up the way `execvp` would: names with a `/` are taken as
/// paths, anything else is searched for in `search_path`, first match wins.
pub fn resolve_program(program: &str, search_path: Option<&str>) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.contains('/') {
        return Some(PathBuf::from(program));
    }

    std::env::split_paths(search_path?)
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(program)
            } else {
                dir.join(program)
            }
        })
        .find(|candidate| is_executable(candidate))
}

/// Foreground runner for external programs: fork, exec in the child, wait in
/// the parent.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Runs `args` to completion and returns its exit status. A child killed
    /// by a signal reports `128 + signal`.
    pub fn run(&self, args: &[String], env: &EnvironmentStore) -> Result<i32, ProcessError> {
        let name = args.first().ok_or(ProcessError::EmptyCommand)?;
        let program = resolve_program(name, env.search_path());
        let spawn = SpawnArgs::new(name, program.as_deref(), args, env)?;

        // SAFETY: the child only calls execve, write and _exit on memory
        // prepared before the fork.
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(ProcessError::ForkFailed(io::Error::last_os_error())),
            0 => spawn.exec(),
            pid => wait_for(pid),
        }
    }
}

/// NUL-terminated argv/envp arrays, built in the parent so the child does
/// not allocate. Dropped right after the fork in the parent.
struct SpawnArgs {
    program: CString,
    _argv: Vec<CString>,
    _envp: Vec<CString>,
    argv_ptrs: Vec<*const c_char>,
    envp_ptrs: Vec<*const c_char>,
    resolved: bool,
    not_found_msg: Vec<u8>,
    exec_failed_msg: Vec<u8>,
}

impl SpawnArgs {
    fn new(
        name: &str,
        program: Option<&Path>,
        args: &[String],
        env: &EnvironmentStore,
    ) -> Result<Self, ProcessError> {
        let resolved = program.is_some();
        let program_bytes = program.map_or(OsStr::new(name), Path::as_os_str).as_bytes();
        let program = c_string(program_bytes)?;
        let argv = args
            .iter()
            .map(|arg| c_string(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        let envp = env
            .snapshot()
            .into_iter()
            .map(|(key, value)| c_string(format!("{}={}", key, value).as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;

        let argv_ptrs = null_terminated(&argv);
        let envp_ptrs = null_terminated(&envp);

        Ok(Self {
            program,
            _argv: argv,
            _envp: envp,
            argv_ptrs,
            envp_ptrs,
            resolved,
            not_found_msg: format!("pyroshell: command not found: {}\n", name).into_bytes(),
            exec_failed_msg: format!("pyroshell: cannot execute: {}\n", name).into_bytes(),
        })
    }

    /// Replaces the child's image; only returns control by exiting. A name
    /// that did not resolve is never handed to execve, which would look it up
    /// relative to the working directory.
    fn exec(&self) -> ! {
        if !self.resolved {
            Self::fail(&self.not_found_msg, STATUS_NOT_FOUND);
        }

        // SAFETY: every pointer refers to a live CString owned by `self`, and
        // both arrays end in a null pointer.
        unsafe {
            libc::execve(
                self.program.as_ptr(),
                self.argv_ptrs.as_ptr(),
                self.envp_ptrs.as_ptr(),
            );
        }

        match io::Error::last_os_error().raw_os_error() {
            Some(libc::ENOENT) => Self::fail(&self.not_found_msg, STATUS_NOT_FOUND),
            _ => Self::fail(&self.exec_failed_msg, STATUS_NOT_EXECUTABLE),
        }
    }

    fn fail(msg: &[u8], status: i32) -> ! {
        // SAFETY: plain write(2) of an owned buffer, then _exit without
        // running the parent's destructors.
        unsafe {
            libc::write(libc::STDERR_FILENO, msg.as_ptr().cast(), msg.len());
            libc::_exit(status)
        }
    }
}

fn c_string(bytes: &[u8]) -> Result<CString, ProcessError> {
    CString::new(bytes)
        .map_err(|_| ProcessError::InvalidArgument(String::from_utf8_lossy(bytes).into_owned()))
}

fn null_terminated(strings: &[CString]) -> Vec<*const c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr())
        .chain(std::iter::once(std::ptr::null()))
        .collect()
}

fn wait_for(pid: libc::pid_t) -> Result<i32, ProcessError> {
    let mut status: libc::c_int = 0;
    loop {
        // SAFETY: `status` is a valid out-pointer for the duration of the call.
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        if rc == pid {
            break;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(ProcessError::WaitFailed(err));
        }
    }

    if libc::WIFEXITED(status) {
        Ok(libc::WEXITSTATUS(status))
    } else if libc::WIFSIGNALED(status) {
        Ok(128 + libc::WTERMSIG(status))
    } else {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn env_with(extra: &[(&str, &str)]) -> EnvironmentStore {
        let mut env = EnvironmentStore::from_vars([("PATH", "/usr/bin:/bin")]);
        for (k, v) in extra {
            env.set(k, v).unwrap();
        }
        env
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_program() {
        assert_eq!(resolve_program("./local", None), Some(PathBuf::from("./local")));
        assert_eq!(resolve_program("", Some("/bin")), None);
        assert_eq!(resolve_program("sh", None), None);

        let found = resolve_program("sh", Some("/does/not/exist:/bin:/usr/bin"));
        assert!(found.is_some_and(|p| p.ends_with("sh")));
        assert_eq!(resolve_program("pyro-no-such-program", Some("/bin:/usr/bin")), None);
    }

    #[test]
    fn test_exit_status_is_collected() {
        let runner = ProcessRunner::new();
        let env = env_with(&[]);
        assert_eq!(runner.run(&args(&["sh", "-c", "exit 0"]), &env).unwrap(), 0);
        assert_eq!(runner.run(&args(&["sh", "-c", "exit 3"]), &env).unwrap(), 3);
    }

    #[test]
    fn test_child_sees_store_environment() {
        let runner = ProcessRunner::new();
        let env = env_with(&[("X", "1")]);
        let status = runner
            .run(&args(&["sh", "-c", "test \"$X\" = 1"]), &env)
            .unwrap();
        assert_eq!(status, 0);
    }

    #[test]
    fn test_missing_program_exits_not_found() {
        let runner = ProcessRunner::new();
        let status = runner
            .run(&args(&["pyro-no-such-program"]), &env_with(&[]))
            .unwrap();
        assert_eq!(status, STATUS_NOT_FOUND);
    }

    #[test]
    fn test_working_directory_is_not_searched() {
        let _cwd = crate::CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let tool = dir.path().join("pyro_cwd_tool");
        fs::write(&tool, format!("#!/bin/sh\ntouch {}\n", marker.display())).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let env = env_with(&[]);
        let resolved = resolve_program("pyro_cwd_tool", env.search_path());
        let status = ProcessRunner::new().run(&args(&["pyro_cwd_tool"]), &env);
        std::env::set_current_dir(original).unwrap();

        assert_eq!(resolved, None);
        assert_eq!(status.unwrap(), STATUS_NOT_FOUND);
        assert!(!marker.exists());

        // A name with a slash is taken as a path.
        let status = ProcessRunner::new()
            .run(&args(&[tool.to_str().unwrap()]), &env)
            .unwrap();
        assert_eq!(status, 0);
        assert!(marker.exists());
    }

    #[test]
    fn test_interior_nul_is_rejected_before_fork() {
        let runner = ProcessRunner::new();
        let result = runner.run(&args(&["echo", "a\0b"]), &env_with(&[]));
        assert!(matches!(result, Err(ProcessError::InvalidArgument(_))));
        assert!(matches!(
            runner.run(&[], &env_with(&[])),
            Err(ProcessError::EmptyCommand)
        ));
    }
}
