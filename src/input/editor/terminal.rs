use std::io;
use std::os::unix::io::RawFd;

pub fn is_terminal(fd: RawFd) -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(fd) == 1 }
}

/// Non-canonical, no-echo input on a terminal for as long as the value lives.
/// Signal keys arrive as bytes, so Ctrl-C reaches the editor as 0x03.
///
/// The settings in force at [`RawMode::enable`] are put back on drop, so every
/// way out of the editing loop, `?` included, restores the terminal.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
}

impl RawMode {
    pub fn enable(fd: RawFd) -> io::Result<Self> {
        // SAFETY: termios is plain data; tcgetattr fills it in or fails.
        let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
        if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let original = termios;

        termios.c_lflag &= !(libc::ICANON | libc::ECHO | libc::ISIG);
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;

        // SAFETY: `termios` came from tcgetattr on the same descriptor.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // SAFETY: restores the exact settings read in `enable`.
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSANOW, &self.original);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::io::AsRawFd;

    #[test]
    fn test_regular_file_is_not_a_terminal() {
        let file = tempfile::tempfile().unwrap();
        assert!(!is_terminal(file.as_raw_fd()));
        assert!(RawMode::enable(file.as_raw_fd()).is_err());
    }

    const RAW_CLEARED: libc::tcflag_t = libc::ICANON | libc::ECHO | libc::ISIG;

    #[test]
    fn test_pty_flags_cleared_then_restored_on_drop() {
        let fds = pty::open();
        let slave = fds.1;
        let original = pty::local_flags(slave);
        assert_ne!(original & libc::ICANON, 0);

        {
            let _raw = RawMode::enable(slave).unwrap();
            assert!(is_terminal(slave));
            assert_eq!(pty::local_flags(slave) & RAW_CLEARED, 0);
        }
        assert_eq!(pty::local_flags(slave), original);

        pty::close(fds);
    }

    fn failing_step() -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "step failed"))
    }

    fn raw_then_fail(fd: RawFd) -> io::Result<()> {
        let _raw = RawMode::enable(fd)?;
        assert_eq!(pty::local_flags(fd) & RAW_CLEARED, 0);
        failing_step()?;
        Ok(())
    }

    #[test]
    fn test_pty_restored_after_early_return() {
        let fds = pty::open();
        let original = pty::local_flags(fds.1);

        assert!(raw_then_fail(fds.1).is_err());
        assert_eq!(pty::local_flags(fds.1), original);

        pty::close(fds);
    }
}
