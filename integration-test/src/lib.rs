//! Test driver for abox integration tests.
//!
//! Spawns a binary with:
//! - stdin: a pipe the test feeds with `feed` and closes with `close_stdin`
//! - stdout, stderr: pipes drained by background threads for assertions

use std::io::Read;
use std::os::fd::{AsRawFd, OwnedFd};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use nix::fcntl::OFlag;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

/// A running child process.
pub struct TestSession {
    child: Child,
    /// Write end of the child's stdin, until closed.
    stdin: Option<OwnedFd>,
    stdout_capture: Arc<Mutex<Vec<u8>>>,
    stderr_capture: Arc<Mutex<Vec<u8>>>,
    _stdout_thread: thread::JoinHandle<()>,
    _stderr_thread: thread::JoinHandle<()>,
}

fn drain<R: Read + Send + 'static>(
    mut from: R,
    what: &'static str,
) -> (Arc<Mutex<Vec<u8>>>, thread::JoinHandle<()>) {
    let capture = Arc::new(Mutex::new(Vec::new()));
    let cap = Arc::clone(&capture);
    let handle = thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match from.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => cap.lock().unwrap().extend_from_slice(&buf[..n]),
                Err(e) => {
                    eprintln!("{what} drain error: {e}");
                    break;
                }
            }
        }
    });
    (capture, handle)
}

impl TestSession {
    /// Spawn `binary` with `args` and extra environment `env`.
    pub fn spawn(
        binary: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> std::io::Result<TestSession> {
        // No child may inherit the write end.
        let (stdin_read, stdin_write) =
            nix::unistd::pipe2(OFlag::O_CLOEXEC).map_err(std::io::Error::from)?;

        let mut cmd = Command::new(binary);
        cmd.args(args);
        // Logging goes to stderr; keep it out of assertions unless asked for.
        cmd.env_remove("ABOX_LOG").env_remove("DEBUG");
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::from(stdin_read));
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;
        let (stdout_capture, stdout_thread) = drain(child.stdout.take().unwrap(), "stdout");
        let (stderr_capture, stderr_thread) = drain(child.stderr.take().unwrap(), "stderr");

        Ok(TestSession {
            child,
            stdin: Some(stdin_write),
            stdout_capture,
            stderr_capture,
            _stdout_thread: stdout_thread,
            _stderr_thread: stderr_thread,
        })
    }

    /// Write all of `data` to the child's stdin.
    pub fn feed(&mut self, data: &[u8]) {
        let fd = self.stdin.as_ref().expect("stdin already closed");
        let n = abox_utils::write_all(fd.as_raw_fd(), data)
            .expect("failed to write to child stdin");
        assert_eq!(n, data.len());
    }

    pub fn close_stdin(&mut self) {
        self.stdin = None;
    }

    pub fn signal(&self, sig: Signal) {
        kill(Pid::from_raw(self.child.id() as i32), sig).expect("failed to signal child");
    }

    fn finish(mut self) -> (std::process::ExitStatus, SessionOutput) {
        self.stdin = None;
        let status = self.child.wait().expect("failed to wait for child");

        // The drain threads end once the child's pipes close.
        let _ = self._stdout_thread.join();
        let _ = self._stderr_thread.join();

        let stdout = self.stdout_capture.lock().unwrap().clone();
        let stderr = String::from_utf8_lossy(&self.stderr_capture.lock().unwrap()).to_string();
        (status, SessionOutput { stdout, stderr })
    }

    /// Wait for the child to exit and assert the exit code.
    pub fn wait_exit(self, expected_code: i32) -> SessionOutput {
        let (status, output) = self.finish();
        let code = status.code().unwrap_or(-1);
        assert_eq!(
            code,
            expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{}\nstderr:\n{}",
            output.stdout_str(),
            output.stderr
        );
        output
    }

    /// Wait for the child and assert it was killed by `sig`.
    pub fn wait_signaled(self, sig: Signal) -> SessionOutput {
        use std::os::unix::process::ExitStatusExt;

        let (status, output) = self.finish();
        assert_eq!(status.signal(), Some(sig as i32), "child status was {status:?}");
        output
    }
}

/// Output captured from a completed session.
pub struct SessionOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl SessionOutput {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }
}
