use crate::error::RigupError;
use crate::utils::interrupt;
use crate::utils::privilege::{Identity, Privileges};
use std::env;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{self, Child, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which identity a command runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privilege {
    #[default]
    User,
    Elevated,
}

/// One external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
    working_dir: Option<PathBuf>,
    privilege: Privilege,
}

impl Command {
    /// A command run as the invoking user
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            working_dir: None,
            privilege: Privilege::User,
        }
    }

    /// A command run with superuser rights
    pub fn elevated<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            privilege: Privilege::Elevated,
            ..Self::new(tokens)
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    pub fn is_elevated(&self) -> bool {
        self.privilege == Privilege::Elevated
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .tokens
            .iter()
            .map(|t| {
                if t.is_empty() || t.contains(char::is_whitespace) {
                    format!("'{}'", t)
                } else {
                    t.clone()
                }
            })
            .collect();

        if self.is_elevated() {
            write!(f, "[root] {}", rendered.join(" "))
        } else {
            write!(f, "{}", rendered.join(" "))
        }
    }
}

/// Exit code and combined output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub code: i32,
    pub output: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Turn a non-zero exit into a typed failure
    pub fn check(self, command: &Command) -> Result<ExecutionResult, RigupError> {
        if self.success() {
            Ok(self)
        } else {
            Err(RigupError::CommandFailure {
                command: command.to_string(),
                code: self.code,
                output: self.output,
            })
        }
    }
}

/// Knobs for how commands are run
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// Forward child output to our stdout as it arrives
    pub echo: bool,
    pub timeout: Option<Duration>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            echo: true,
            timeout: None,
        }
    }
}

/// Runs commands, streaming their output and honouring the privilege flag
pub struct Executor {
    privileges: Privileges,
    default_dir: PathBuf,
    options: ExecOptions,
    interrupted: fn() -> bool,
}

impl Executor {
    pub fn new(privileges: Privileges, options: ExecOptions) -> Self {
        Self {
            privileges,
            default_dir: default_working_dir(),
            options,
            interrupted: interrupt::is_interrupted,
        }
    }

    #[cfg(test)]
    fn with_interrupt_check(mut self, check: fn() -> bool) -> Self {
        self.interrupted = check;
        self
    }

    pub fn privileges(&self) -> &Privileges {
        &self.privileges
    }

    /// Run a command to completion.
    ///
    /// A non-zero exit is returned as data in [`ExecutionResult`]; errors are
    /// reserved for commands that could not run or were cut short.
    pub fn execute(&self, command: &Command) -> Result<ExecutionResult, RigupError> {
        if command.tokens().is_empty() {
            return Err(RigupError::Spawn {
                command: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
            });
        }

        let dir = command.working_dir().unwrap_or(&self.default_dir);
        log::debug!("Executing: {} (in {})", command, dir.display());

        match command.privilege() {
            Privilege::Elevated => {
                let _guard = self.privileges.elevate()?;
                self.run(command, dir, None)
            }
            Privilege::User => self.run(command, dir, self.privileges.user_child_identity()),
        }
    }

    fn run(
        &self,
        command: &Command,
        dir: &Path,
        run_as: Option<&Identity>,
    ) -> Result<ExecutionResult, RigupError> {
        let mut process = process::Command::new(command.program());
        process
            .args(command.args())
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let spawned = match run_as {
            Some(identity) => {
                apply_identity(&mut process, identity);
                // setuid in the child needs a root parent
                let _guard = self.privileges.elevate()?;
                process.spawn()
            }
            None => process.spawn(),
        };

        let mut child = spawned.map_err(|source| RigupError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_line_reader(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_line_reader(stderr, tx.clone()));
        }
        drop(tx);

        let started = Instant::now();
        let mut captured = Vec::new();
        let mut console = io::stdout();

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    if self.options.echo {
                        let _ = console.write_all(&line);
                        let _ = console.flush();
                    }
                    captured.extend_from_slice(&line);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if (self.interrupted)() {
                kill(&mut child);
                return Err(RigupError::Interrupted);
            }
            if let Some(limit) = self.options.timeout {
                if started.elapsed() >= limit {
                    kill(&mut child);
                    return Err(RigupError::Timeout {
                        command: command.to_string(),
                        secs: limit.as_secs(),
                    });
                }
            }
        }

        for reader in readers {
            let _ = reader.join();
        }

        let status = match self.options.timeout {
            Some(limit) => {
                let remaining = limit.saturating_sub(started.elapsed());
                match child.wait_timeout(remaining)? {
                    Some(status) => status,
                    None => {
                        kill(&mut child);
                        return Err(RigupError::Timeout {
                            command: command.to_string(),
                            secs: limit.as_secs(),
                        });
                    }
                }
            }
            None => child.wait()?,
        };

        // Ctrl-C reaches the child too; it may exit before the flag is seen
        if (self.interrupted)() {
            return Err(RigupError::Interrupted);
        }

        Ok(ExecutionResult {
            code: exit_code(status),
            output: String::from_utf8_lossy(&captured).into_owned(),
        })
    }
}

/// Read a stream line by line, keeping line endings, until EOF
fn spawn_line_reader<R>(stream: R, tx: Sender<Vec<u8>>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        loop {
            let mut line = Vec::new();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

#[cfg(unix)]
fn apply_identity(process: &mut process::Command, identity: &Identity) {
    use std::os::unix::process::CommandExt;

    process
        .uid(identity.uid)
        .gid(identity.gid)
        .env("HOME", &identity.home)
        .env("USER", &identity.name)
        .env("LOGNAME", &identity.name);
}

#[cfg(not(unix))]
fn apply_identity(_process: &mut process::Command, _identity: &Identity) {}

/// Directory holding the running executable
fn default_working_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Check if a command exists in PATH
pub fn command_exists(command: &str) -> bool {
    which::which(command).is_ok()
}
