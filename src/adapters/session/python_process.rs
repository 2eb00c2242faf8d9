//! Python Process Session Adapter
//!
//! Hosts the bot in a long-lived Python interpreter spawned as a child
//! process. A small driver program reads one JSON request per line on stdin,
//! executes it in a persistent global namespace, and answers with one JSON
//! line on stdout:
//!
//! ```text
//! -> {"mode": "eval", "code": "'my_bot' in globals()"}
//! <- {"ok": true, "result": "True"}
//! -> {"mode": "eval", "code": "my_bot.query(question='...')"}
//! <- {"ok": false, "kind": "NameError", "message": "name 'my_bot' is not defined"}
//! ```
//!
//! Anything the bot prints is redirected to stderr so it cannot corrupt the
//! protocol. String results are returned as-is; other values as their `repr`.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;

use crate::domain::foundation::ScriptSessionId;
use crate::domain::script::{ScriptCommand, ScriptMode};
use crate::ports::{ScriptError, ScriptingSession};

const DRIVER: &str = r#"
import json
import sys

_bridge_out = sys.stdout
sys.stdout = sys.stderr
_bridge_globals = {'__name__': '__main__', '__builtins__': __builtins__}

for _bridge_line in sys.stdin:
    try:
        _bridge_req = json.loads(_bridge_line)
        _bridge_code = compile(_bridge_req['code'], '<bridge>', _bridge_req['mode'])
        if _bridge_req['mode'] == 'eval':
            _bridge_val = eval(_bridge_code, _bridge_globals)
            _bridge_res = _bridge_val if isinstance(_bridge_val, str) else repr(_bridge_val)
        else:
            exec(_bridge_code, _bridge_globals)
            _bridge_res = None
        _bridge_reply = {'ok': True, 'result': _bridge_res}
    except BaseException as _bridge_err:
        _bridge_reply = {'ok': False, 'kind': type(_bridge_err).__name__, 'message': str(_bridge_err)}
    _bridge_out.write(json.dumps(_bridge_reply) + '\n')
    _bridge_out.flush()
"#;

/// Settings for spawning the interpreter.
#[derive(Debug, Clone)]
pub struct PythonSessionConfig {
    /// Interpreter executable.
    pub python_path: String,
    /// Per-command limit. `None` waits indefinitely.
    pub command_timeout: Option<Duration>,
    /// Initial working directory of the interpreter.
    pub working_directory: Option<PathBuf>,
}

impl Default for PythonSessionConfig {
    fn default() -> Self {
        Self {
            python_path: "python3".to_string(),
            command_timeout: None,
            working_directory: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriverReply {
    ok: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

struct ProcessIo {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    terminated: bool,
    /// Set while a request is written but its reply not yet read.
    in_flight: bool,
}

/// A scripting session backed by a Python child process.
///
/// Dropping a command future after its request was sent stops the
/// interpreter: the next command fails with `Transport` instead of reading
/// the abandoned reply.
pub struct PythonProcessSession {
    id: ScriptSessionId,
    io: Mutex<ProcessIo>,
    command_timeout: Option<Duration>,
}

impl std::fmt::Debug for PythonProcessSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonProcessSession")
            .field("id", &self.id)
            .field("command_timeout", &self.command_timeout)
            .finish_non_exhaustive()
    }
}

impl PythonProcessSession {
    /// Starts the interpreter and the driver loop.
    pub async fn spawn(config: &PythonSessionConfig) -> Result<Self, ScriptError> {
        let mut command = Command::new(&config.python_path);
        command
            .args(["-u", "-c", DRIVER])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &config.working_directory {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| {
            ScriptError::Transport(format!("Failed to start {}: {}", config.python_path, e))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScriptError::Transport("interpreter stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScriptError::Transport("interpreter stdout unavailable".to_string()))?;

        let id = ScriptSessionId::new();
        tracing::info!(session_id = %id, python = %config.python_path, "Started Python session");

        Ok(Self {
            id,
            io: Mutex::new(ProcessIo {
                child,
                stdin,
                stdout: BufReader::new(stdout),
                terminated: false,
                in_flight: false,
            }),
            command_timeout: config.command_timeout,
        })
    }

    /// Stops the interpreter. Later commands fail with a transport error.
    pub async fn shutdown(&self) -> Result<(), ScriptError> {
        let mut io = self.io.lock().await;
        if io.terminated {
            return Ok(());
        }
        io.terminated = true;
        io.child
            .kill()
            .await
            .map_err(|e| ScriptError::Transport(format!("Failed to stop interpreter: {}", e)))?;
        tracing::info!(session_id = %self.id, "Stopped Python session");
        Ok(())
    }

    async fn exchange(&self, command: &ScriptCommand) -> Result<Option<String>, ScriptError> {
        let mode = match command.mode() {
            ScriptMode::Eval => "eval",
            ScriptMode::Exec => "exec",
        };
        let request = serde_json::json!({ "mode": mode, "code": command.render() });
        let mut line = serde_json::to_string(&request)
            .map_err(|e| ScriptError::Transport(format!("Failed to encode request: {}", e)))?;
        line.push('\n');

        let mut io = self.io.lock().await;
        if io.terminated {
            return Err(ScriptError::Transport("interpreter is no longer running".to_string()));
        }
        if io.in_flight {
            // An earlier command was cancelled mid-exchange; its reply would be read as ours.
            io.terminated = true;
            let _ = io.child.start_kill();
            tracing::warn!(session_id = %self.id, "Cancelled command left the stream desynchronised; interpreter stopped");
            return Err(ScriptError::Transport(
                "interpreter stream desynchronised by a cancelled command".to_string(),
            ));
        }

        tracing::debug!(session_id = %self.id, command = command.label(), "Sending command");
        let outcome = match self.command_timeout {
            Some(limit) => tokio::time::timeout(limit, round_trip(&mut *io, &line))
                .await
                .map_err(|_| limit),
            None => Ok(round_trip(&mut *io, &line).await),
        };

        let reply = match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                io.terminated = true;
                return Err(e);
            }
            Err(limit) => {
                // A late reply would desynchronise the stream.
                io.terminated = true;
                let _ = io.child.start_kill();
                tracing::warn!(session_id = %self.id, "Command timed out; interpreter stopped");
                return Err(ScriptError::Timeout(limit.as_secs()));
            }
        };

        if reply.ok {
            Ok(reply.result)
        } else {
            Err(ScriptError::execution(
                reply.kind.unwrap_or_else(|| "Exception".to_string()),
                reply.message.unwrap_or_default(),
            ))
        }
    }
}

async fn round_trip(io: &mut ProcessIo, line: &str) -> Result<DriverReply, ScriptError> {
    io.in_flight = true;
    io.stdin
        .write_all(line.as_bytes())
        .await
        .map_err(|e| ScriptError::Transport(format!("Failed to write to interpreter: {}", e)))?;
    io.stdin
        .flush()
        .await
        .map_err(|e| ScriptError::Transport(format!("Failed to flush interpreter stdin: {}", e)))?;

    let mut response = String::new();
    let read = io
        .stdout
        .read_line(&mut response)
        .await
        .map_err(|e| ScriptError::Transport(format!("Failed to read from interpreter: {}", e)))?;
    if read == 0 {
        return Err(ScriptError::Transport("interpreter exited".to_string()));
    }

    io.in_flight = false;
    serde_json::from_str(&response)
        .map_err(|e| ScriptError::UnexpectedOutput(format!("{}: {}", e, response.trim())))
}

#[async_trait]
impl ScriptingSession for PythonProcessSession {
    fn session_id(&self) -> ScriptSessionId {
        self.id
    }

    async fn run(&self, command: &ScriptCommand) -> Result<String, ScriptError> {
        Ok(self
            .exchange(command)
            .await?
            .unwrap_or_else(|| "None".to_string()))
    }

    async fn run_no_result(&self, command: &ScriptCommand) -> Result<(), ScriptError> {
        self.exchange(command).await.map(|_| ())
    }
}
