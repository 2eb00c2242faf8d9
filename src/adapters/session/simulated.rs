//! Simulated Scripting Session
//!
//! Interprets structured commands against an in-memory namespace instead of
//! a real interpreter. Useful for testing and for exercising the bridge
//! without Python installed.
//!
//! # Features
//!
//! - Tracks which globals are bound and which engines each bot was built with
//! - Configurable query answers
//! - Failure injection for bootstrap and probe
//! - Command history for verification
//!
//! # Example
//!
//! ```ignore
//! let session = SimulatedScriptingSession::new().with_answer("42");
//! let output = session.run(&command).await?;
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::bot::{EngineBinding, EngineRole};
use crate::domain::foundation::ScriptSessionId;
use crate::domain::script::{ScriptCommand, ScriptLiteral};
use crate::ports::{ScriptError, ScriptingSession};

type Responder = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A value bound in the simulated namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedValue {
    Engine { engine_id: String },
    Bot { binding: EngineBinding, script_directory: String },
}

#[derive(Default)]
struct SimulatedState {
    globals: HashMap<String, SimulatedValue>,
    search_path: Vec<String>,
    history: Vec<ScriptCommand>,
    bootstrap_count: usize,
    bootstrap_failures: VecDeque<ScriptError>,
    probe_failures: VecDeque<ScriptError>,
    probe_output: Option<String>,
}

/// In-memory stand-in for a scripting session.
#[derive(Clone)]
pub struct SimulatedScriptingSession {
    id: ScriptSessionId,
    state: Arc<Mutex<SimulatedState>>,
    responder: Responder,
}

impl Default for SimulatedScriptingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimulatedScriptingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedScriptingSession")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl SimulatedScriptingSession {
    /// Creates an empty session whose bot echoes questions back as JSON answers.
    pub fn new() -> Self {
        Self {
            id: ScriptSessionId::new(),
            state: Arc::new(Mutex::new(SimulatedState::default())),
            responder: Arc::new(|question: &str| {
                serde_json::json!({
                    "conclusion": question,
                    "detailed_answer": format!("Simulated answer to: {}", question),
                })
                .to_string()
            }),
        }
    }

    /// Every query returns `answer`.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        self.responder = Arc::new(move |_| answer.clone());
        self
    }

    /// Queries are answered by `responder(question)`.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.responder = Arc::new(responder);
        self
    }

    /// Probes return this raw text instead of the namespace's real answer.
    pub async fn set_probe_output(&self, output: impl Into<String>) {
        self.state.lock().await.probe_output = Some(output.into());
    }

    /// The next bootstrap fails with `error` after extending the search path,
    /// leaving the namespace half set up.
    pub async fn fail_next_bootstrap(&self, error: ScriptError) {
        self.state.lock().await.bootstrap_failures.push_back(error);
    }

    /// The next probe fails with `error`.
    pub async fn fail_next_probe(&self, error: ScriptError) {
        self.state.lock().await.probe_failures.push_back(error);
    }

    /// Binds a bot directly, as if another host had bootstrapped it.
    pub async fn define_bot(&self, variable: &str, binding: EngineBinding) {
        self.state.lock().await.globals.insert(
            variable.to_string(),
            SimulatedValue::Bot {
                binding,
                script_directory: String::new(),
            },
        );
    }

    /// Drops every global, as an interpreter restart would.
    pub async fn clear_globals(&self) {
        let mut state = self.state.lock().await;
        state.globals.clear();
        state.search_path.clear();
    }

    pub async fn is_defined(&self, name: &str) -> bool {
        self.state.lock().await.globals.contains_key(name)
    }

    /// Engines the bot in `variable` was built with.
    pub async fn bot_binding(&self, variable: &str) -> Option<EngineBinding> {
        match self.state.lock().await.globals.get(variable) {
            Some(SimulatedValue::Bot { binding, .. }) => Some(binding.clone()),
            _ => None,
        }
    }

    pub async fn bootstrap_count(&self) -> usize {
        self.state.lock().await.bootstrap_count
    }

    pub async fn search_path(&self) -> Vec<String> {
        self.state.lock().await.search_path.clone()
    }

    /// All commands received, in order.
    pub async fn history(&self) -> Vec<ScriptCommand> {
        self.state.lock().await.history.clone()
    }

    /// Commands that could change the namespace (everything but probes).
    pub async fn mutation_count(&self) -> usize {
        self.state
            .lock()
            .await
            .history
            .iter()
            .filter(|c| !matches!(c, ScriptCommand::HasGlobal { .. }))
            .count()
    }

    async fn execute(&self, command: &ScriptCommand) -> Result<Option<String>, ScriptError> {
        let mut state = self.state.lock().await;
        state.history.push(command.clone());

        match command {
            ScriptCommand::HasGlobal { name } => {
                if let Some(error) = state.probe_failures.pop_front() {
                    return Err(error);
                }
                if let Some(raw) = &state.probe_output {
                    return Ok(Some(raw.clone()));
                }
                let present = state.globals.contains_key(name.as_str());
                Ok(Some(if present { "True" } else { "False" }.to_string()))
            }
            ScriptCommand::Bootstrap(script) => {
                let directory = script.script_directory();
                if !state.search_path.contains(&directory) {
                    state.search_path.push(directory.clone());
                }
                if let Some(error) = state.bootstrap_failures.pop_front() {
                    return Err(error);
                }
                for role in EngineRole::ALL {
                    state.globals.insert(
                        role.script_variable().to_string(),
                        SimulatedValue::Engine {
                            engine_id: script.binding().engine_id(role).to_string(),
                        },
                    );
                }
                state.globals.insert(
                    script.target().to_string(),
                    SimulatedValue::Bot {
                        binding: script.binding().clone(),
                        script_directory: directory,
                    },
                );
                state.bootstrap_count += 1;
                Ok(None)
            }
            ScriptCommand::CallMethod {
                target,
                method,
                kwargs,
            } => {
                match state.globals.get(target.as_str()) {
                    Some(SimulatedValue::Bot { .. }) => {}
                    Some(SimulatedValue::Engine { .. }) => {
                        return Err(ScriptError::execution(
                            "AttributeError",
                            format!("'ModelEngine' object has no attribute '{}'", method),
                        ));
                    }
                    None => {
                        return Err(ScriptError::execution(
                            "NameError",
                            format!("name '{}' is not defined", target),
                        ));
                    }
                }
                if method.as_str() != "query" {
                    return Err(ScriptError::execution(
                        "AttributeError",
                        format!("'ModelBot' object has no attribute '{}'", method),
                    ));
                }
                let question = kwargs
                    .iter()
                    .find(|(key, _)| key.as_str() == "question")
                    .map(|(_, value)| value);
                let question = match question {
                    Some(ScriptLiteral::Str(q)) => q.clone(),
                    Some(ScriptLiteral::None) | None => String::new(),
                    Some(other) => format!("{:?}", other),
                };
                drop(state);
                Ok(Some((self.responder)(&question)))
            }
        }
    }
}

#[async_trait]
impl ScriptingSession for SimulatedScriptingSession {
    fn session_id(&self) -> ScriptSessionId {
        self.id
    }

    async fn run(&self, command: &ScriptCommand) -> Result<String, ScriptError> {
        Ok(self.execute(command).await?.unwrap_or_else(|| "None".to_string()))
    }

    async fn run_no_result(&self, command: &ScriptCommand) -> Result<(), ScriptError> {
        self.execute(command).await.map(|_| ())
    }
}
