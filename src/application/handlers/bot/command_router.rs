//! BotCommandRouter - named-command surface for hosts.
//!
//! Hosts that drive the bridge by command name (a reactor registry, a CLI,
//! a message bus) call [`BotCommandRouter::dispatch`] with the command name
//! and its string parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{LoadBotCommand, LoadBotHandler, RunQueryCommand, RunQueryHandler};
use crate::application::{BotRegistry, BotSettings};
use crate::domain::bot::BotError;
use crate::domain::foundation::CommandMetadata;
use crate::ports::{ProjectContextResolver, ScriptingSession};

/// Parameter of `RunBot` carrying the percent-encoded question.
pub const QUESTION_PARAMETER: &str = "question";

/// Commands the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotCommand {
    LoadBot,
    RunBot,
}

impl BotCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::LoadBot => "LoadBot",
            BotCommand::RunBot => "RunBot",
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BotCommand {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loadbot" => Ok(BotCommand::LoadBot),
            "runbot" => Ok(BotCommand::RunBot),
            _ => Err(BotError::UnknownCommand(s.to_string())),
        }
    }
}

/// Type tag of a command's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputKind {
    ConstString,
}

/// What a routed command returns to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub value: String,
    pub kind: OutputKind,
}

impl CommandOutput {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: OutputKind::ConstString,
        }
    }
}

/// Routes named commands to the load and query handlers of one session.
pub struct BotCommandRouter {
    load: LoadBotHandler,
    query: RunQueryHandler,
}

impl BotCommandRouter {
    pub fn new(load: LoadBotHandler, query: RunQueryHandler) -> Self {
        Self { load, query }
    }

    /// Wires both handlers to the same session, registry and settings.
    pub fn for_session(
        resolver: Arc<dyn ProjectContextResolver>,
        session: Arc<dyn ScriptingSession>,
        registry: Arc<BotRegistry>,
        settings: BotSettings,
    ) -> Self {
        let load = LoadBotHandler::new(
            resolver.clone(),
            session.clone(),
            registry.clone(),
            settings.clone(),
        );
        let query = RunQueryHandler::new(resolver, session, registry, settings);
        Self::new(load, query)
    }

    pub fn load_handler(&self) -> &LoadBotHandler {
        &self.load
    }

    pub fn query_handler(&self) -> &RunQueryHandler {
        &self.query
    }

    /// Runs the command called `name`.
    ///
    /// `LoadBot` answers `"true"` when the bot already existed and `"false"`
    /// when this call created it. `RunBot` answers with the bot's raw output.
    pub async fn dispatch(
        &self,
        name: &str,
        parameters: &HashMap<String, String>,
        metadata: CommandMetadata,
    ) -> Result<CommandOutput, BotError> {
        let command: BotCommand = name.parse()?;
        tracing::debug!(command = %command, "Dispatching bot command");

        match command {
            BotCommand::LoadBot => {
                let result = self.load.handle(LoadBotCommand::default(), metadata).await?;
                Ok(CommandOutput::string(result.existed_before.to_string()))
            }
            BotCommand::RunBot => {
                let question = parameters
                    .get(QUESTION_PARAMETER)
                    .ok_or_else(|| BotError::missing_parameter(QUESTION_PARAMETER))?;
                let result = self
                    .query
                    .handle(RunQueryCommand::new(question.clone()), metadata)
                    .await?;
                Ok(CommandOutput::string(result.into_inner()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryProjectResolver, SimulatedScriptingSession};
    use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};

    async fn router() -> (BotCommandRouter, Arc<SimulatedScriptingSession>) {
        let resolver = Arc::new(InMemoryProjectResolver::new());
        resolver
            .insert(
                ProjectId::new("test-project").unwrap(),
                "/srv/test/assets",
                HashMap::new(),
            )
            .await;
        let session = Arc::new(SimulatedScriptingSession::new().with_answer("42"));
        let router = BotCommandRouter::for_session(
            resolver,
            session.clone(),
            Arc::new(BotRegistry::new()),
            BotSettings::default(),
        );
        (router, session)
    }

    fn question(q: &str) -> HashMap<String, String> {
        HashMap::from([(QUESTION_PARAMETER.to_string(), q.to_string())])
    }

    #[test]
    fn command_names_are_case_insensitive() {
        assert_eq!("LoadBot".parse::<BotCommand>().unwrap(), BotCommand::LoadBot);
        assert_eq!("runbot".parse::<BotCommand>().unwrap(), BotCommand::RunBot);
        assert_eq!(" RUNBOT ".parse::<BotCommand>().unwrap(), BotCommand::RunBot);
    }

    #[test]
    fn output_kind_serializes_as_const_string() {
        let json = serde_json::to_string(&CommandOutput::string("x")).unwrap();
        assert_eq!(json, r#"{"value":"x","kind":"CONST_STRING"}"#);
    }

    #[tokio::test]
    async fn load_reports_whether_bot_existed() {
        let (router, _) = router().await;
        let params = HashMap::new();

        let first = router
            .dispatch("LoadBot", &params, CommandMetadata::test_fixture())
            .await
            .unwrap();
        let second = router
            .dispatch("LoadBot", &params, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(first, CommandOutput::string("false"));
        assert_eq!(second, CommandOutput::string("true"));
    }

    #[tokio::test]
    async fn run_returns_bot_output() {
        let (router, _) = router().await;
        router
            .dispatch("LoadBot", &HashMap::new(), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let output = router
            .dispatch("RunBot", &question("why%3F"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(output.value, "42");
        assert_eq!(output.kind, OutputKind::ConstString);
    }

    #[tokio::test]
    async fn run_without_question_is_missing_parameter() {
        let (router, session) = router().await;

        let err = router
            .dispatch("RunBot", &HashMap::new(), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, BotError::MissingParameter("question".to_string()));
        assert!(session.history().await.is_empty());
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::MissingParameter);
    }

    #[tokio::test]
    async fn unknown_command_is_rejected() {
        let (router, session) = router().await;

        let err = router
            .dispatch("DropBot", &HashMap::new(), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::UnknownCommand(name) if name == "DropBot"));
        assert!(session.history().await.is_empty());
    }
}
