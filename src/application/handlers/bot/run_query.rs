//! RunQueryHandler - Command handler for asking the bot a question.
//!
//! The question arrives percent-encoded. It is decoded, trimmed and passed
//! to the bot's query method as a string literal; the bot's answer comes
//! back verbatim.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{BotRegistry, BotSettings};
use crate::domain::bot::{BotError, Query, QueryResult};
use crate::domain::foundation::CommandMetadata;
use crate::domain::script::{ScriptCommand, ScriptIdentifier, ScriptLiteral};
use crate::ports::{ProjectContextResolver, ScriptingSession};

/// Command to query the bot.
#[derive(Debug, Clone)]
pub struct RunQueryCommand {
    /// Percent-encoded question.
    pub question: String,
}

impl RunQueryCommand {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Handler for dispatching queries to an initialised bot.
///
/// Does not check that the bot exists. Calling it before the bot is loaded
/// surfaces the session's own `NameError`.
pub struct RunQueryHandler {
    resolver: Arc<dyn ProjectContextResolver>,
    session: Arc<dyn ScriptingSession>,
    registry: Arc<BotRegistry>,
    settings: BotSettings,
}

impl RunQueryHandler {
    pub fn new(
        resolver: Arc<dyn ProjectContextResolver>,
        session: Arc<dyn ScriptingSession>,
        registry: Arc<BotRegistry>,
        settings: BotSettings,
    ) -> Self {
        Self {
            resolver,
            session,
            registry,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: RunQueryCommand,
        metadata: CommandMetadata,
    ) -> Result<QueryResult, BotError> {
        // The project is only checked; the query itself does not depend on it
        let project_id = self
            .resolver
            .resolve(metadata.context_project_id(), metadata.project_id())?;
        let query = Query::from_encoded(&cmd.question)?;

        let session_id = self.session.session_id();
        let span = tracing::info_span!(
            "run_query",
            project_id = %project_id,
            session_id = %session_id,
            correlation_id = %metadata.correlation_id(),
        );

        async {
            let target = self.target().await;
            let command = ScriptCommand::call_method(
                target,
                self.settings.query_method.clone(),
                vec![(
                    self.settings.query_argument.clone(),
                    ScriptLiteral::from(query.as_str()),
                )],
            );
            tracing::debug!(question_len = query.as_str().len(), "Dispatching query");

            let raw = self.session.run(&command).await.map_err(|err| {
                if err.is_name_error() {
                    tracing::warn!("Query sent before the bot was loaded");
                }
                BotError::from(err)
            })?;
            Ok::<_, BotError>(QueryResult::new(raw))
        }
        .instrument(span)
        .await
    }

    async fn target(&self) -> ScriptIdentifier {
        match self.registry.get(&self.session.session_id()).await {
            Some(handle) => handle.variable,
            None => self.settings.variable.clone(),
        }
    }
}
