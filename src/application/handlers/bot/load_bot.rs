//! LoadBotHandler - Command handler that makes sure a bot is ready in a session.
//!
//! Idempotent: the first call for a session bootstraps the bot, later calls
//! return straight away.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{BotRegistry, BotSettings};
use crate::domain::bot::{BotError, BotHandle, BotOrigin, EngineBinding, EngineRole};
use crate::domain::foundation::{CommandMetadata, ProjectId, ScriptSessionId};
use crate::domain::script::{parse_probe, BootstrapScript, ScriptCommand};
use crate::ports::{ProjectContextResolver, ScriptingSession};

/// Command to ensure the bot exists.
#[derive(Debug, Clone, Default)]
pub struct LoadBotCommand {
    /// Probe the session even when a bot is already registered, and rebuild
    /// it if the session has lost it.
    pub verify: bool,
}

impl LoadBotCommand {
    pub fn verified() -> Self {
        Self { verify: true }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadBotResult {
    /// Whether the bot was already there before this call.
    pub existed_before: bool,
    pub handle: BotHandle,
}

/// Handler for bringing the bot up in a scripting session.
pub struct LoadBotHandler {
    resolver: Arc<dyn ProjectContextResolver>,
    session: Arc<dyn ScriptingSession>,
    registry: Arc<BotRegistry>,
    settings: BotSettings,
}

impl LoadBotHandler {
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
        cmd: LoadBotCommand,
        metadata: CommandMetadata,
    ) -> Result<LoadBotResult, BotError> {
        // 1. Resolve project before anything touches the session
        let project_id = self
            .resolver
            .resolve(metadata.context_project_id(), metadata.project_id())?;
        let session_id = self.session.session_id();

        let span = tracing::info_span!(
            "load_bot",
            project_id = %project_id,
            session_id = %session_id,
            correlation_id = %metadata.correlation_id(),
        );

        self.load(cmd, metadata, project_id, session_id)
            .instrument(span)
            .await
    }

    async fn load(
        &self,
        cmd: LoadBotCommand,
        metadata: CommandMetadata,
        project_id: ProjectId,
        session_id: ScriptSessionId,
    ) -> Result<LoadBotResult, BotError> {
        // 2. Resolve engines from project configuration
        let properties = self.resolver.get_config(&project_id).await?;
        let binding = EngineBinding::resolve(&properties, &self.settings.engine_defaults);
        for role in EngineRole::ALL.into_iter().filter(|r| binding.is_default(*r)) {
            tracing::debug!(
                role = %role,
                key = role.config_key(),
                engine_id = binding.engine_id(role),
                "Engine not configured; using default"
            );
        }

        // 3. Serialise with other loads of this session
        let slot = self.registry.slot(session_id);
        let mut registered = slot.lock().await;

        if let Some(handle) = registered.as_ref() {
            if !cmd.verify {
                tracing::debug!("Bot already registered");
                return Ok(LoadBotResult {
                    existed_before: true,
                    handle: handle.clone(),
                });
            }
        }

        // 4. Probe the session
        let probe = ScriptCommand::has_global(self.settings.variable.clone());
        let exists = parse_probe(&self.session.run(&probe).await?)?;

        if exists {
            let handle = match registered.take() {
                Some(handle) => handle,
                None => {
                    tracing::info!("Adopting bot created outside this registry");
                    BotHandle::new(
                        session_id,
                        self.settings.variable.clone(),
                        project_id.clone(),
                        binding,
                        BotOrigin::Adopted,
                    )
                }
            };
            *registered = Some(handle.clone());
            return Ok(LoadBotResult {
                existed_before: true,
                handle,
            });
        }

        if registered.take().is_some() {
            tracing::warn!("Registered bot is missing from the session; rebuilding");
        }

        // 5. Bootstrap
        let asset_directory = self.resolver.get_asset_directory(&project_id).await?;
        let script = BootstrapScript::new(
            asset_directory,
            self.settings.layout.clone(),
            binding.clone(),
            metadata.insight_id,
            self.settings.variable.clone(),
        );
        tracing::info!(script_directory = %script.script_directory(), "Bootstrapping bot");
        self.session
            .run_no_result(&ScriptCommand::Bootstrap(script))
            .await?;

        // 6. Register
        let handle = BotHandle::new(
            session_id,
            self.settings.variable.clone(),
            project_id,
            binding,
            BotOrigin::Bootstrapped,
        );
        *registered = Some(handle.clone());

        Ok(LoadBotResult {
            existed_before: false,
            handle,
        })
    }
}
