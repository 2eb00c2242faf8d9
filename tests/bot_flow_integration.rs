//! Integration tests for the load-then-query flow.
//!
//! Projects are read from a temporary directory through the filesystem
//! resolver; the bot runs in the simulated session so no interpreter is
//! needed.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use model_bot_bridge::adapters::{FilesystemProjectResolver, SimulatedScriptingSession};
use model_bot_bridge::application::{
    BotCommandRouter, BotRegistry, BotSettings, LoadBotCommand, QUESTION_PARAMETER,
};
use model_bot_bridge::domain::bot::{
    BotError, EngineRole, DEFAULT_EMBEDDING_ENGINE_ID, DEFAULT_TRANSLATE_ENGINE_ID,
};
use model_bot_bridge::domain::foundation::{CommandMetadata, DomainError, ErrorCode, InsightId, ProjectId};
use model_bot_bridge::ports::ScriptingSession;
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn write_project(root: &Path, id: &str, properties: &str) {
    fs::write(root.join(format!("{}.smss", id)), properties).unwrap();
    fs::create_dir_all(root.join(id).join("app_root/version/assets/py")).unwrap();
}

struct Harness {
    _dir: TempDir,
    root: std::path::PathBuf,
    session: Arc<SimulatedScriptingSession>,
    registry: Arc<BotRegistry>,
    router: BotCommandRouter,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    write_project(
        &root,
        "policy-bot",
        "# policy assistant\nMODEL_ENGINE_ID = policy-model\nEMBEDDING_MODEL_ID=\n",
    );
    write_project(&root, "plain-bot", "NAME=plain\n");

    let session = Arc::new(SimulatedScriptingSession::new());
    let registry = Arc::new(BotRegistry::new());
    let router = BotCommandRouter::for_session(
        Arc::new(FilesystemProjectResolver::new(&root)),
        session.clone(),
        registry.clone(),
        BotSettings::default(),
    );
    Harness {
        _dir: dir,
        root,
        session,
        registry,
        router,
    }
}

fn metadata(project: &str) -> CommandMetadata {
    CommandMetadata::new(InsightId::new()).with_project(ProjectId::new(project).unwrap())
}

fn question(q: &str) -> HashMap<String, String> {
    HashMap::from([(QUESTION_PARAMETER.to_string(), q.to_string())])
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn load_then_query_round_trip() {
    let h = harness();

    let loaded = h
        .router
        .dispatch("LoadBot", &HashMap::new(), metadata("policy-bot"))
        .await
        .unwrap();
    assert_eq!(loaded.value, "false");

    let output = h
        .router
        .dispatch("RunBot", &question("Can%20I%20expense%20taxis%3F"), metadata("policy-bot"))
        .await
        .unwrap();

    let answer: serde_json::Value = serde_json::from_str(&output.value).unwrap();
    assert_eq!(answer["conclusion"], "Can I expense taxis?");
}

#[tokio::test]
async fn engines_come_from_project_file_with_defaults_for_gaps() {
    let h = harness();

    h.router
        .dispatch("LoadBot", &HashMap::new(), metadata("policy-bot"))
        .await
        .unwrap();

    let binding = h.session.bot_binding("my_bot").await.unwrap();
    assert_eq!(binding.engine_id(EngineRole::Model), "policy-model");
    assert_eq!(binding.engine_id(EngineRole::Embedding), DEFAULT_EMBEDDING_ENGINE_ID);
    assert_eq!(binding.engine_id(EngineRole::Translate), DEFAULT_TRANSLATE_ENGINE_ID);
}

#[tokio::test]
async fn bot_files_come_from_project_assets() {
    let h = harness();

    h.router
        .dispatch("LoadBot", &HashMap::new(), metadata("plain-bot"))
        .await
        .unwrap();

    let expected = format!(
        "{}/plain-bot/app_root/version/assets/py",
        h.root.to_string_lossy().replace('\\', "/")
    );
    assert_eq!(h.session.search_path().await, vec![expected]);
}

#[tokio::test]
async fn repeated_loads_reuse_the_bot() {
    let h = harness();

    for expected in ["false", "true", "true"] {
        let output = h
            .router
            .dispatch("LoadBot", &HashMap::new(), metadata("policy-bot"))
            .await
            .unwrap();
        assert_eq!(output.value, expected);
    }
    assert_eq!(h.session.bootstrap_count().await, 1);
}

#[tokio::test]
async fn unknown_project_reports_not_found() {
    let h = harness();

    let err = h
        .router
        .dispatch("LoadBot", &HashMap::new(), metadata("missing-bot"))
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    let domain: DomainError = err.into();
    assert_eq!(domain.code, ErrorCode::ProjectNotFound);
    assert!(h.session.history().await.is_empty());
}

#[tokio::test]
async fn context_override_selects_other_project() {
    let h = harness();
    let metadata = metadata("policy-bot").with_context_project(ProjectId::new("plain-bot").unwrap());

    let result = h
        .router
        .load_handler()
        .handle(LoadBotCommand::default(), metadata)
        .await
        .unwrap();

    assert_eq!(result.handle.project_id.as_str(), "plain-bot");
    assert!(result.handle.binding.is_default(EngineRole::Model));
}

#[tokio::test]
async fn query_before_load_is_session_error() {
    let h = harness();

    let err = h
        .router
        .dispatch("RunBot", &question("hello"), metadata("policy-bot"))
        .await
        .unwrap_err();

    match err {
        BotError::SessionExecution(inner) => assert!(inner.is_name_error()),
        other => panic!("Expected SessionExecution, got {:?}", other),
    }
}

#[tokio::test]
async fn evicted_session_bootstraps_again() {
    let h = harness();
    h.router
        .dispatch("LoadBot", &HashMap::new(), metadata("policy-bot"))
        .await
        .unwrap();

    assert!(h.registry.evict(&h.session.session_id()));
    h.session.clear_globals().await;

    let output = h
        .router
        .dispatch("LoadBot", &HashMap::new(), metadata("policy-bot"))
        .await
        .unwrap();
    assert_eq!(output.value, "false");
    assert_eq!(h.session.bootstrap_count().await, 2);
}
