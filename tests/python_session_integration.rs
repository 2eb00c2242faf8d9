//! Integration tests against a real Python interpreter.
//!
//! Each test skips itself when `python3` cannot be started.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use model_bot_bridge::adapters::{FilesystemProjectResolver, PythonProcessSession, PythonSessionConfig};
use model_bot_bridge::application::{BotCommandRouter, BotRegistry, BotSettings, QUESTION_PARAMETER};
use model_bot_bridge::domain::bot::{BotError, QueryResult};
use model_bot_bridge::domain::foundation::{CommandMetadata, InsightId, ProjectId};
use model_bot_bridge::domain::script::{ScriptCommand, ScriptIdentifier, ScriptLiteral};
use model_bot_bridge::ports::{ScriptError, ScriptingSession};
use tempfile::TempDir;

const ENGINE_MODULE: &str = r#"
class ModelEngine:
    def __init__(self, engine_id, insight_id):
        self.engine_id = engine_id
        self.insight_id = insight_id
"#;

const BOT_MODULE: &str = r#"
import json
import time

class ModelBot:
    def __init__(self, modelEngine, embeddingModelEngine, translateModelEngine):
        self.model = modelEngine
        self.embedding = embeddingModelEngine
        self.translate = translateModelEngine

    def query(self, question):
        if question == 'slow':
            time.sleep(30)
        print('noise that must not reach the protocol')
        return json.dumps({
            'conclusion': question,
            'detailed_answer': self.model.engine_id,
        })
"#;

fn write_project(root: &Path) {
    fs::write(root.join("demo.smss"), "MODEL_ENGINE_ID=demo-model\n").unwrap();
    let py = root.join("demo/app_root/version/assets/py");
    fs::create_dir_all(&py).unwrap();
    fs::write(py.join("gaas_gpt_model.py"), ENGINE_MODULE).unwrap();
    fs::write(py.join("model_bot.py"), BOT_MODULE).unwrap();
}

async fn start(
    timeout: Option<Duration>,
) -> Option<(TempDir, BotCommandRouter, Arc<PythonProcessSession>)> {
    let config = PythonSessionConfig {
        command_timeout: timeout,
        ..Default::default()
    };
    let session = match PythonProcessSession::spawn(&config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("skipping: {}", e);
            return None;
        }
    };

    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let session = Arc::new(session);
    let router = BotCommandRouter::for_session(
        Arc::new(FilesystemProjectResolver::new(dir.path())),
        session.clone(),
        Arc::new(BotRegistry::new()),
        BotSettings::default(),
    );
    Some((dir, router, session))
}

fn metadata() -> CommandMetadata {
    CommandMetadata::new(InsightId::new()).with_project(ProjectId::new("demo").unwrap())
}

fn question(q: &str) -> HashMap<String, String> {
    HashMap::from([(QUESTION_PARAMETER.to_string(), q.to_string())])
}

#[tokio::test]
async fn bot_loads_once_and_answers() {
    let Some((_dir, router, _session)) = start(None).await else {
        return;
    };

    let first = router
        .dispatch("LoadBot", &HashMap::new(), metadata())
        .await
        .unwrap();
    let second = router
        .dispatch("LoadBot", &HashMap::new(), metadata())
        .await
        .unwrap();
    assert_eq!(first.value, "false");
    assert_eq!(second.value, "true");

    let output = router
        .dispatch("RunBot", &question("What%20now%3F"), metadata())
        .await
        .unwrap();
    let answer = QueryResult::new(output.value).parse_answer().unwrap();
    assert_eq!(answer.conclusion, "What now?");
    assert_eq!(answer.detailed_answer, "demo-model");
}

#[tokio::test]
async fn hostile_question_is_treated_as_text() {
    let Some((_dir, router, _session)) = start(None).await else {
        return;
    };
    router
        .dispatch("LoadBot", &HashMap::new(), metadata())
        .await
        .unwrap();

    let hostile = "'); import os; os._exit(1) #\\ \u{00e9}\n";
    let encoded = urlencoding::encode(hostile).into_owned();
    let output = router
        .dispatch("RunBot", &question(&encoded), metadata())
        .await
        .unwrap();

    let answer = QueryResult::new(output.value).parse_answer().unwrap();
    assert_eq!(answer.conclusion, hostile.trim());

    // Session still alive
    let again = router
        .dispatch("RunBot", &question("ping"), metadata())
        .await
        .unwrap();
    assert!(again.value.contains("ping"));
}

#[tokio::test]
async fn query_before_load_is_name_error() {
    let Some((_dir, router, _session)) = start(None).await else {
        return;
    };

    let err = router
        .dispatch("RunBot", &question("hello"), metadata())
        .await
        .unwrap_err();

    match err {
        BotError::SessionExecution(inner) => assert!(inner.is_name_error()),
        other => panic!("Expected SessionExecution, got {:?}", other),
    }
}

#[tokio::test]
async fn slow_query_times_out_and_stops_session() {
    let Some((_dir, router, _session)) = start(Some(Duration::from_secs(2))).await else {
        return;
    };
    router
        .dispatch("LoadBot", &HashMap::new(), metadata())
        .await
        .unwrap();

    let err = router
        .dispatch("RunBot", &question("slow"), metadata())
        .await
        .unwrap_err();
    assert_eq!(err, BotError::SessionExecution(ScriptError::Timeout(2)));

    let after = router
        .dispatch("RunBot", &question("ping"), metadata())
        .await
        .unwrap_err();
    assert!(matches!(
        after,
        BotError::SessionExecution(ScriptError::Transport(_))
    ));
}

#[tokio::test]
async fn cancelled_command_never_leaks_its_reply() {
    let Some((_dir, router, session)) = start(None).await else {
        return;
    };
    router
        .dispatch("LoadBot", &HashMap::new(), metadata())
        .await
        .unwrap();

    let slow = ScriptCommand::call_method(
        ScriptIdentifier::new("my_bot").unwrap(),
        ScriptIdentifier::new("query").unwrap(),
        vec![(ScriptIdentifier::new("question").unwrap(), ScriptLiteral::from("slow"))],
    );
    let cancelled = tokio::time::timeout(Duration::from_millis(200), session.run(&slow)).await;
    assert!(cancelled.is_err());

    // The slow reply is still pending on the stream; the next command must not read it
    let probe = ScriptCommand::has_global(ScriptIdentifier::new("my_bot").unwrap());
    let next = tokio::time::timeout(Duration::from_secs(5), session.run(&probe))
        .await
        .expect("command after cancellation should fail fast");
    assert!(matches!(next, Err(ScriptError::Transport(_))));

    let err = router
        .dispatch("RunBot", &question("ping"), metadata())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BotError::SessionExecution(ScriptError::Transport(_))
    ));
}
