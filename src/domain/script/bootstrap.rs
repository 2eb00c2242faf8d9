//! The session-setup script that brings a bot to life.

use serde::{Deserialize, Serialize};

use super::{ScriptEncoder, ScriptIdentifier};
use crate::domain::bot::{EngineBinding, EngineRole};
use crate::domain::foundation::InsightId;

/// Where the bot's code lives inside a project's assets, and what it is called.
///
/// This is the contract with the asset-authoring side: a subdirectory of
/// the project assets holding a bot module and an engine-factory module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotLayout {
    pub asset_subdirectory: String,
    pub bot_module: ScriptIdentifier,
    pub bot_class: ScriptIdentifier,
    pub engine_module: ScriptIdentifier,
    pub engine_class: ScriptIdentifier,
}

impl Default for BotLayout {
    fn default() -> Self {
        Self {
            asset_subdirectory: "py".to_string(),
            bot_module: ScriptIdentifier::from_static("model_bot"),
            bot_class: ScriptIdentifier::from_static("ModelBot"),
            engine_module: ScriptIdentifier::from_static("gaas_gpt_model"),
            engine_class: ScriptIdentifier::from_static("ModelEngine"),
        }
    }
}

/// Everything needed to render the bootstrap script for one bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapScript {
    asset_directory: String,
    layout: BotLayout,
    binding: EngineBinding,
    insight_id: InsightId,
    target: ScriptIdentifier,
}

impl BootstrapScript {
    /// Creates a bootstrap script. Backslashes in `asset_directory` are
    /// normalised to forward slashes and trailing separators dropped.
    pub fn new(
        asset_directory: impl AsRef<str>,
        layout: BotLayout,
        binding: EngineBinding,
        insight_id: InsightId,
        target: ScriptIdentifier,
    ) -> Self {
        Self {
            asset_directory: normalize_separators(asset_directory.as_ref()),
            layout,
            binding,
            insight_id,
            target,
        }
    }

    pub fn asset_directory(&self) -> &str {
        &self.asset_directory
    }

    /// Directory appended to the module search path and made the working directory.
    pub fn script_directory(&self) -> String {
        let subdir = normalize_separators(&self.layout.asset_subdirectory);
        let subdir = subdir.trim_start_matches('/');
        if subdir.is_empty() {
            self.asset_directory.clone()
        } else {
            format!("{}/{}", self.asset_directory, subdir)
        }
    }

    pub fn binding(&self) -> &EngineBinding {
        &self.binding
    }

    pub fn target(&self) -> &ScriptIdentifier {
        &self.target
    }

    pub fn layout(&self) -> &BotLayout {
        &self.layout
    }

    pub fn insight_id(&self) -> InsightId {
        self.insight_id
    }

    /// Renders the script.
    ///
    /// Re-running it against a session where a previous run failed part-way
    /// is safe: the search path entry is only added once, imports are cached,
    /// and every assignment simply overwrites.
    pub fn render(&self) -> String {
        let layout = &self.layout;
        let script_dir = ScriptEncoder::string(&self.script_directory());
        let insight = ScriptEncoder::string(&self.insight_id.to_string());

        let mut lines = vec![
            "import sys".to_string(),
            "import os".to_string(),
            format!("if {dir} not in sys.path:", dir = script_dir),
            format!("    sys.path.append({dir})", dir = script_dir),
            format!("os.chdir({dir})", dir = script_dir),
            format!("import {}", layout.bot_module),
            format!("from {} import {}", layout.engine_module, layout.engine_class),
        ];

        for role in EngineRole::ALL {
            lines.push(format!(
                "{var} = {class}(engine_id={id}, insight_id={insight})",
                var = role.script_variable(),
                class = layout.engine_class,
                id = ScriptEncoder::string(self.binding.engine_id(role)),
                insight = insight,
            ));
        }

        let kwargs = EngineRole::ALL
            .iter()
            .map(|role| format!("{v}={v}", v = role.script_variable()))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "{target} = {module}.{class}({kwargs})",
            target = self.target,
            module = layout.bot_module,
            class = layout.bot_class,
            kwargs = kwargs,
        ));

        lines.join("\n")
    }
}

/// Converts Windows-style separators to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    if normalized.len() > 1 {
        normalized.trim_end_matches('/').to_string()
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bot::EngineDefaults;
    use std::collections::HashMap;

    fn script_for(dir: &str, properties: HashMap<String, String>) -> BootstrapScript {
        BootstrapScript::new(
            dir,
            BotLayout::default(),
            EngineBinding::resolve(&properties, &EngineDefaults::default()),
            InsightId::new(),
            ScriptIdentifier::new("my_bot").unwrap(),
        )
    }

    #[test]
    fn normalizes_windows_paths() {
        let script = script_for(r"C:\semoss\project\assets\", HashMap::new());
        assert_eq!(script.asset_directory(), "C:/semoss/project/assets");
        assert_eq!(script.script_directory(), "C:/semoss/project/assets/py");
    }

    #[test]
    fn renders_path_setup_before_imports() {
        let rendered = script_for("/data/assets", HashMap::new()).render();
        let path_pos = rendered.find("sys.path.append('/data/assets/py')").unwrap();
        let chdir_pos = rendered.find("os.chdir('/data/assets/py')").unwrap();
        let import_pos = rendered.find("import model_bot").unwrap();

        assert!(path_pos < chdir_pos);
        assert!(chdir_pos < import_pos);
        assert!(rendered.contains("if '/data/assets/py' not in sys.path:"));
        assert!(rendered.contains("from gaas_gpt_model import ModelEngine"));
    }

    #[test]
    fn renders_one_engine_per_role_with_insight() {
        let script = script_for("/a", HashMap::new());
        let insight = script.insight_id().to_string();
        let rendered = script.render();

        for role in EngineRole::ALL {
            let expected = format!(
                "{} = ModelEngine(engine_id='{}', insight_id='{}')",
                role.script_variable(),
                role.default_engine_id(),
                insight
            );
            assert!(rendered.contains(&expected), "missing: {expected}");
        }
    }

    #[test]
    fn assigns_bot_to_target_last() {
        let rendered = script_for("/a", HashMap::new()).render();
        let last = rendered.lines().last().unwrap();
        assert_eq!(
            last,
            "my_bot = model_bot.ModelBot(modelEngine=modelEngine, \
             embeddingModelEngine=embeddingModelEngine, translateModelEngine=translateModelEngine)"
        );
    }

    #[test]
    fn configured_ids_are_escaped() {
        let mut props = HashMap::new();
        props.insert(
            "MODEL_ENGINE_ID".to_string(),
            "x', insight_id='y'); import os; ('".to_string(),
        );
        let rendered = script_for("/a", props).render();

        assert!(rendered.contains(r"engine_id='x\', insight_id=\'y\'); import os; (\''"));
        assert!(!rendered.lines().any(|l| l.trim_start().starts_with("import os;")));
    }

    #[test]
    fn asset_path_with_quote_is_escaped() {
        let rendered = script_for("/tmp/it's", HashMap::new()).render();
        assert!(rendered.contains(r"os.chdir('/tmp/it\'s/py')"));
    }

    #[test]
    fn empty_subdirectory_uses_asset_root() {
        let layout = BotLayout {
            asset_subdirectory: String::new(),
            ..BotLayout::default()
        };
        let script = BootstrapScript::new(
            "/a/assets",
            layout,
            EngineBinding::resolve(&HashMap::new(), &EngineDefaults::default()),
            InsightId::new(),
            ScriptIdentifier::new("my_bot").unwrap(),
        );
        assert_eq!(script.script_directory(), "/a/assets");
    }
}
