use crate::adapters::BindingLayout;
use crate::config::{CompilerSettings, GeneratorConfig};
use crate::utils::error::{Result, WrapgenError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub generator: Option<GeneratorSection>,
    pub compiler: Option<CompilerSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorSection {
    pub proto_root: Option<String>,
    pub output_root: Option<String>,
    pub template: Option<String>,
    pub file_extension: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilerSection {
    pub enabled: Option<bool>,
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    /// `prost-tonic` (default) or `as-is`
    pub layout: Option<BindingLayout>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WrapgenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WrapgenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROTO_ROOT})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn into_generator_config(self, service: &str) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(service);

        if let Some(generator) = self.generator {
            if let Some(proto_root) = generator.proto_root {
                config.proto_root = proto_root;
            }
            if let Some(output_root) = generator.output_root {
                config.output_root = output_root;
            }
            if let Some(file_extension) = generator.file_extension {
                config.file_extension = file_extension;
            }
            config.template = generator.template;
        }

        if let Some(compiler) = self.compiler {
            let defaults = CompilerSettings::default();
            config.compiler = CompilerSettings {
                enabled: compiler.enabled.unwrap_or(defaults.enabled),
                program: compiler.program.unwrap_or(defaults.program),
                args: compiler.args.unwrap_or(defaults.args),
                layout: compiler.layout.unwrap_or(defaults.layout),
            };
        }

        config
    }
}
