pub mod cli;
pub mod toml_config;

use crate::adapters::{compiler, BindingLayout};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROTO_ROOT: &str = ".";
pub const DEFAULT_OUTPUT_ROOT: &str = "generated";
pub const DEFAULT_FILE_EXTENSION: &str = "proto";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "grpc-wrapgen")]
#[command(about = "Generate gRPC wrapper modules from .proto service declarations")]
pub struct CliConfig {
    /// Service name; declarations are read from <proto-root>/<service>/protos
    pub service: String,

    #[arg(long, help = "Directory holding one folder per service (default: .)")]
    pub proto_root: Option<String>,

    #[arg(long, help = "Directory receiving generated modules (default: generated)")]
    pub output_root: Option<String>,

    #[arg(long, help = "Per-endpoint template file (default: built-in template)")]
    pub template: Option<String>,

    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Do not run the binding compiler")]
    pub skip_compile: bool,

    #[arg(long, help = "Parse and render without writing anything")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併 TOML 設定與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                toml_config::TomlConfig::from_file(path)?.into_generator_config(&self.service)
            }
            None => GeneratorConfig::new(&self.service),
        };

        if let Some(proto_root) = &self.proto_root {
            config.proto_root = proto_root.clone();
        }
        if let Some(output_root) = &self.output_root {
            config.output_root = output_root.clone();
        }
        if let Some(template) = &self.template {
            config.template = Some(template.clone());
        }
        if self.skip_compile {
            config.compiler.enabled = false;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerSettings {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    pub layout: BindingLayout,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: compiler::DEFAULT_PROGRAM.to_string(),
            args: compiler::default_args(),
            layout: BindingLayout::ProstTonic,
        }
    }
}

/// Effective settings for one generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub service: String,
    pub proto_root: String,
    pub output_root: String,
    pub template: Option<String>,
    pub file_extension: String,
    pub compiler: CompilerSettings,
}

impl GeneratorConfig {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            proto_root: DEFAULT_PROTO_ROOT.to_string(),
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            template: None,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            compiler: CompilerSettings::default(),
        }
    }

    pub fn binding_compiler(&self) -> compiler::CommandCompiler {
        compiler::CommandCompiler::new(self.compiler.program.clone(), self.compiler.args.clone())
            .with_layout(self.compiler.layout)
    }
}

impl ConfigProvider for GeneratorConfig {
    fn service_name(&self) -> &str {
        &self.service
    }

    fn proto_root(&self) -> &str {
        &self.proto_root
    }

    fn output_root(&self) -> &str {
        &self.output_root
    }

    fn template_path(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn file_extension(&self) -> &str {
        &self.file_extension
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_service_name("service", &self.service)?;
        validation::validate_path("proto_root", &self.proto_root)?;
        validation::validate_path("output_root", &self.output_root)?;
        if let Some(template) = &self.template {
            validation::validate_path("template", template)?;
        }
        validation::validate_file_extension("file_extension", &self.file_extension)?;
        if self.compiler.enabled {
            validation::validate_non_empty_string("compiler.program", &self.compiler.program)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::new("Hello");
        assert_eq!(config.proto_root(), ".");
        assert_eq!(config.output_root(), "generated");
        assert_eq!(config.file_extension(), "proto");
        assert!(config.template_path().is_none());
        assert!(config.compiler.enabled);
        assert_eq!(config.compiler.layout, BindingLayout::ProstTonic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GeneratorConfig::new("");
        assert!(config.validate().is_err());

        config.service = "Hello".to_string();
        config.file_extension = ".proto".to_string();
        assert!(config.validate().is_err());

        config.file_extension = "proto".to_string();
        config.compiler.program = " ".to_string();
        assert!(config.validate().is_err());

        config.compiler.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "grpc-wrapgen",
            "Hello",
            "--proto-root",
            "services",
            "--template",
            "custom.tmpl",
            "--skip-compile",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.service, "Hello");
        assert_eq!(config.proto_root, "services");
        assert_eq!(config.output_root, "generated");
        assert_eq!(config.template.as_deref(), Some("custom.tmpl"));
        assert!(!config.compiler.enabled);
    }
}
