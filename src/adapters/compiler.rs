use crate::adapters::bindings::{arrange_prost_tonic, BindingLayout};
use crate::domain::ports::BindingCompiler;
use crate::utils::error::{Result, WrapgenError};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

pub const DEFAULT_PROGRAM: &str = "protoc";

pub fn default_args() -> Vec<String> {
    vec![
        "-I{proto_dir}".to_string(),
        "--prost_out={output_dir}".to_string(),
        "--tonic_out={output_dir}".to_string(),
        "{file}".to_string(),
    ]
}

/// Runs an external program (by default `protoc` with the prost/tonic plugins)
/// once per declaration file.
///
/// Arguments may contain `{proto_dir}`, `{output_dir}` and `{file}`. With
/// [`BindingLayout::ProstTonic`] the plugin output is arranged into
/// `<base>_pb.rs` / `<base>_grpc.rs` after the program succeeds.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
    layout: BindingLayout,
}

impl CommandCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            layout: BindingLayout::AsIs,
        }
    }

    pub fn with_layout(mut self, layout: BindingLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn expand_args(&self, proto_dir: &Path, file_name: &str, output_dir: &Path) -> Vec<String> {
        let proto_dir = proto_dir.display().to_string();
        let output_dir = output_dir.display().to_string();

        self.args
            .iter()
            .map(|arg| {
                arg.replace("{proto_dir}", &proto_dir)
                    .replace("{output_dir}", &output_dir)
                    .replace("{file}", file_name)
            })
            .collect()
    }
}

impl Default for CommandCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, default_args()).with_layout(BindingLayout::ProstTonic)
    }
}

#[async_trait]
impl BindingCompiler for CommandCompiler {
    async fn compile(&self, proto_dir: &Path, file_name: &str, output_dir: &Path) -> Result<()> {
        let args = self.expand_args(proto_dir, file_name, output_dir);
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| WrapgenError::CompilerError {
                file: file_name.to_string(),
                message: format!("failed to start `{}`: {}", self.program, e),
            })?;

        if !output.status.success() {
            return Err(WrapgenError::CompilerError {
                file: file_name.to_string(),
                message: format!(
                    "`{}` exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        match self.layout {
            BindingLayout::ProstTonic => arrange_prost_tonic(proto_dir, file_name, output_dir).await,
            BindingLayout::AsIs => Ok(()),
        }
    }
}

/// 跳過綁定產生（--skip-compile）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompiler;

#[async_trait]
impl BindingCompiler for NoopCompiler {
    async fn compile(&self, _proto_dir: &Path, file_name: &str, _output_dir: &Path) -> Result<()> {
        tracing::debug!("Skipping binding compilation for {}", file_name);
        Ok(())
    }
}
