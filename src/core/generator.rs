use crate::core::reader::DeclarationReader;
use crate::core::renderer::{base_name, render_module, EndpointTemplate};
use crate::domain::model::{GeneratedModule, GenerationReport};
use crate::domain::ports::{BindingCompiler, ConfigProvider, Storage};
use crate::utils::error::{Result, WrapgenError};
use std::path::{Path, PathBuf};

/// `<proto_root>/<service>/protos`
pub fn input_dir<C: ConfigProvider + ?Sized>(config: &C) -> PathBuf {
    Path::new(config.proto_root())
        .join(config.service_name())
        .join("protos")
}

/// `<output_root>/<service>`
pub fn output_dir<C: ConfigProvider + ?Sized>(config: &C) -> PathBuf {
    Path::new(config.output_root()).join(config.service_name())
}

/// Generates one wrapper module per declaration file of a service.
pub struct CodegenEngine<S: Storage, B: BindingCompiler> {
    storage: S,
    compiler: B,
    reader: DeclarationReader,
    template: EndpointTemplate,
    service: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
    extension: String,
}

impl<S: Storage, B: BindingCompiler> CodegenEngine<S, B> {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C, storage: S, compiler: B) -> Result<Self> {
        let template = match config.template_path() {
            Some(path) => {
                tracing::info!("📄 Using endpoint template {}", path);
                EndpointTemplate::from_file(path)?
            }
            None => EndpointTemplate::builtin(),
        };

        Ok(Self {
            storage,
            compiler,
            reader: DeclarationReader::new(),
            template,
            service: config.service_name().to_string(),
            input_dir: input_dir(config),
            output_dir: output_dir(config),
            extension: config.file_extension().to_string(),
        })
    }

    pub fn with_template(mut self, template: EndpointTemplate) -> Self {
        self.template = template;
        self
    }

    /// Declaration files of the service, sorted by file name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.input_dir.is_dir() {
            return Err(WrapgenError::ConfigError {
                message: format!(
                    "declaration directory {} does not exist",
                    self.input_dir.display()
                ),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.input_dir)? {
            let path = entry?.path();
            if path.is_file() && base_name(&path, &self.extension).is_some() {
                files.push(path);
            } else {
                tracing::debug!("Skipping {}", path.display());
            }
        }
        files.sort();

        Ok(files)
    }

    /// Reads and renders one file; nothing is written.
    pub fn render_file(&self, path: &Path) -> Result<(String, String, GeneratedModule)> {
        let file_name = base_name(path, &self.extension).ok_or_else(|| WrapgenError::ConfigError {
            message: format!("{} is not a .{} file", path.display(), self.extension),
        })?;

        let parsed = self.reader.read_file(path)?;
        let module = render_module(&parsed, &file_name, &self.template);
        let output_name = format!("{}.rs", file_name);

        let summary = GeneratedModule {
            file_name: file_name.clone(),
            output_path: self.output_dir.join(&output_name).display().to_string(),
            service_count: parsed.services.len(),
            endpoint_count: parsed.endpoint_count(),
        };

        Ok((output_name, module, summary))
    }

    pub async fn generate_file(&self, path: &Path) -> Result<GeneratedModule> {
        let (output_name, module, summary) = self.render_file(path)?;

        // 宣告檔有效才呼叫編譯器
        let declaration = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.compiler
            .compile(&self.input_dir, &declaration, &self.output_dir)
            .await?;

        self.storage.write_file(&output_name, module.as_bytes()).await?;

        tracing::info!(
            "✅ {} -> {} ({} services, {} endpoints)",
            declaration,
            summary.output_path,
            summary.service_count,
            summary.endpoint_count
        );

        Ok(summary)
    }

    /// Generates every declaration file; stops at the first failing file.
    pub async fn run(&self) -> Result<GenerationReport> {
        tracing::info!("🚀 Generating gRPC wrappers for service {}", self.service);
        tracing::info!("📁 Loading declarations from {}", self.input_dir.display());

        let files = self.discover()?;
        if files.is_empty() {
            tracing::warn!("No .{} files found in {}", self.extension, self.input_dir.display());
        }

        // 編譯器會直接寫入輸出目錄，必須先存在
        self.storage.ensure_dir().await?;

        let mut modules = Vec::with_capacity(files.len());
        for path in &files {
            tracing::info!("Generating wrapper for {}", path.display());
            modules.push(self.generate_file(path).await?);
        }

        tracing::info!("Wrappers generated successfully in {}", self.output_dir.display());

        Ok(GenerationReport {
            service: self.service.clone(),
            modules,
            dry_run: false,
        })
    }

    /// Parses and renders every file without compiling or writing.
    pub fn preview(&self) -> Result<GenerationReport> {
        let mut modules = Vec::new();
        for path in self.discover()? {
            let (_, _, summary) = self.render_file(&path)?;
            tracing::info!(
                "🔍 Would generate {} ({} endpoints)",
                summary.output_path,
                summary.endpoint_count
            );
            modules.push(summary);
        }

        Ok(GenerationReport {
            service: self.service.clone(),
            modules,
            dry_run: true,
        })
    }
}
