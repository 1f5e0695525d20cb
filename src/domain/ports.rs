use crate::domain::model::DeclarationLine;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    /// Creates the output location before anything is produced into it.
    fn ensure_dir(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn service_name(&self) -> &str;
    fn proto_root(&self) -> &str;
    fn output_root(&self) -> &str;
    fn template_path(&self) -> Option<&str>;
    fn file_extension(&self) -> &str;
}

/// Recognizes the structural lines of a declaration file.
///
/// The reader only depends on this trait, so the line patterns can be swapped
/// for a real grammar without touching reading or rendering.
pub trait DeclarationSyntax: Send + Sync {
    fn classify(&self, line: &str) -> DeclarationLine;
}

/// Produces the message and client-stub bindings for one declaration file.
#[async_trait]
pub trait BindingCompiler: Send + Sync {
    async fn compile(&self, proto_dir: &Path, file_name: &str, output_dir: &Path) -> Result<()>;
}
