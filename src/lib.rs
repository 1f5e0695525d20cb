pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod runtime;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, GeneratorConfig};

pub use adapters::{BindingLayout, CommandCompiler, NoopCompiler};
pub use core::{
    generator::CodegenEngine,
    reader::DeclarationReader,
    renderer::{render_module, EndpointTemplate},
};
pub use runtime::ResponseEnvelope;
pub use utils::error::{Result, WrapgenError};
