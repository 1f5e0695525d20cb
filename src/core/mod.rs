pub mod generator;
pub mod matcher;
pub mod reader;
pub mod renderer;

pub use crate::domain::model::{EndpointDef, ParseResult, ServiceDef};
pub use crate::domain::ports::{BindingCompiler, ConfigProvider, DeclarationSyntax, Storage};
pub use crate::utils::error::Result;
