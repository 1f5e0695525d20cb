// Adapters layer: concrete implementations of the domain ports for external tools.

pub mod bindings;
pub mod compiler;

pub use bindings::BindingLayout;
pub use compiler::{CommandCompiler, NoopCompiler};
