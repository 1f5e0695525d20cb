//! Post-compile layout of prost/tonic output.
//!
//! `protoc-gen-prost` and `protoc-gen-tonic` name their files after the proto
//! package (`<package>.rs`, `<package>.tonic.rs`). Wrapper modules import
//! `<base>_pb` and `<base>_grpc`, so after each compile the message file is
//! renamed to `<base>_pb.rs` and a `<base>_grpc.rs` module is written that
//! includes the tonic clients and exposes one `call_<Service>_<rpc>` function
//! per endpoint, keeping the rpc name exactly as declared.

use crate::core::reader::DeclarationReader;
use crate::domain::model::ParseResult;
use crate::utils::error::{Result, WrapgenError};
use heck::{ToSnakeCase, ToUpperCamelCase};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;
use std::sync::LazyLock;

static PACKAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([A-Za-z0-9_.]+)\s*;").expect("package pattern is valid")
});

/// 未宣告 package 時 prost 使用的檔名
const NO_PACKAGE: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingLayout {
    /// Leave the compiler output untouched.
    AsIs,
    /// Rename/wrap `protoc-gen-prost` + `protoc-gen-tonic` output.
    ProstTonic,
}

pub fn detect_package(declaration: &str) -> String {
    PACKAGE_PATTERN
        .captures(declaration)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| NO_PACKAGE.to_string())
}

/// Client method name tonic generates for an rpc (prost's snake case rules).
pub fn rpc_method_name(rpc: &str) -> String {
    let mut ident = rpc.to_snake_case();
    match ident.as_str() {
        "as" | "break" | "const" | "continue" | "else" | "enum" | "false" | "fn" | "for"
        | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move" | "mut" | "pub"
        | "ref" | "return" | "static" | "struct" | "trait" | "true" | "type" | "unsafe"
        | "use" | "where" | "while" | "dyn" | "abstract" | "become" | "box" | "do"
        | "final" | "macro" | "override" | "priv" | "typeof" | "unsized" | "virtual"
        | "yield" | "async" | "await" | "try" => ident.insert_str(0, "r#"),
        "self" | "super" | "extern" | "crate" => ident.push('_'),
        _ => {}
    }
    ident
}

/// Client struct tonic generates for a service.
pub fn client_type_name(service: &str) -> String {
    let mut ident = service.to_upper_camel_case();
    if ident == "Self" {
        ident.push('_');
    }
    format!("{}Client", ident)
}

/// Module tonic wraps a service client in (`UserService` -> `user_service_client`).
pub fn client_module_name(service: &str) -> String {
    let name = service.to_upper_camel_case();
    let mut module = String::new();
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        module.push(c.to_ascii_lowercase());
        if chars.peek().is_some_and(|next| next.is_uppercase()) {
            module.push('_');
        }
    }
    module.push_str("_client");
    module
}

/// Text of `<file_name>_grpc.rs`.
pub fn render_grpc_module(file_name: &str, package: &str, parsed: &ParseResult) -> String {
    let mut module = format!(
        "// @generated by grpc-wrapgen from {file_name}.proto. Do not edit.\n\
         #![allow(non_snake_case, dead_code)]\n\
         \n\
         pub use super::{file_name}_pb::*;\n\
         \n\
         include!(\"{package}.tonic.rs\");\n"
    );

    if !parsed.services.is_empty() {
        module.push('\n');
    }
    for service in &parsed.services {
        let _ = writeln!(
            module,
            "pub use {}::{};",
            client_module_name(&service.name),
            client_type_name(&service.name)
        );
    }

    for service in &parsed.services {
        let client = client_type_name(&service.name);
        for endpoint in service.endpoints() {
            let _ = write!(
                module,
                "\npub async fn call_{service}_{rpc}(\n    \
                 channel: tonic::transport::Channel,\n    \
                 request: tonic::Request<{request}>,\n\
                 ) -> Result<tonic::Response<impl std::fmt::Debug>, tonic::Status> {{\n    \
                 {client}::new(channel).{method}(request).await\n\
                 }}\n",
                service = service.name,
                rpc = endpoint.name,
                request = endpoint.request_type,
                method = rpc_method_name(&endpoint.name),
            );
        }
    }

    module
}

/// Renames the prost output and writes the `_grpc` module for one declaration file.
pub async fn arrange_prost_tonic(proto_dir: &Path, file_name: &str, output_dir: &Path) -> Result<()> {
    let declaration_path = proto_dir.join(file_name);
    let base = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let declaration = tokio::fs::read_to_string(&declaration_path).await?;
    let package = detect_package(&declaration);
    let parsed = DeclarationReader::new().read_str(file_name, &declaration)?;

    let messages = output_dir.join(format!("{}.rs", package));
    let clients = output_dir.join(format!("{}.tonic.rs", package));
    for expected in [&messages, &clients] {
        if !tokio::fs::try_exists(expected).await? {
            return Err(WrapgenError::CompilerError {
                file: file_name.to_string(),
                message: format!("expected compiler output {} was not produced", expected.display()),
            });
        }
    }

    let pb_path = output_dir.join(format!("{}_pb.rs", base));
    tokio::fs::rename(&messages, &pb_path).await?;
    tokio::fs::write(
        output_dir.join(format!("{}_grpc.rs", base)),
        render_grpc_module(&base, &package, &parsed),
    )
    .await?;

    tracing::debug!("Arranged bindings {}_pb.rs / {}_grpc.rs (package {})", base, base, package);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EndpointDef, ServiceDef};
    use tempfile::TempDir;

    #[test]
    fn test_detect_package() {
        assert_eq!(detect_package("syntax = \"proto3\";\npackage demo.v1;\n"), "demo.v1");
        assert_eq!(detect_package("syntax = \"proto3\";\n"), "_");
    }

    #[test]
    fn test_rpc_method_names_follow_tonic() {
        assert_eq!(rpc_method_name("send"), "send");
        assert_eq!(rpc_method_name("Say"), "say");
        assert_eq!(rpc_method_name("SayHello"), "say_hello");
        assert_eq!(rpc_method_name("getHTTPStatus"), "get_http_status");
        assert_eq!(rpc_method_name("Type"), "r#type");
        assert_eq!(rpc_method_name("Self"), "self_");
    }

    #[test]
    fn test_client_names() {
        assert_eq!(client_type_name("Greeter"), "GreeterClient");
        assert_eq!(client_module_name("Greeter"), "greeter_client");
        assert_eq!(client_module_name("UserService"), "user_service_client");
    }

    #[test]
    fn test_grpc_module_keeps_declared_rpc_names() {
        let mut users = ServiceDef::new("Users");
        users.add_endpoint(EndpointDef::new("Get", "GetUserRequest", "User"));
        users.add_endpoint(EndpointDef::new("ListAll", "ListUsersRequest", "UserList"));
        let parsed = ParseResult {
            services: vec![users],
        };

        let module = render_grpc_module("directory", "directory.v1", &parsed);

        assert!(module.contains("pub use super::directory_pb::*;"));
        assert!(module.contains("include!(\"directory.v1.tonic.rs\");"));
        assert!(module.contains("pub use users_client::UsersClient;"));
        assert!(module.contains("pub async fn call_Users_Get("));
        assert!(module.contains("request: tonic::Request<GetUserRequest>,"));
        assert!(module.contains("UsersClient::new(channel).get(request).await"));
        assert!(module.contains("pub async fn call_Users_ListAll("));
        assert!(module.contains("UsersClient::new(channel).list_all(request).await"));
    }

    #[tokio::test]
    async fn test_arrange_renames_and_writes_modules() {
        let temp_dir = TempDir::new().unwrap();
        let proto_dir = temp_dir.path().join("protos");
        let output_dir = temp_dir.path().join("out");
        std::fs::create_dir_all(&proto_dir).unwrap();
        std::fs::create_dir_all(&output_dir).unwrap();
        std::fs::write(
            proto_dir.join("helloWorld.proto"),
            "package hello;\nservice Greeter {\n  rpc SayHello(HelloRequest) returns (HelloReply);\n}\n",
        )
        .unwrap();
        std::fs::write(output_dir.join("hello.rs"), "pub struct HelloRequest {}").unwrap();
        std::fs::write(output_dir.join("hello.tonic.rs"), "pub mod greeter_client {}").unwrap();

        arrange_prost_tonic(&proto_dir, "helloWorld.proto", &output_dir)
            .await
            .unwrap();

        assert!(!output_dir.join("hello.rs").exists());
        assert_eq!(
            std::fs::read_to_string(output_dir.join("helloWorld_pb.rs")).unwrap(),
            "pub struct HelloRequest {}"
        );
        let grpc = std::fs::read_to_string(output_dir.join("helloWorld_grpc.rs")).unwrap();
        assert!(grpc.contains("include!(\"hello.tonic.rs\");"));
        assert!(grpc.contains("GreeterClient::new(channel).say_hello(request).await"));
    }

    #[tokio::test]
    async fn test_arrange_reports_missing_compiler_output() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("demo.proto"), "service Demo {\n}\n").unwrap();

        let err = arrange_prost_tonic(temp_dir.path(), "demo.proto", temp_dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, WrapgenError::CompilerError { .. }));
    }
}
