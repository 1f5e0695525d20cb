use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// transport 相關 crate 只保留警告
const TRANSPORT_DIRECTIVES: &str = "tonic=warn,h2=warn,tower=warn,hyper=warn";

pub fn default_directives(verbose: bool) -> String {
    let own = if verbose { "grpc_wrapgen=debug" } else { "grpc_wrapgen=info" };
    format!("{},{}", own, TRANSPORT_DIRECTIVES)
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 給 CI 使用的 JSON 格式日誌，保留 target 以便依模組篩選
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false)
                .flatten_event(true),
        )
        .init();
}
