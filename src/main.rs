use clap::Parser;
use grpc_wrapgen::core::generator::output_dir;
use grpc_wrapgen::domain::model::GenerationReport;
use grpc_wrapgen::domain::ports::BindingCompiler;
use grpc_wrapgen::utils::error::ErrorSeverity;
use grpc_wrapgen::utils::{logger, validation::Validate};
use grpc_wrapgen::{CliConfig, CodegenEngine, GeneratorConfig, LocalStorage, NoopCompiler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting grpc-wrapgen");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let result = if config.compiler.enabled {
        execute(&config, config.binding_compiler(), cli.dry_run).await
    } else {
        tracing::info!("🔧 Binding compilation disabled");
        execute(&config, NoopCompiler, cli.dry_run).await
    };

    match result {
        Ok(report) => {
            let verb = if report.dry_run { "would be generated" } else { "generated" };
            println!(
                "✅ {} wrapper modules ({} endpoints) {} for {}",
                report.modules.len(),
                report.total_endpoints(),
                verb,
                report.service
            );
            for module in &report.modules {
                println!("📁 {}", module.output_path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn execute<B: BindingCompiler>(
    config: &GeneratorConfig,
    compiler: B,
    dry_run: bool,
) -> grpc_wrapgen::Result<GenerationReport> {
    let storage = LocalStorage::new(output_dir(config));
    let engine = CodegenEngine::new(config, storage, compiler)?;

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be compiled or written");
        engine.preview()
    } else {
        engine.run().await
    }
}
