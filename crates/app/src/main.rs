use std::sync::Arc;

use kassou_api::server::{AppState, start_server};
use kassou_core::common::time::RealTimeProvider;
use kassou_core::config::AppConfig;
use kassou_feed::yahoo::YahooProvider;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责加载配置、实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载分层配置。
/// 3. 实例化基础设施层（时钟、行情 Provider）。
/// 4. 组装共享应用状态并启动 HTTP 服务。
/// 5. 监听退出信号优雅停机。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志 (RUST_LOG 可覆盖，默认 info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("Kassou synthesizer starting...");

    // 2. 加载分层配置
    let config = load_config()?;
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    // 3. 实例化基础设施层
    let clock = Arc::new(RealTimeProvider);
    let provider = Arc::new(YahooProvider::new(clock, &config.feed)?);

    // 4. 组装共享应用状态（注入 Core Trait 抽象）
    let state = AppState { provider };

    // 5. 启动 HTTP 服务并等待外部退出信号
    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}

/// 分层配置加载：内置默认值打底，`kassou.toml` 与 `KASSOU_` 前缀
/// 环境变量依次覆盖（如 `KASSOU_SERVER__PORT=9090`）。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(config::File::with_name("kassou").required(false))
        .add_source(config::Environment::with_prefix("KASSOU").separator("__"))
        .build()?;
    settings.try_deserialize()
}
