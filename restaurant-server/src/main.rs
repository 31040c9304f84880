use anyhow::Context;
use restaurant_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env().context("failed to load configuration")?;

    // 3. 日志
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "🍽  Restaurant server starting..."
    );

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
