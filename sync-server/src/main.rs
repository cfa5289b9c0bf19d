use sync_server::{Config, Server, ServerState, setup_environment};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env (不存在时忽略)
    let _ = dotenv::dotenv();

    // 2. 加载配置并初始化日志
    let config = Config::from_env();
    setup_environment(&config)?;

    tracing::info!(
        environment = %config.environment,
        backend = ?config.store_backend,
        "POS sync server starting..."
    );

    // 3. 打开存储，组装服务
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器和后台任务，Ctrl-C 退出
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
