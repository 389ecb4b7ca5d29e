#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // First argument, when present, is the config file path
    let config_arg = std::env::args().nth(1);

    trade_gateway_lib::run(config_arg).await?;
    Ok(())
}
