use anyhow::Result;
use dex_arb_monitor::{
    AppConfig, ControlSurface, LogNotifier, MonitorSession, OpportunityScanner, SushiSwap,
    TelegramNotifier, Uniswap, VenueTrait, init_logging, run_telegram_control,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let config = AppConfig::from_env()?;

    info!(
        tokens = config.monitor.tokens.len(),
        base_token = %config.monitor.base_token,
        interval_secs = config.monitor.interval.as_secs(),
        min_profit = config.monitor.min_profit,
        telegram = config.telegram.is_some(),
        "[INIT] dex-arb-monitor starting"
    );

    let uniswap = Uniswap::with_endpoint(&config.uniswap_subgraph_url, config.request_timeout)?;
    let sushiswap =
        SushiSwap::with_endpoint(&config.sushiswap_subgraph_url, config.request_timeout)?;

    // Reachability is informational; an unreachable venue only degrades scans
    if let Err(e) = uniswap.health_check().await {
        warn!(venue = "Uniswap", error = %e, "[INIT] venue health check failed");
    }
    if let Err(e) = sushiswap.health_check().await {
        warn!(venue = "SushiSwap", error = %e, "[INIT] venue health check failed");
    }

    let scanner = Arc::new(OpportunityScanner::new(
        Arc::new(uniswap),
        Arc::new(sushiswap),
    ));

    match &config.telegram {
        Some(telegram) => {
            let notifier = TelegramNotifier::new(telegram);
            let bot = notifier.bot().clone();
            let session = Arc::new(MonitorSession::new(scanner, Arc::new(notifier)));
            let control = Arc::new(ControlSurface::new(
                Arc::clone(&session),
                config.monitor.clone(),
            ));

            info!("[INIT] waiting for operator commands (/start, /stop, /status)");
            run_telegram_control(bot, telegram.chat_id, control).await;
            session.shutdown().await;
        }
        None => {
            warn!("[INIT] Telegram is not configured; notifications go to the log");
            let session = MonitorSession::new(scanner, Arc::new(LogNotifier));
            session.start(config.monitor.clone())?;

            tokio::signal::ctrl_c().await?;
            info!("Ctrl-C received, shutting down");
            session.shutdown().await;
        }
    }

    Ok(())
}
