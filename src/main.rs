use std::error::Error;
use swarm_bridge::adapters::outbound::{init_buffered_logger, init_logger, TcpSignalChannel};
use swarm_bridge::application::SwarmService;
use swarm_bridge::domains::signal::{LedColor, Motion, RobotState, SignalProtocol};
use swarm_bridge::domains::swarm::RobotRegistry;
use swarm_bridge::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.toml";

/// Command sent to each robot after its refresh.
fn demo_command(state: &RobotState) -> (Motion, LedColor) {
    match state.uid {
        0 => (Motion::Forward, LedColor::new(0, 2, 0)),
        1 => (Motion::Left, LedColor::new(2, 0, 0)),
        2 => (Motion::Right, LedColor::new(0, 0, 2)),
        _ => (Motion::Stop, LedColor::WHITE),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Installed without the `log` bridge so fast_log can own the `log` facade.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting swarm bridge");

    let config = Config::load(CONFIG_PATH).await?;

    let logger = init_buffered_logger(init_logger(&config.logging), 1024);

    let channel = match TcpSignalChannel::connect(&config.simulator, &config.channel).await {
        Ok(channel) => channel,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let protocol = SignalProtocol::new(channel, config.channel.poll_policy(), logger.clone());
    let registry = RobotRegistry::with_uids(config.demo.uids()?);
    let mut swarm = SwarmService::new(protocol, registry, logger);

    for state in swarm.run_once(demo_command).await? {
        println!("{}", serde_json::to_string(&state)?);
    }

    let (protocol, _registry) = swarm.into_parts();
    protocol.into_channel().close().await?;

    info!("Swarm bridge finished");
    Ok(())
}
