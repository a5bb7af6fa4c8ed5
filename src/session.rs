use crate::world::{DemoWorld, OVERWORLD};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant};
use webmap_common::{Result, UnitPos};
use webmap_logger::{log, LogSeverity::*};
use webmap_server::{
    ClaimEnricher, Config, Credentials, IntegrationRegistry, MetadataEnricher, Stats, WebMap,
};
use webmap_upload::Transport;

/// How long to wait for in-flight work at shutdown
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters of a simulated server session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Units rendered around the origin, in each direction
    pub radius: i32,
    pub duration: Duration,
    pub tick_rate: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            radius: 4,
            duration: Duration::from_secs(3),
            tick_rate: Duration::from_millis(50),
        }
    }
}

/// Everything west of the origin belongs to the red team
fn demo_claims() -> Arc<dyn MetadataEnricher> {
    Arc::new(ClaimEnricher::new(
        || true,
        |unit, _| (unit.x < 0).then(|| "red".to_owned()),
    ))
}

/// Plays the host's part for one world lifetime: saves a square of units, ticks for
/// `options.duration`, then shuts the pipeline down and reports.
pub async fn run(
    config: Config,
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    options: &SessionOptions,
) -> Result<Stats> {
    let world = Arc::new(DemoWorld::default());
    let map = WebMap::new(
        config,
        transport,
        IntegrationRegistry::new(vec![demo_claims()]),
    )?;
    map.set_credentials(Some(credentials));
    map.on_world_started();

    let mut submitted = 0;
    for x in -options.radius..=options.radius {
        for z in -options.radius..=options.radius {
            if map.on_unit_saved(world.unit(OVERWORLD, UnitPos::new(x, z)), false) {
                submitted += 1;
            }
        }
    }
    log(format!("Submitted {} units for rendering", submitted), Info);

    if let Some(url) = map.map_url(OVERWORLD) {
        log(format!("Map available at {}", url), Info);
    }

    let deadline = Instant::now() + options.duration;
    let mut ticker = interval(options.tick_rate);
    let mut tick = 0u64;
    while Instant::now() < deadline {
        ticker.tick().await;
        map.tick(&world.snapshot(tick));
        tick += 1;
        if tick % 20 == 0 {
            log(map.stats().debug_line(), Debug);
        }
    }

    if !wait_idle(&map).await {
        log("Renders still running at shutdown".to_owned(), Warning);
    }
    map.on_world_stopping();
    if !wait_idle(&map).await {
        log("Shutting down with uploads still in flight".to_owned(), Warning);
    }

    Ok(map.stats())
}

async fn wait_idle(map: &Arc<WebMap>) -> bool {
    let map = Arc::clone(map);
    tokio::task::spawn_blocking(move || map.wait_idle(IDLE_TIMEOUT))
        .await
        .unwrap_or(false)
}
