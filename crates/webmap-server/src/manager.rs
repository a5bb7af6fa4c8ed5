use crate::config::Config;
use crate::counters::Counters;
use crate::host::{HostUnit, ServerSnapshot};
use crate::integration::IntegrationRegistry;
use crate::pool::WorkerPool;
use crate::report::Stats;
use crate::seen::SeenSet;
use serde_json::Map;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;
use std::time::{Duration, Instant};
use webmap_common::{Result, UnitPos};
use webmap_logger::log;
use webmap_logger::LogSeverity;
use webmap_render::sample_unit;
use webmap_upload::{endpoint, BatchCompactor, BatchSink, HttpMethod, Packet, Request, Transport};

/// Server identity issued by the map service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub token: String,
}

/// Owns the whole render and upload pipeline of one server process.
///
/// The host drives it through the `on_*` hooks and `tick`; everything else happens on the two
/// worker pools.
pub struct WebMap {
    config: Config,
    credentials: RwLock<Option<Credentials>>,
    counters: Arc<Counters>,
    seen: SeenSet,
    compactor: BatchCompactor,
    integrations: IntegrationRegistry,
    transport: Arc<dyn Transport>,
    render_pool: WorkerPool,
    upload_pool: WorkerPool,
    ticks: AtomicU64,
}

impl std::fmt::Debug for WebMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebMap")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WebMap {
    pub fn new(
        config: Config,
        transport: Arc<dyn Transport>,
        integrations: IntegrationRegistry,
    ) -> Result<Arc<Self>> {
        config.validate()?;

        let counters = Arc::new(Counters::new());
        let render_pool = WorkerPool::new("render", config.render_threads)?;
        let upload_pool = WorkerPool::new("upload", config.upload_threads)?;

        Ok(Arc::new(Self {
            seen: SeenSet::new(Arc::clone(&counters)),
            compactor: BatchCompactor::new(config.batch_size),
            credentials: RwLock::new(None),
            counters,
            integrations,
            transport,
            render_pool,
            upload_pool,
            ticks: AtomicU64::new(0),
            config,
        }))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn stats(&self) -> Stats {
        Stats::capture(&self.counters)
    }

    pub fn set_credentials(&self, credentials: Option<Credentials>) {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_unseen(&self, unit: UnitPos) -> bool {
        self.seen.is_unseen(unit)
    }

    pub fn pending_packets(&self) -> usize {
        self.compactor.pending_total()
    }

    /// Browser link to a dimension's map, once the server identity is known
    pub fn map_url(&self, dimension: &str) -> Option<String> {
        self.credentials()
            .map(|credentials| endpoint::map_page(&self.config.url, &credentials.identifier, dimension))
    }

    /// Host hook for a (re)started world: forgets what was rendered and re-probes integrations
    pub fn on_world_started(&self) {
        self.seen.reset();
        self.integrations.probe();
        log("World started, render state reset".to_owned(), LogSeverity::Info);
    }

    /// Host hook for a unit about to be persisted. Renders it when it changed or was never
    /// rendered. Returns whether a render was submitted.
    pub fn on_unit_saved<U: HostUnit>(self: &Arc<Self>, unit: U, needs_saving: bool) -> bool {
        if needs_saving || self.seen.is_unseen(unit.unit()) {
            self.submit_render(unit);
            true
        } else {
            false
        }
    }

    /// Host hook for shutdown: pushes out every queued packet
    pub fn on_world_stopping(&self) {
        self.sync_all();
    }

    /// Renders `unit` on the render pool and queues the result for upload
    pub fn submit_render<U: HostUnit>(self: &Arc<Self>, unit: U) {
        self.counters.render_queued();
        let map = Arc::clone(self);
        self.render_pool.execute(move || {
            let _in_flight = map.counters.render_started();
            match map.render_unit(&unit) {
                Ok(true) => map.counters.render_completed(),
                Ok(false) => {}
                Err(err) => log(
                    format!(
                        "Failed to render unit {},{} in {}: {}",
                        unit.unit().x,
                        unit.unit().z,
                        unit.dimension(),
                        err
                    ),
                    LogSeverity::Error,
                ),
            }
        });
    }

    /// Samples, encodes and queues one unit. `Ok(false)` means the unit was skipped.
    pub fn render_unit<U: HostUnit + ?Sized>(&self, unit: &U) -> Result<bool> {
        let credentials = match self.credentials() {
            Some(credentials) => credentials,
            None => return Ok(false),
        };
        let pos = unit.unit();
        if !unit.is_complete() {
            return Ok(false);
        }

        let image = match sample_unit(unit)? {
            Some(image) => image,
            None => {
                log(
                    format!("Skipping unit {},{} without heightmap", pos.x, pos.z),
                    LogSeverity::Debug,
                );
                return Ok(false);
            }
        };

        let mut meta = Map::new();
        self.integrations
            .fill_metadata(pos, unit.dimension(), &mut meta);
        let packet = Packet::encode(pos.start_x(), pos.start_z(), &image, &meta);

        let endpoint = endpoint::chunks(&credentials.identifier, unit.dimension());
        self.compactor.append(&endpoint, packet, self);

        self.seen.mark_seen(pos);
        Ok(true)
    }

    /// Flushes every queued packet to the upload pool
    pub fn sync_all(&self) -> usize {
        if self.credentials().is_none() {
            return 0;
        }
        self.compactor.sync_all(self)
    }

    /// Sends `request` on the upload pool. Failures are logged and the request is dropped.
    pub fn submit_upload(&self, request: Request) {
        self.counters.upload_queued();
        let transport = Arc::clone(&self.transport);
        let counters = Arc::clone(&self.counters);
        self.upload_pool.execute(move || {
            let _in_flight = counters.upload_started();
            if let Err(err) = send(transport.as_ref(), &counters, &request) {
                log(
                    format!("Upload {} {} failed: {}", request.method, request.path, err),
                    LogSeverity::Error,
                );
            }
        });
    }

    /// Host hook for every server tick. Every `tick_interval` ticks the server and dimension
    /// metadata is uploaded.
    pub fn tick(&self, snapshot: &ServerSnapshot) {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        if tick % self.config.tick_interval != 0 {
            return;
        }
        let credentials = match self.credentials() {
            Some(credentials) => credentials,
            None => return,
        };

        self.submit_upload(
            Request::new(HttpMethod::Put, endpoint::server_meta(&credentials.identifier))
                .with_query("token", credentials.token.as_str())
                .with_query("meta", snapshot.meta().to_string()),
        );

        for dimension in &snapshot.dimensions {
            self.submit_upload(
                Request::new(
                    HttpMethod::Put,
                    endpoint::dimension_meta(&credentials.identifier, &dimension.id),
                )
                .with_query("token", credentials.token.as_str())
                .with_query("meta", dimension.meta().to_string()),
            );
        }
    }

    /// Blocks until no render or upload is outstanding, or `timeout` passes. Returns true when
    /// the pipeline went idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.counters.outstanding_renders() <= 0 && self.counters.outstanding_uploads() <= 0
            {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl BatchSink for WebMap {
    fn dispatch(&self, endpoint: &str, batch: Vec<Packet>) {
        let credentials = match self.credentials() {
            Some(credentials) => credentials,
            None => {
                log(
                    format!(
                        "Dropping {} packets for {}: no credentials",
                        batch.len(),
                        endpoint
                    ),
                    LogSeverity::Warning,
                );
                return;
            }
        };

        self.submit_upload(
            Request::new(HttpMethod::Post, endpoint)
                .with_query("token", credentials.token)
                .with_body(batch),
        );
    }
}

fn send(transport: &dyn Transport, counters: &Counters, request: &Request) -> Result<()> {
    let body = request.compressed_body()?;
    if let Some(body) = &body {
        counters.body_sent(body.len());
    }
    transport.send(request, body.as_deref())?;
    Ok(())
}
