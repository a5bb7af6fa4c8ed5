use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::runtime::{Builder, Runtime};
use webmap_common::{Result, WebMapError};
use webmap_logger::log;
use webmap_logger::LogSeverity::{Error, Info};

/// Fixed-size pool of OS threads for blocking work.
///
/// Tasks are queued without bound and run on at most `threads` threads at a time. A panicking
/// task is logged at Error and does not take its thread down.
#[derive(Debug)]
pub struct WorkerPool {
    name: String,
    runtime: Option<Runtime>,
}

impl WorkerPool {
    pub fn new(name: &str, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(WebMapError::ConfigError(format!(
                "{} pool needs at least one thread",
                name
            )));
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(threads)
            .thread_name(format!("webmap-{}", name))
            .build()?;

        log(
            format!("Started {} pool with {} threads", name, threads),
            Info,
        );

        Ok(Self {
            name: name.to_owned(),
            runtime: Some(runtime),
        })
    }

    /// Schedules `task` and returns immediately
    pub fn execute<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(runtime) = &self.runtime {
            let name = self.name.clone();
            drop(runtime.spawn_blocking(move || {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                    log(
                        format!("Task on {} pool panicked: {}", name, panic_message(&*payload)),
                        Error,
                    );
                }
            }));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Does not wait for queued tasks and is safe to call from any thread.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
