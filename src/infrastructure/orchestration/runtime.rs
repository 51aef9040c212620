//! Orchestrator runtime lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::application::dispatch::Trigger;
use crate::application::pipeline::LiquidationPipeline;
use crate::error::Result;
use crate::infrastructure::bootstrap::{
    build_pipeline, build_queue, build_sink, build_source, poll_interval,
};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::resources::load_classifier;
use crate::port::LiquidationSource;

/// Main application orchestrator.
pub struct Orchestrator;

impl Orchestrator {
    /// Run with externally controlled shutdown signal.
    ///
    /// Resources and the event source are set up first; any failure there
    /// aborts startup.
    pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(
            dry_run = config.dry_run,
            sink = config.effective_sink().as_str(),
            abi = ?config.chain.abi_version,
            "Starting srekt"
        );

        let classifier = Arc::new(load_classifier(&config.severity)?);
        let sink = build_sink(&config)?;
        let queue = build_queue(&config, sink);
        let pipeline = build_pipeline(&config, classifier, queue);
        let mut source = build_source(&config).await?;

        serve(
            &pipeline,
            source.as_mut(),
            config.dispatch.trigger(),
            poll_interval(&config),
            shutdown,
        )
        .await
    }
}

/// Run the dispatcher and the source loop until shutdown, then flush.
///
/// Messages still queued at shutdown get one final drain.
pub async fn serve<S: LiquidationSource + ?Sized>(
    pipeline: &LiquidationPipeline,
    source: &mut S,
    trigger: Trigger,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let dispatcher = tokio::spawn(Arc::clone(pipeline.queue()).run(trigger));

    tokio::select! {
        () = pipeline.run(source, poll_interval) => {}
        () = wait_for_shutdown(&mut shutdown) => {
            info!("Shutdown signal received");
        }
    }

    // Waits out any drain already in flight before the dispatcher stops.
    let report = pipeline.queue().drain().await;
    dispatcher.abort();

    info!(
        delivered = report.delivered,
        failed = report.failed,
        "Dispatch queue flushed"
    );

    Ok(())
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            return;
        }
        if shutdown.changed().await.is_err() {
            info!("Shutdown channel closed");
            return;
        }
    }
}
