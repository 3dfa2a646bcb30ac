//! Simulated long-running processing shown between submission and review.
//!
//! No analysis happens here. A [`SimulatedProcessing`] declares a duration and a
//! list of phases with percent thresholds; [`SimulatedProcessing::progress_at`] maps
//! elapsed time onto that script and [`SimulatedProcessing::run`] plays it back in
//! real time through a `watch` channel. Keeping the script here leaves the wizard
//! state machine free of any timing concerns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    claim::{ClaimGenerator, ClaimRecord},
    error::Result,
    payload::SubmissionPayload,
};

/// One named stage of the simulated run, entered once progress reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingPhase {
    pub title: String,
    pub description: String,
    pub threshold: u8,
}

impl ProcessingPhase {
    pub fn new(title: impl Into<String>, description: impl Into<String>, threshold: u8) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            threshold: threshold.min(100),
        }
    }
}

/// Snapshot of a simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub percent: u8,
    /// Index of the active phase.
    pub phase: usize,
}

impl Progress {
    pub fn is_finished(&self) -> bool {
        self.percent >= 100
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedProcessing {
    pub duration: Duration,
    pub tick: Duration,
    pub phases: Vec<ProcessingPhase>,
}

impl Default for SimulatedProcessing {
    /// Fifty 100 ms ticks of 2 % each, with four phases at quarter marks.
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            tick: Duration::from_millis(100),
            phases: vec![
                ProcessingPhase::new(
                    "Analyzing incident data",
                    "Processing photos and incident details",
                    0,
                ),
                ProcessingPhase::new(
                    "Generating refined prompts",
                    "Creating optimized claim structure",
                    25,
                ),
                ProcessingPhase::new(
                    "Maximizing claim value",
                    "Applying optimization algorithms",
                    50,
                ),
                ProcessingPhase::new(
                    "Finalizing your claim",
                    "Preparing downloadable document",
                    75,
                ),
            ],
        }
    }
}

impl SimulatedProcessing {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Where the script stands after `elapsed`. Pure; a zero duration is already finished.
    pub fn progress_at(&self, elapsed: Duration) -> Progress {
        let percent = if self.duration.is_zero() {
            100
        } else {
            let ratio = elapsed.as_nanos().saturating_mul(100) / self.duration.as_nanos();
            ratio.min(100) as u8
        };
        Progress {
            percent,
            phase: self.phase_for(percent),
        }
    }

    /// Last phase whose threshold has been reached.
    pub fn phase_for(&self, percent: u8) -> usize {
        self.phases
            .iter()
            .rposition(|phase| percent >= phase.threshold)
            .unwrap_or(0)
    }

    /// Plays the script back, publishing every tick, and returns the final snapshot.
    pub async fn run(&self, progress: &watch::Sender<Progress>) -> Progress {
        let tick = self.tick.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let started = Instant::now();
        info!(duration_ms = self.duration.as_millis() as u64, "Simulated processing started");

        loop {
            interval.tick().await;
            let snapshot = self.progress_at(started.elapsed());
            let previous = progress.send_replace(snapshot);
            if previous.phase != snapshot.phase {
                debug!(
                    phase = snapshot.phase,
                    title = self.phases.get(snapshot.phase).map(|p| p.title.as_str()),
                    "Processing phase entered"
                );
            }
            if snapshot.is_finished() {
                info!("Simulated processing finished");
                return snapshot;
            }
        }
    }
}

/// Runs a [`SimulatedProcessing`] script before delegating to another generator.
///
/// All runs publish through one progress channel, so this generator serves one
/// session at a time. Each run restarts the published progress at zero; share one
/// instance across concurrently completing sessions only if interleaved progress
/// is acceptable.
pub struct ProcessingClaimGenerator<G> {
    inner: G,
    simulation: SimulatedProcessing,
    progress: watch::Sender<Progress>,
}

impl<G: ClaimGenerator> ProcessingClaimGenerator<G> {
    pub fn new(inner: G, simulation: SimulatedProcessing) -> Self {
        let (progress, _) = watch::channel(Progress::default());
        Self {
            inner,
            simulation,
            progress,
        }
    }

    pub fn simulation(&self) -> &SimulatedProcessing {
        &self.simulation
    }

    /// Progress updates of the current (or next) run.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }
}

#[async_trait]
impl<G: ClaimGenerator> ClaimGenerator for ProcessingClaimGenerator<G> {
    async fn generate(&self, payload: &SubmissionPayload) -> Result<ClaimRecord> {
        self.progress.send_replace(Progress::default());
        self.simulation.run(&self.progress).await;
        self.inner.generate(payload).await
    }
}
