//! Run the live accumulation loop.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use stickheat_common::clock::{period_from_hz, SessionClock, TickMeter};
use stickheat_common::config::AppConfig;
use stickheat_core::deadzone::DeadzoneFilter;
use stickheat_core::persist::{load_into_session, save_session};
use stickheat_core::sample::{Stick, StickSnapshot};
use stickheat_core::session::{HeatSession, TickOutcome};
use stickheat_core::tuning::TuningParams;
use stickheat_input::{detect_best_sampler, sample_or_neutral, AxisSampler, ScriptedSampler};
use stickheat_render::{FrameRenderer, FrameSink, NullSink, PngSnapshotSink};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::control::{self, ControlCommand};

pub struct RunOptions {
    pub hz: Option<u32>,
    pub max_ticks: Option<u64>,
    pub script: Option<PathBuf>,
    pub load: Option<PathBuf>,
    pub save_on_exit: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
    pub snapshot_every: u64,
    pub tuning: TuningParams,
    pub stdin_controls: bool,
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one tick touches, owned by the loop task.
pub struct TickLoop {
    session: HeatSession,
    tuning: TuningParams,
    renderer: FrameRenderer,
    sink: Box<dyn FrameSink>,
}

impl TickLoop {
    pub fn new(session: HeatSession, tuning: TuningParams, sink: Box<dyn FrameSink>) -> Self {
        let renderer = FrameRenderer::for_session(&session);
        Self {
            session,
            tuning,
            renderer,
            sink,
        }
    }

    pub fn session(&self) -> &HeatSession {
        &self.session
    }

    pub fn tuning(&self) -> TuningParams {
        self.tuning
    }

    /// Accumulate, render and present one tick.
    pub fn step(&mut self, snapshot: &StickSnapshot) -> TickOutcome {
        let outcome = self.session.tick(snapshot, &self.tuning);

        if let Some(state) = outcome.recording_changed {
            tracing::info!(recording = state.is_recording(), "Recording state changed");
        }
        if outcome.reset {
            tracing::info!(tick = self.session.ticks(), "Heatmaps reset by trigger");
        }

        self.renderer.render(&self.session, &self.tuning);
        for stick in Stick::ALL {
            if let Err(e) = self.sink.present(stick, self.renderer.frame(stick)) {
                tracing::warn!(sink = self.sink.name(), error = %e, "Frame presentation failed");
            }
        }
        outcome
    }

    /// Apply a control command. Runs between ticks only.
    pub fn apply(&mut self, command: ControlCommand) -> Flow {
        match command {
            ControlCommand::Tune(action) => {
                self.tuning = self.tuning.apply(action);
                tracing::debug!(?action, "Tuning changed");
                println!("{}", self.tuning.status_line());
            }
            ControlCommand::Reset => {
                self.session.reset();
                tracing::info!("Heatmaps reset");
            }
            ControlCommand::Save(path) => {
                if let Err(e) = save_session(&self.session, &path) {
                    tracing::warn!(error = %e, "Save failed");
                    eprintln!("Save failed: {e}");
                }
            }
            ControlCommand::Load(path) => {
                if let Err(e) = load_into_session(&mut self.session, &path) {
                    tracing::warn!(error = %e, "Load failed; heatmaps unchanged");
                    eprintln!("Load failed: {e}");
                }
            }
            ControlCommand::Status => {
                println!(
                    "{} | Recording: {} | Ticks: {}",
                    self.tuning.status_line(),
                    self.session.recording_state().is_recording(),
                    self.session.ticks()
                );
            }
            ControlCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

pub async fn run(config: AppConfig, options: RunOptions) -> anyhow::Result<()> {
    let mut sampler: Box<dyn AxisSampler> = match &options.script {
        Some(path) => Box::new(ScriptedSampler::from_path(path)?),
        None => detect_best_sampler(&config.device),
    };

    let mut session = HeatSession::new(DeadzoneFilter::from_config(&config.deadzones));
    if let Some(path) = &options.load {
        load_into_session(&mut session, path)?;
    }

    let sink = build_sink(&options);
    let mut tick_loop = TickLoop::new(session, options.tuning, sink);

    let period = match options.hz {
        Some(hz) => period_from_hz(hz),
        None => Duration::from_millis(config.tick.period_ms.max(1)),
    };
    let mut meter = TickMeter::new(period, config.tick.stats_every_ticks);

    let (tx, mut rx) = mpsc::channel::<ControlCommand>(64);
    if options.stdin_controls {
        // Detached; a read blocked on open stdin must not delay exit
        control::spawn_stdin_reader(tx);
        println!("{}", control::HELP);
    } else {
        drop(tx);
    }

    let clock = SessionClock::start();
    tracing::info!(
        sampler = sampler.name(),
        connected = sampler.is_connected(),
        period_us = period.as_micros() as u64,
        started = clock.epoch_wall(),
        "Tick loop started"
    );
    println!("{}", tick_loop.tuning().status_line());
    println!("Press Ctrl+C to stop...");

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut error_streak = 0u64;

    'ticks: loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                println!();
                tracing::info!("Interrupted");
                break 'ticks;
            }
            _ = interval.tick() => {}
        }

        while let Ok(command) = rx.try_recv() {
            if tick_loop.apply(command) == Flow::Quit {
                break 'ticks;
            }
        }

        let started = Instant::now();

        let (snapshot, error) = sample_or_neutral(sampler.as_mut());
        match error {
            Some(e) => {
                if error_streak == 0 {
                    tracing::warn!(sampler = sampler.name(), error = %e, "Sampling failed; using neutral snapshot");
                }
                error_streak += 1;
            }
            None if error_streak > 0 => {
                tracing::info!(failed_ticks = error_streak, "Sampling recovered");
                error_streak = 0;
            }
            None => {}
        }

        tick_loop.step(&snapshot);

        if let Some(stats) = meter.record(started.elapsed()) {
            tracing::debug!(
                ticks = stats.ticks,
                mean_us = stats.mean.as_micros() as u64,
                max_us = stats.max.as_micros() as u64,
                overruns = stats.overruns,
                target_us = meter.target().as_micros() as u64,
                "Tick timing"
            );
        }

        if options
            .max_ticks
            .is_some_and(|max| tick_loop.session().ticks() >= max)
        {
            break;
        }
    }

    let ticks = tick_loop.session().ticks();
    tracing::info!(ticks, elapsed_secs = clock.elapsed_secs(), "Tick loop stopped");

    if let Some(path) = &options.save_on_exit {
        save_session(tick_loop.session(), path)?;
        println!("Heatmaps saved to: {}", path.display());
    }

    Ok(())
}

fn build_sink(options: &RunOptions) -> Box<dyn FrameSink> {
    match &options.snapshot_dir {
        Some(dir) => {
            let dir = dir.join(SessionClock::file_stamp());
            tracing::info!(dir = %dir.display(), every = options.snapshot_every, "Writing frame snapshots");
            Box::new(PngSnapshotSink::new(dir, options.snapshot_every))
        }
        None => Box::new(NullSink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickheat_core::sample::{StickPosition, SwitchState};
    use stickheat_core::tuning::TuningAction;

    fn small_loop() -> TickLoop {
        let session = HeatSession::with_size(DeadzoneFilter::default(), 64, 64);
        TickLoop::new(session, TuningParams::default(), Box::new(NullSink))
    }

    fn active() -> StickSnapshot {
        StickSnapshot::NEUTRAL.with_position(Stick::Left, StickPosition::new(20, 20))
    }

    #[test]
    fn tuning_commands_apply_to_next_tick() {
        let mut tick_loop = small_loop();
        assert_eq!(
            tick_loop.apply(ControlCommand::Tune(TuningAction::RadiusDown)),
            Flow::Continue
        );
        assert_eq!(tick_loop.tuning().kernel_radius(), 14);

        tick_loop.step(&active());
        let grid = tick_loop.session().grid(Stick::Left);
        assert!(grid.cell(20 + 13, 20).unwrap() > 0.0);
        assert_eq!(grid.cell(20 + 14, 20), Some(0.0));
    }

    #[test]
    fn reset_command_clears_grids() {
        let mut tick_loop = small_loop();
        tick_loop.step(&active());
        assert!(tick_loop.session().grid(Stick::Left).stats().max > 0.0);

        tick_loop.apply(ControlCommand::Reset);
        assert_eq!(tick_loop.session().grid(Stick::Left).stats().nonzero, 0);
        assert_eq!(tick_loop.session().grid(Stick::Right).stats().nonzero, 0);
    }

    #[test]
    fn save_then_load_round_trips_through_commands() {
        let dir = std::env::temp_dir().join("stickheat_test_run_commands");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("heat.bin");

        let mut tick_loop = small_loop();
        tick_loop.step(&active());
        let saved = tick_loop.session().grid(Stick::Left).clone();
        tick_loop.apply(ControlCommand::Save(path.clone()));

        tick_loop.apply(ControlCommand::Reset);
        tick_loop.apply(ControlCommand::Load(path));
        assert_eq!(tick_loop.session().grid(Stick::Left), &saved);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn failed_load_keeps_grids() {
        let mut tick_loop = small_loop();
        tick_loop.step(&active());
        let before = tick_loop.session().grid(Stick::Left).clone();

        let flow = tick_loop.apply(ControlCommand::Load(PathBuf::from(
            "/nonexistent/stickheat/heat.bin",
        )));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(tick_loop.session().grid(Stick::Left), &before);
    }

    #[test]
    fn quit_stops_the_loop() {
        assert_eq!(small_loop().apply(ControlCommand::Quit), Flow::Quit);
    }

    #[test]
    fn paused_ticks_do_not_stamp() {
        let mut tick_loop = small_loop();
        let paused = active().with_switch(SwitchState::Low);
        let first = tick_loop.step(&paused);
        tick_loop.step(&paused);

        assert_eq!(first.recording_changed.map(|s| s.is_recording()), Some(false));
        assert_eq!(tick_loop.session().grid(Stick::Left).stats().nonzero, 0);
        assert_eq!(tick_loop.session().ticks(), 2);
    }
}
