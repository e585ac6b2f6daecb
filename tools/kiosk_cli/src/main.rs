//! Replay harness standing in for the out-of-scope kiosk UI and camera
//! SDK: reads a skeleton trace (recorded or the bundled synthetic demo),
//! drives it through the kick/header detectors and the chosen challenge
//! variant, and prints the resulting events and `ChallengeResult`.

mod replay;
mod synthetic;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use challenge::{
    AccuracyChallenge, Challenge, ChallengeConfig, PenaltyShootoutChallenge, PowerChallenge,
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use header_detector::HeaderDetector;
use kick_analyzer::KickAnalyzer;
use kick_detector::{KickDetector, KickEvent};
use motion_core::SkeletonSource;
use nalgebra::Point3;
use types::geometry::elapsed_seconds;
use types::{SessionRecord, TargetZone};

use replay::ReplaySource;
use synthetic::SyntheticSource;

#[derive(Debug, Parser)]
#[command(author, version, about = "Replay harness for the motion analysis engine")]
struct Cli {
    #[command(subcommand)]
    challenge: ChallengeCommand,

    /// Newline-delimited JSON skeleton replay file. Defaults to a bundled
    /// synthetic demo trace (one right-foot instep kick).
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// TOML file overriding the chosen challenge variant's defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum ChallengeCommand {
    Accuracy,
    Power,
    Penalty,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    motion_core::logging::init_from_env("info");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => motion_core::config::load_toml(path).wrap_err("failed to load challenge configuration")?,
        None => default_config_for(&cli.challenge),
    };

    let mut source: Box<dyn SkeletonSource> = match &cli.input {
        Some(path) => Box::new(ReplaySource::load(path).wrap_err("failed to load replay file")?),
        None => Box::new(SyntheticSource::demo_kick()),
    };

    run(source.as_mut(), config, challenge_label(&cli.challenge))
}

fn challenge_label(command: &ChallengeCommand) -> &'static str {
    match command {
        ChallengeCommand::Accuracy => "accuracy",
        ChallengeCommand::Power => "power",
        ChallengeCommand::Penalty => "penalty",
    }
}

fn default_config_for(command: &ChallengeCommand) -> ChallengeConfig {
    match command {
        ChallengeCommand::Accuracy => ChallengeConfig::Accuracy(Default::default()),
        ChallengeCommand::Power => ChallengeConfig::Power(Default::default()),
        ChallengeCommand::Penalty => ChallengeConfig::Penalty(Default::default()),
    }
}

fn run(source: &mut dyn SkeletonSource, config: ChallengeConfig, challenge_name: &str) -> Result<()> {
    let kick_events: Rc<RefCell<Vec<KickEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let kick_events_sink = kick_events.clone();

    let mut kick_detector = KickDetector::default();
    kick_detector.set_kick_callback(Some(Box::new(move |event| kick_events_sink.borrow_mut().push(event))));

    let mut header_detector = HeaderDetector::default();
    header_detector.set_header_callback(Some(Box::new(|event| {
        log::info!(
            "header: {:?} overall={:.1}",
            event.result.header_type,
            event.result.quality.overall_score
        );
    })));

    let analyzer = KickAnalyzer::default();
    // A single, centered downfield target: good enough for the CLI demo,
    // not a stand-in for a real challenge-specific aim point.
    let target = TargetZone::new(Point3::new(0.0, 0.0, 10.0), 1.0);

    let mut challenge: Box<dyn Challenge> = match config {
        ChallengeConfig::Accuracy(c) => Box::new(AccuracyChallenge::new(c)),
        ChallengeConfig::Power(c) => Box::new(PowerChallenge::new(c)),
        ChallengeConfig::Penalty(c) => Box::new(PenaltyShootoutChallenge::new(c)),
    };
    challenge.start();

    let mut first_timestamp_us = None;
    let mut last_timestamp_us = 0;

    while let Some(frame) = source.next_frame() {
        first_timestamp_us.get_or_insert(frame.timestamp_us);
        last_timestamp_us = frame.timestamp_us;

        kick_detector.process_skeleton(&frame);
        header_detector.process_skeleton(&frame);

        for event in kick_events.borrow_mut().drain(..) {
            let refined = analyzer.analyze(&event.result, &event.contact, Some(&target));
            log::info!(
                "kick: {:?} foot={:?} overall={:.1}",
                refined.kick_type,
                refined.foot,
                refined.quality.overall_score
            );
            challenge.on_kick(&refined);
        }

        let elapsed_s = elapsed_seconds(first_timestamp_us.unwrap_or(0), last_timestamp_us);
        challenge.tick(elapsed_s);
    }

    match challenge.result() {
        Some(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);

            // Demonstrates the persisted-state contract (spec.md §6): the
            // engine only ever produces these records, never reads them
            // back, so there's no session/player identity to wire up here.
            let record = SessionRecord {
                session_id: "replay-session".to_string(),
                player_id: "replay-player".to_string(),
                challenge: challenge_name.to_string(),
                score: result.final_score,
                accuracy: result.accuracy,
                duration_ms: (result.duration_s * 1000.0) as u64,
                shared: false,
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        None => {
            log::warn!("replay ended before the challenge reached Complete");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_trace_drives_a_power_challenge_to_completion() {
        let mut source = SyntheticSource::demo_kick();
        let result = run(
            &mut source,
            ChallengeConfig::Power(challenge::config::PowerConfig {
                max_attempts: 1,
                ..Default::default()
            }),
            "power",
        );
        assert!(result.is_ok());
    }
}
