//! Typed stage sequencer
//!
//! Reveals an ordered list of stage labels one character per tick, pauses
//! after each label, and finishes with a delay and a fade before reporting
//! completion. The sequencer owns no timers: it is advanced by elapsed-time
//! deltas, so dropping it (or calling [`StageSequencer::cancel`]) leaves
//! nothing behind that could fire later.

use std::time::Duration;

use tracing::debug;

/// One named step of the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub label: String,
}

impl Stage {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Number of characters to type for this stage
    fn len(&self) -> usize {
        self.label.chars().count()
    }
}

/// Durations driving a sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerTiming {
    /// Interval between two revealed characters
    pub tick: Duration,
    /// Pause after a label is fully typed
    pub settle: Duration,
    /// Pause after the last stage before fading
    pub post_completion: Duration,
    /// Fade duration before completion is reported
    pub fade: Duration,
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(50),
            settle: Duration::from_millis(800),
            post_completion: Duration::from_millis(1000),
            fade: Duration::from_millis(1000),
        }
    }
}

/// Events produced while advancing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// First advance of the first stage; play the startup cue
    AudioCue,
    /// A character of stage `stage` was revealed
    CharRevealed { stage: usize, ch: char },
    /// Stage `stage` finished settling and the next one begins
    StageAdvanced { stage: usize },
    /// All stages done and the post-completion delay elapsed
    FadeOut,
    /// Sequence finished; emitted exactly once
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Settling,
    Finishing,
    Fading,
    Done,
    Cancelled,
}

/// Clock-free stage sequencer
#[derive(Debug, Clone)]
pub struct StageSequencer {
    stages: Vec<Stage>,
    timing: SequencerTiming,
    phase: Phase,
    stage_index: usize,
    chars_revealed: usize,
    /// Time already spent in the current phase step
    phase_elapsed: Duration,
    cue_sent: bool,
    transcript: String,
}

impl StageSequencer {
    /// Create a sequencer positioned before the first character of stage 0
    pub fn new(stages: Vec<Stage>, timing: SequencerTiming) -> Self {
        let phase = if stages.is_empty() {
            Phase::Finishing
        } else {
            Phase::Typing
        };
        let mut sequencer = Self {
            stages,
            timing,
            phase,
            stage_index: 0,
            chars_revealed: 0,
            phase_elapsed: Duration::ZERO,
            cue_sent: false,
            transcript: String::new(),
        };
        sequencer.settle_if_label_done();
        sequencer
    }

    /// Advance by `dt`, returning every event that happened in that interval in order
    pub fn advance(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        if matches!(self.phase, Phase::Done | Phase::Cancelled) {
            return events;
        }

        if !self.cue_sent {
            self.cue_sent = true;
            if !self.stages.is_empty() {
                events.push(SequencerEvent::AudioCue);
            }
        }

        let mut budget = self.phase_elapsed + dt;
        loop {
            let Some(step) = self.step_duration() else {
                break;
            };
            if budget < step {
                self.phase_elapsed = budget;
                break;
            }
            budget -= step;
            self.phase_elapsed = Duration::ZERO;
            self.finish_step(&mut events);
        }

        events
    }

    /// Stop the sequence; no further events are produced
    pub fn cancel(&mut self) {
        if self.phase != Phase::Done {
            debug!(stage = self.stage_index, "sequencer cancelled");
            self.phase = Phase::Cancelled;
        }
    }

    /// Overall progress in percent (0–100)
    pub fn overall_percent(&self) -> f64 {
        let count = self.stages.len();
        if count == 0 || self.stage_index >= count {
            return 100.0;
        }
        let len = self.stages[self.stage_index].len();
        let within = if len == 0 {
            1.0
        } else {
            self.chars_revealed as f64 / len as f64
        };
        100.0 * (self.stage_index as f64 + within) / count as f64
    }

    /// Number of filled segments in a bar of `total` segments
    pub fn progress_bars(&self, total: usize) -> usize {
        ((self.overall_percent() / 100.0) * total as f64).floor() as usize
    }

    /// Everything typed so far, one line per finished stage
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Index of the stage being typed, or `None` once all stages are done
    pub fn active_stage(&self) -> Option<usize> {
        (self.stage_index < self.stages.len()).then_some(self.stage_index)
    }

    /// Characters revealed in the active stage
    pub fn chars_revealed(&self) -> usize {
        self.chars_revealed
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.phase, Phase::Fading | Phase::Done)
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    /// Total time from the first advance to completion
    pub fn total_duration(&self) -> Duration {
        let typing: Duration = self
            .stages
            .iter()
            .map(|s| self.timing.tick * s.len() as u32 + self.timing.settle)
            .sum();
        typing + self.timing.post_completion + self.timing.fade
    }

    fn step_duration(&self) -> Option<Duration> {
        match self.phase {
            Phase::Typing => Some(self.timing.tick),
            Phase::Settling => Some(self.timing.settle),
            Phase::Finishing => Some(self.timing.post_completion),
            Phase::Fading => Some(self.timing.fade),
            Phase::Done | Phase::Cancelled => None,
        }
    }

    fn finish_step(&mut self, events: &mut Vec<SequencerEvent>) {
        match self.phase {
            Phase::Typing => {
                let stage = self.stage_index;
                if let Some(ch) = self.stages[stage].label.chars().nth(self.chars_revealed) {
                    self.transcript.push(ch);
                    self.chars_revealed += 1;
                    events.push(SequencerEvent::CharRevealed { stage, ch });
                }
                self.settle_if_label_done();
            }
            Phase::Settling => {
                self.transcript.push('\n');
                events.push(SequencerEvent::StageAdvanced {
                    stage: self.stage_index,
                });
                self.stage_index += 1;
                self.chars_revealed = 0;
                if self.stage_index >= self.stages.len() {
                    self.phase = Phase::Finishing;
                } else {
                    self.phase = Phase::Typing;
                    self.settle_if_label_done();
                }
            }
            Phase::Finishing => {
                self.phase = Phase::Fading;
                events.push(SequencerEvent::FadeOut);
            }
            Phase::Fading => {
                self.phase = Phase::Done;
                debug!("sequencer completed");
                events.push(SequencerEvent::Completed);
            }
            Phase::Done | Phase::Cancelled => {}
        }
    }

    fn settle_if_label_done(&mut self) {
        if self.phase == Phase::Typing
            && self.chars_revealed >= self.stages[self.stage_index].len()
        {
            self.phase = Phase::Settling;
        }
    }
}
