//! Time-driven animation state
//!
//! Everything here is advanced by elapsed-time deltas supplied by the caller.
//! No module in `anim` owns a real timer, which keeps teardown trivial and
//! tests deterministic.

pub mod gauge;
pub mod sequencer;
pub mod timer;
pub mod tunnel;

pub use gauge::WindGauge;
pub use sequencer::{SequencerEvent, SequencerTiming, Stage, StageSequencer};
pub use timer::OneShot;
pub use tunnel::{TunnelEvent, TunnelTiming, TunnelTransition};
