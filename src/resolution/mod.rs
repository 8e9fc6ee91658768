//! Round resolution: the phase scheduler and everything it drives.
//!
//! - `damage`: the single damage/heal/death pipeline
//! - `combat`: target eligibility and attack turns
//! - `feeding`: herbivore feeding, pile steals and avian foraging
//! - `scoring`: starvation and end-of-round points
//! - `scheduler`: `RoundScheduler`, which runs the phases in order
//! - `events`: the step-event log and per-round reports

pub mod combat;
pub mod damage;
pub mod events;
pub mod feeding;
pub mod scheduler;
pub mod scoring;
pub mod stats;

pub use combat::AttackOutcome;
pub use damage::DamageOutcome;
pub use events::{Phase, RoundReport, StepEvent};
pub use scheduler::RoundScheduler;
