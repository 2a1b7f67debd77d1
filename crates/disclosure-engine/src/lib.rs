//! Violation classification for suspected hidden-ad content.
//!
//! Turns the observable signals of one capture ([`shared_types::Evidence`])
//! into a violation classification: severity, domain tags, and a
//! recommendation the complaint document can quote. Pure and deterministic;
//! all I/O lives in the collaborators that produce the evidence.

pub mod classify;
pub mod patterns;

pub use classify::classify;
