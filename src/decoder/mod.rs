//! Bar-type classification
//!
//! Turns an ordered bar list into IMb bar types:
//! - Neighbour-to-neighbour transition table
//! - Seed selection and the two-direction classification walk

/// Seed selection and propagation walk
pub mod classify;
/// Transition lookup table
pub mod transitions;
