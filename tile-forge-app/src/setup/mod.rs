//! Setup module for the Tile Forge application.
//!
//! This module loads the rules and drives generation attempts.

pub mod execution;
