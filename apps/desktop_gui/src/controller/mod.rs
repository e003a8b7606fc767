//! Controller layer: link events, game state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
