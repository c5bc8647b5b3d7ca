//! Controller layer: UI events, screen-routing state machine, and command
//! orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
