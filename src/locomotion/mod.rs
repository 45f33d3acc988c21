//! Surface-relative movement for characters driven by gameplay input.
//!
//! Movement intent is expressed in a tangent frame built from the body's
//! surface normal, so the same controller walks on a flat floor or around a
//! planet.

mod tangent_frame;
mod controller;

pub use self::tangent_frame::TangentFrame;
pub use self::controller::{DriveOutcome, LocomotionConfig, LocomotionController, MovementIntent};
