use crate::bodies::RigidBody;
use crate::error::PhysicsError;
use crate::locomotion::TangentFrame;
use crate::math::Vector3;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Movement input for one frame, in the body's tangent frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Forward (+) / backward (-) input, -1..1
    pub forward: f32,

    /// Right (+) / left (-) input, -1..1
    pub right: f32,

    /// Sprint modifier held
    pub sprint: bool,

    /// Jump button held
    pub jump: bool,
}

impl MovementIntent {
    /// Intent with only directional input
    pub fn new(forward: f32, right: f32) -> Self {
        Self { forward, right, ..Self::default() }
    }

    /// Sets the sprint modifier
    pub fn with_sprint(mut self, sprint: bool) -> Self {
        self.sprint = sprint;
        self
    }

    /// Sets the jump button
    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }
}

/// Tunables for the locomotion controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LocomotionConfig {
    /// Walking speed (m/s)
    pub walk_speed: f32,

    /// Sprinting speed (m/s)
    pub sprint_speed: f32,

    /// Tangential acceleration on the ground (m/s²)
    pub acceleration: f32,

    /// Fraction of `acceleration` available while airborne
    pub air_control: f32,

    /// Radial speed gained by a jump (m/s)
    pub jump_speed: f32,

    /// Seconds after leaving the ground during which a jump is still allowed
    pub coyote_time: f32,

    /// Seconds a jump press is remembered before landing
    pub jump_buffer: f32,
}

impl LocomotionConfig {
    /// Checks that every tunable is usable
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("acceleration", self.acceleration),
            ("jump_speed", self.jump_speed),
            ("coyote_time", self.coyote_time),
            ("jump_buffer", self.jump_buffer),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PhysicsError::InvalidParameter(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        if !(0.0..=1.0).contains(&self.air_control) {
            return Err(PhysicsError::InvalidParameter(format!(
                "air_control must be in [0, 1], got {}",
                self.air_control
            )));
        }
        Ok(())
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 9.0,
            acceleration: 40.0,
            air_control: 0.3,
            jump_speed: 6.0,
            coyote_time: 0.1,
            jump_buffer: 0.15,
        }
    }
}

/// What `drive` did this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveOutcome {
    /// The frame movement was expressed in
    pub frame: TangentFrame,

    /// Whether a jump impulse was applied
    pub jumped: bool,

    /// Whether the entity landed from a jump this frame
    pub landed: bool,
}

/// Converts movement intent into velocity changes on a body.
///
/// Jump timing uses two countdown timers advanced by `drive`: coyote time
/// (refilled while grounded) and the jump buffer (refilled on a jump press).
/// A jump fires when both are running.
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    config: LocomotionConfig,

    /// Time left to jump after leaving the ground
    coyote_timer: f32,

    /// Time left on a remembered jump press
    jump_buffer_timer: f32,

    /// Previous frame's jump input, for edge detection
    prev_jump_pressed: bool,
}

impl LocomotionController {
    /// Creates a controller with validated tunables
    pub fn new(config: LocomotionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Returns the tunables
    pub fn get_config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Returns the remaining coyote time
    pub fn get_coyote_timer(&self) -> f32 {
        self.coyote_timer
    }

    /// Returns the remaining jump buffer time
    pub fn get_jump_buffer_timer(&self) -> f32 {
        self.jump_buffer_timer
    }

    /// Forgets timers and input history
    pub fn reset(&mut self) {
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
        self.prev_jump_pressed = false;
    }

    /// Applies one frame of movement intent to `body`.
    ///
    /// The tangential velocity is accelerated toward the requested speed,
    /// the radial velocity is left to gravity, and a jump is launched along
    /// the surface normal when the timers allow it.
    pub fn drive(
        &mut self,
        body: &mut RigidBody,
        intent: &MovementIntent,
        reference_forward: Vector3,
        dt: f32,
    ) -> DriveOutcome {
        let dt = dt.max(0.0);
        let frame = TangentFrame::new(body.get_surface_normal(), reference_forward);
        let velocity = body.get_linear_velocity();
        let radial_speed = frame.radial(velocity);
        let on_ground = body.is_on_ground();

        let landed = on_ground && radial_speed <= 0.0 && body.is_jumping();
        if landed {
            body.link_mut().is_jumping = false;
        }

        if on_ground && !body.is_jumping() {
            self.coyote_timer = self.config.coyote_time;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }

        let jump_just_pressed = intent.jump && !self.prev_jump_pressed;
        self.prev_jump_pressed = intent.jump;
        if jump_just_pressed {
            self.jump_buffer_timer = self.config.jump_buffer;
        } else {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }

        // Tangential steering
        let mut wish = frame.to_world(intent.forward, intent.right);
        if wish.norm_squared() > 1.0 {
            wish = wish.normalize();
        }
        let speed = if intent.sprint { self.config.sprint_speed } else { self.config.walk_speed };
        let target = wish * speed;

        let tangential = frame.tangential(velocity);
        let control = if on_ground { 1.0 } else { self.config.air_control };
        let max_change = self.config.acceleration * control * dt;

        let mut change = target - tangential;
        let change_len = change.norm();
        if change_len > max_change {
            change *= max_change / change_len;
        }
        body.set_linear_velocity(tangential + change + frame.up * radial_speed);

        let jumped = self.jump_buffer_timer > 0.0 && self.coyote_timer > 0.0;
        if jumped {
            // Start the jump from zero radial speed so height does not depend on landing speed
            let velocity = body.get_linear_velocity();
            let inward = frame.radial(velocity);
            if inward < 0.0 {
                body.set_linear_velocity(velocity - frame.up * inward);
            }

            body.apply_impulse(frame.up * (self.config.jump_speed * body.get_mass()));
            body.link_mut().is_jumping = true;

            self.jump_buffer_timer = 0.0;
            self.coyote_timer = 0.0;
        }

        DriveOutcome { frame, jumped, landed }
    }
}
