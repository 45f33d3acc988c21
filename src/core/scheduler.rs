/// The sub-steps one update will run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Number of full fixed-size sub-steps
    pub full_steps: u32,

    /// Length of a trailing partial sub-step, if the cap was hit
    pub partial_step: Option<f32>,
}

impl StepPlan {
    /// Total number of sub-steps, including the partial one
    pub fn step_count(&self) -> u32 {
        self.full_steps + u32::from(self.partial_step.is_some())
    }

    /// Total simulated time covered by the plan
    pub fn simulated_time(&self, fixed_time_step: f32) -> f32 {
        self.full_steps as f32 * fixed_time_step + self.partial_step.unwrap_or(0.0)
    }
}

/// Fixed-timestep accumulator.
///
/// Frame deltas are clamped, accumulated, and drained in `fixed_time_step`
/// increments up to `max_substeps` per frame. Time left over after the cap
/// is consumed by one partial step and the accumulator is reset. The frame
/// clamp bounds how long that step can be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepScheduler {
    fixed_time_step: f32,
    max_substeps: u32,
    max_frame_delta: f32,
    accumulator: f32,
}

impl FixedStepScheduler {
    /// Creates a scheduler with an empty accumulator
    pub fn new(fixed_time_step: f32, max_substeps: u32, max_frame_delta: f32) -> Self {
        Self {
            fixed_time_step,
            max_substeps,
            max_frame_delta,
            accumulator: 0.0,
        }
    }

    /// Returns the fixed step length
    pub fn get_fixed_time_step(&self) -> f32 {
        self.fixed_time_step
    }

    /// Returns the time waiting to be simulated
    pub fn get_accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Drops any pending time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Adds a frame's worth of time and returns the sub-steps to run now
    pub fn advance(&mut self, frame_delta: f32) -> StepPlan {
        // NaN and negative deltas add nothing
        let frame_delta = if frame_delta.is_finite() { frame_delta.clamp(0.0, self.max_frame_delta) } else { 0.0 };
        self.accumulator += frame_delta;

        let mut full_steps = 0;
        while self.accumulator >= self.fixed_time_step && full_steps < self.max_substeps {
            self.accumulator -= self.fixed_time_step;
            full_steps += 1;
        }

        let mut partial_step = None;
        if full_steps == self.max_substeps && self.accumulator > 0.0 {
            partial_step = Some(self.accumulator);
            self.accumulator = 0.0;
        }

        StepPlan { full_steps, partial_step }
    }
}
