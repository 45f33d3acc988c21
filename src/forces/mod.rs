mod gravity;
mod planet;

pub use self::gravity::UniformGravity;
pub use self::planet::{PlanetConfig, PlanetField, SurfaceState};
