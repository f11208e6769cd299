pub mod coordinates;
pub mod error;
pub mod input;
pub mod resources;
pub mod rotation;
pub mod scene;
pub mod state;
pub mod systems;

// Re-exports für einfache Verwendung
pub use coordinates::GeoCoordinate;
pub use error::{GlobeError, GlobeResult};
pub use resources::{GlobeSettings, GlobeTexture, GlowPulse, TargetLocation};
pub use rotation::{AngularVelocity, Orientation, RotationState, SpinPolicy};
pub use state::GlobePhase;
