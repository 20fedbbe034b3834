pub mod keypoint;
pub mod landmarks;
pub mod provider;

pub use keypoint::{Detection, Keypoint, KeypointIndex};
pub use landmarks::LandmarkMap;
pub use provider::{estimate_or_empty, JsonKeypointProvider, KeypointProvider};
