pub mod overlay;
pub mod skeleton;

pub use overlay::OverlayRenderer;
pub use skeleton::SKELETON_CONNECTIONS;
