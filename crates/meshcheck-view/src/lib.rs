pub mod config;
pub mod report;
pub mod session;
pub mod viewer;

pub use config::{CameraSettings, DisplayOptions, LabelSettings, ViewerConfig};
pub use report::{FaceReport, MeshReport};
pub use session::ViewerSession;
