pub mod device;
pub mod mic;

pub use device::{CaptureDevice, Chunk};
pub use mic::MicCaptureDevice;
