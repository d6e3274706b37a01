//! Capture device abstraction.

use crate::error::CaptureError;

/// An opaque fragment of encoded audio, delivered in capture order.
pub type Chunk = Vec<u8>;

/// Trait for audio capture devices (microphone, scripted test devices).
///
/// Chunks are buffered inside the device between `drain` calls and flushed
/// by `finalize`. The trait is synchronous and deliberately not `Send`:
/// cpal streams cannot move across threads, so the device lives on the
/// task that drives the session machine.
pub trait CaptureDevice {
    /// Acquire the capture hardware and start delivering chunks.
    fn acquire(&mut self) -> Result<(), CaptureError>;

    /// Chunks captured since the last call, in capture order.
    fn drain(&mut self) -> Vec<Chunk>;

    /// Stop capturing, flush any buffered final chunk, and release the
    /// hardware. Returns the remaining chunks in capture order.
    fn finalize(&mut self) -> Result<Vec<Chunk>, CaptureError>;

    /// Whether the device is currently capturing.
    fn is_active(&self) -> bool;

    /// File extension for payloads assembled from this device's chunks.
    fn extension(&self) -> &'static str;

    /// MIME type for payloads assembled from this device's chunks.
    fn media_type(&self) -> &'static str;
}
