//! Microphone capture via cpal.
//!
//! Samples accumulate in a shared buffer while the stream runs. The device
//! buffers everything until finalization, then encodes a single WAV chunk
//! in memory — the flush-on-stop behavior the session machine expects.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hound::{WavSpec, WavWriter};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use super::device::{CaptureDevice, Chunk};
use crate::error::CaptureError;

pub struct MicCaptureDevice {
    sample_rate: u32,
    samples: Arc<Mutex<Vec<f32>>>,
    stream: Option<cpal::Stream>,
    active: bool,
}

impl MicCaptureDevice {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples: Arc::new(Mutex::new(Vec::new())),
            stream: None,
            active: false,
        }
    }

    fn encode_wav(&self, samples: &[f32]) -> Result<Chunk, CaptureError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .map_err(|e| CaptureError::Stream(e.to_string()))?;
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| CaptureError::Stream(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| CaptureError::Stream(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}

impl CaptureDevice for MicCaptureDevice {
    fn acquire(&mut self) -> Result<(), CaptureError> {
        if self.active {
            return Err(CaptureError::Stream(
                "microphone already capturing".to_string(),
            ));
        }

        let host = cpal::default_host();
        let device = host.default_input_device().ok_or_else(|| {
            CaptureError::Unavailable("no default input device".to_string())
        })?;

        info!(
            "Capturing from device: {}",
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        let config = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        {
            let mut samples = self.samples.lock().unwrap();
            samples.clear();
            samples.shrink_to_fit();
        }

        let samples_clone = self.samples.clone();
        let err_fn = |err| error!("Microphone stream error: {}", err);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut samples) = samples_clone.lock() {
                        samples.extend_from_slice(data);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| CaptureError::PermissionDenied(e.to_string()))?;

        stream
            .play()
            .map_err(|e| CaptureError::Stream(e.to_string()))?;

        self.stream = Some(stream);
        self.active = true;

        info!("Microphone capture started");
        Ok(())
    }

    fn drain(&mut self) -> Vec<Chunk> {
        // Samples stay buffered until finalization encodes them.
        Vec::new()
    }

    fn finalize(&mut self) -> Result<Vec<Chunk>, CaptureError> {
        if !self.active {
            return Err(CaptureError::Stream(
                "microphone not capturing".to_string(),
            ));
        }

        if let Some(stream) = self.stream.take() {
            debug!("Releasing microphone stream");
            drop(stream);
        }
        self.active = false;

        let samples = {
            let mut guard = self.samples.lock().unwrap();
            let s = std::mem::take(&mut *guard);
            guard.shrink_to_fit();
            s
        };

        info!("Microphone stopped, {} samples captured", samples.len());

        if samples.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![self.encode_wav(&samples)?])
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn extension(&self) -> &'static str {
        "wav"
    }

    fn media_type(&self) -> &'static str {
        "audio/wav"
    }
}

impl Drop for MicCaptureDevice {
    fn drop(&mut self) {
        if self.active {
            debug!("Dropping active MicCaptureDevice, cleaning up");
            let _ = self.finalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wav_produces_riff_header() {
        let device = MicCaptureDevice::new(16000);
        let chunk = device.encode_wav(&[0.0, 0.25, -0.25, 1.0]).unwrap();
        assert_eq!(&chunk[0..4], b"RIFF");
        assert_eq!(&chunk[8..12], b"WAVE");
    }

    #[test]
    fn test_inactive_device_rejects_finalize() {
        let mut device = MicCaptureDevice::new(16000);
        assert!(!device.is_active());
        assert!(device.finalize().is_err());
    }

    #[test]
    fn test_payload_naming_metadata() {
        let device = MicCaptureDevice::new(16000);
        assert_eq!(device.extension(), "wav");
        assert_eq!(device.media_type(), "audio/wav");
    }
}
