//! Microphone capture using cpal
//!
//! Samples are captured at whatever rate the device offers, mixed to mono
//! and buffered as chunks. On stop they are resampled to 16kHz and encoded
//! to FLAC as a single audio file.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::sync::oneshot;
use tokio::time::Duration as TokioDuration;
use tracing::{debug, warn};

use super::clip::{RecordingClip, CLIP_SAMPLE_RATE};
use crate::application::ports::{AudioCapture, RecordingError};
use crate::domain::analysis::MediaFile;
use crate::domain::recording::RecordingSession;

/// How often the capture thread checks whether it should stop
const POLL_INTERVAL: TokioDuration = TokioDuration::from_millis(50);

/// Microphone recorder backed by the default cpal input device
///
/// cpal::Stream is not Send, so the stream lives on a dedicated thread for
/// the whole session; only the chunk buffer and flags are shared.
pub struct CpalRecorder {
    /// Captured chunks for the active session (mono, i16, device rate)
    session: Arc<StdMutex<RecordingSession>>,
    /// Device sample rate of the active session
    device_sample_rate: Arc<AtomicU32>,
    is_recording: Arc<AtomicBool>,
    worker: StdMutex<Option<JoinHandle<()>>>,
}

impl CpalRecorder {
    pub fn new() -> Self {
        Self {
            session: Arc::new(StdMutex::new(RecordingSession::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            worker: StdMutex::new(None),
        }
    }

    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an input configuration, preferring mono and 16kHz
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device.supported_input_configs().map_err(|e| {
            RecordingError::DeviceAccess(format!("Failed to query input configs: {}", e))
        })?;

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= CLIP_SAMPLE_RATE
                && config.max_sample_rate().0 >= CLIP_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > CLIP_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or_else(|| {
            RecordingError::DeviceAccess("No supported input format".into())
        })?;

        let sample_rate = if config_range.min_sample_rate().0 <= CLIP_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= CLIP_SAMPLE_RATE
        {
            SampleRate(CLIP_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    }

    /// Build the input stream feeding `session`
    fn build_stream(
        device: &cpal::Device,
        config: &StreamConfig,
        sample_format: SampleFormat,
        session: Arc<StdMutex<RecordingSession>>,
        is_recording: Arc<AtomicBool>,
    ) -> Result<cpal::Stream, RecordingError> {
        let channels = config.channels;
        let on_error = |err: cpal::StreamError| warn!(error = %err, "audio stream error");

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        let mono = Self::mix_to_mono(data, channels);
                        if let Ok(mut session) = session.lock() {
                            session.push_chunk(mono);
                        }
                    }
                },
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        let i16_data: Vec<i16> =
                            data.iter().map(|&s| (s * 32767.0) as i16).collect();
                        let mono = Self::mix_to_mono(&i16_data, channels);
                        if let Ok(mut session) = session.lock() {
                            session.push_chunk(mono);
                        }
                    }
                },
                on_error,
                None,
            ),
            other => {
                return Err(RecordingError::DeviceAccess(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream.map_err(|e| RecordingError::DeviceAccess(e.to_string()))
    }

    /// Capture thread body: open the device, report readiness, then keep the
    /// stream alive until the recording flag drops.
    fn run_capture(
        session: Arc<StdMutex<RecordingSession>>,
        device_sample_rate: Arc<AtomicU32>,
        is_recording: Arc<AtomicBool>,
        ready: oneshot::Sender<Result<(), RecordingError>>,
    ) {
        let opened = Self::get_input_device().and_then(|device| {
            let (config, sample_format) = Self::get_input_config(&device)?;
            device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);
            let stream = Self::build_stream(
                &device,
                &config,
                sample_format,
                Arc::clone(&session),
                Arc::clone(&is_recording),
            )?;
            stream
                .play()
                .map_err(|e| RecordingError::DeviceAccess(e.to_string()))?;
            debug!(
                sample_rate = config.sample_rate.0,
                channels = config.channels,
                "microphone stream started"
            );
            Ok(stream)
        });

        let stream = match opened {
            Ok(stream) => {
                let _ = ready.send(Ok(()));
                stream
            }
            Err(e) => {
                is_recording.store(false, Ordering::SeqCst);
                let _ = ready.send(Err(e));
                return;
            }
        };

        while is_recording.load(Ordering::SeqCst) {
            std::thread::sleep(POLL_INTERVAL);
        }

        drop(stream);
        debug!("microphone stream released");
    }

    fn take_worker(&self) -> Option<JoinHandle<()>> {
        self.worker.lock().ok().and_then(|mut w| w.take())
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCapture for CpalRecorder {
    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Ok(mut session) = self.session.lock() {
            *session = RecordingSession::new();
        }

        let (ready_tx, ready_rx) = oneshot::channel();
        let session = Arc::clone(&self.session);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_recording = Arc::clone(&self.is_recording);

        let handle = std::thread::spawn(move || {
            Self::run_capture(session, device_sample_rate, is_recording, ready_tx)
        });

        let started = ready_rx.await.unwrap_or_else(|_| {
            Err(RecordingError::DeviceAccess(
                "capture thread exited before the stream opened".into(),
            ))
        });

        match started {
            Ok(()) => {
                if let Ok(mut worker) = self.worker.lock() {
                    *worker = Some(handle);
                }
                Ok(())
            }
            Err(e) => {
                self.is_recording.store(false, Ordering::SeqCst);
                let _ = handle.join();
                Err(e)
            }
        }
    }

    async fn stop(&self) -> Result<MediaFile, RecordingError> {
        if !self.is_recording.swap(false, Ordering::SeqCst) {
            return Err(RecordingError::NotRecording);
        }

        if let Some(handle) = self.take_worker() {
            tokio::task::spawn_blocking(move || {
                let _ = handle.join();
            })
            .await
            .map_err(|e| RecordingError::Encoding(format!("Capture thread join failed: {}", e)))?;
        }

        let session = self
            .session
            .lock()
            .map(|mut s| std::mem::take(&mut *s))
            .map_err(|_| RecordingError::Encoding("recording buffer poisoned".into()))?;

        debug!(
            chunks = session.chunk_count(),
            samples = session.sample_count(),
            "recording stopped"
        );

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        let clip = RecordingClip::new(session.into_samples(), sample_rate)?;
        debug!(duration_ms = clip.duration_ms(), sample_rate, "encoding recording");

        tokio::task::spawn_blocking(move || clip.into_media_file())
            .await
            .map_err(|e| RecordingError::Encoding(format!("Encode task error: {}", e)))?
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        assert_eq!(CpalRecorder::mix_to_mono(&mono, 1), mono);
    }

    #[test]
    fn mix_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        assert_eq!(CpalRecorder::mix_to_mono(&stereo, 2), vec![150, 350]);
    }

    #[tokio::test]
    async fn stop_without_start_fails() {
        let recorder = CpalRecorder::new();
        assert!(!recorder.is_recording());
        assert!(matches!(
            recorder.stop().await,
            Err(RecordingError::NotRecording)
        ));
    }
}
