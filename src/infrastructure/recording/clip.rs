//! Finished recording clips
//!
//! A clip holds the mono PCM of one microphone session at the device rate.
//! Before it is offered as the audio input it is brought down to 16kHz and
//! packed as FLAC under the fixed recording file name.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use rubato::{FftFixedIn, Resampler};

use crate::application::ports::{RecordingError, RECORDING_FILE_NAME, RECORDING_MIME_TYPE};
use crate::domain::analysis::MediaFile;

/// Sample rate of uploaded recordings
pub const CLIP_SAMPLE_RATE: u32 = 16_000;

const CLIP_BITS_PER_SAMPLE: usize = 16;

/// Input frames per resampler pass
const RESAMPLE_CHUNK: usize = 1024;

/// Mono 16-bit samples captured during one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingClip {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl RecordingClip {
    /// Wrap captured samples. A session that produced no audio has no clip.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self, RecordingError> {
        if samples.is_empty() {
            return Err(RecordingError::Empty);
        }
        if sample_rate == 0 {
            return Err(RecordingError::Encoding("unknown device sample rate".into()));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / u64::from(self.sample_rate)
    }

    /// The same clip at the upload rate
    pub fn resampled(self) -> Result<Self, RecordingError> {
        if self.sample_rate == CLIP_SAMPLE_RATE {
            return Ok(self);
        }

        let target_len = (self.samples.len() as u64 * u64::from(CLIP_SAMPLE_RATE))
            .div_ceil(u64::from(self.sample_rate)) as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            self.sample_rate as usize,
            CLIP_SAMPLE_RATE as usize,
            RESAMPLE_CHUNK,
            2,
            1,
        )
        .map_err(|e| RecordingError::Encoding(format!("resampler setup failed: {}", e)))?;

        let block = resampler.input_frames_next();
        let mut output = Vec::with_capacity(target_len + block);

        for frames in self.samples.chunks(block) {
            let mut input: Vec<f32> = frames.iter().map(|&s| f32::from(s) / 32768.0).collect();
            // zero-pad the final block; the padding is cut off below
            input.resize(block, 0.0);

            let out = resampler
                .process(&[input], None)
                .map_err(|e| RecordingError::Encoding(format!("resampling failed: {}", e)))?;
            output.extend(out[0].iter().map(|&s| (s * 32767.0) as i16));
        }

        output.truncate(target_len);
        Self::new(output, CLIP_SAMPLE_RATE)
    }

    fn flac_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        let flac_error = |stage: &str, detail: String| {
            RecordingError::Encoding(format!("FLAC {} failed: {}", stage, detail))
        };

        let wide: Vec<i32> = self.samples.iter().map(|&s| i32::from(s)).collect();

        let encoder = config::Encoder::default()
            .into_verified()
            .map_err(|(_, e)| flac_error("config", format!("{:?}", e)))?;

        let source = MemSource::from_samples(
            &wide,
            1,
            CLIP_BITS_PER_SAMPLE,
            self.sample_rate as usize,
        );
        let stream = flacenc::encode_with_fixed_block_size(&encoder, source, encoder.block_size)
            .map_err(|e| flac_error("encoding", format!("{:?}", e)))?;

        let mut sink = ByteSink::new();
        stream
            .write(&mut sink)
            .map_err(|e| flac_error("write", e.to_string()))?;

        Ok(sink.into_inner())
    }

    /// Resample and pack the clip as the recording file
    pub fn into_media_file(self) -> Result<MediaFile, RecordingError> {
        let clip = self.resampled()?;
        let flac = clip.flac_bytes()?;
        Ok(MediaFile::new(RECORDING_FILE_NAME, RECORDING_MIME_TYPE, flac))
    }
}
