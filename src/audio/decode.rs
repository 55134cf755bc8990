use std::io::{self, SeekFrom};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Error, Result};

/// Number of channels every source is presented as.
pub const CHANNELS: u64 = 2;
/// Bytes per sample of the 16-bit PCM layout offsets are expressed in.
pub const BYTES_PER_SAMPLE: u64 = 2;
/// Byte width of a single stereo frame. Seek offsets should be multiples of this.
pub const FRAME_WIDTH: u64 = CHANNELS * BYTES_PER_SAMPLE;

/// One (left, right) sample pair, roughly in [-1, 1].
pub type StereoFrame = [f64; 2];

/// Byte-addressed access to decoded stereo audio.
///
/// A short read (fewer frames than requested, including zero) marks the end of
/// the stream. Implementations may also report it as `UnexpectedEof`.
pub trait FrameSource {
    /// Total decodable length in bytes.
    fn length(&self) -> u64;

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;

    /// Fills `frames` from the current position and returns how many were read.
    fn read(&mut self, frames: &mut [StereoFrame]) -> io::Result<usize>;
}

/// Fully decoded PCM held in memory with a byte cursor over it.
#[derive(Clone, Debug, Default)]
pub struct PcmSource {
    frames: Vec<StereoFrame>,
    cursor: u64,
    sample_rate: u32,
}

impl PcmSource {
    pub fn from_frames(frames: Vec<StereoFrame>, sample_rate: u32) -> Self {
        Self {
            frames,
            cursor: 0,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.sample_rate as f64
    }
}

impl FrameSource for PcmSource {
    fn length(&self) -> u64 {
        self.frames.len() as u64 * FRAME_WIDTH
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => self.cursor as i128 + delta as i128,
            SeekFrom::End(delta) => self.length() as i128 + delta as i128,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek to negative offset {}", target),
            ));
        }
        // Seeking past the end parks the cursor there; the next read is empty.
        self.cursor = (target as u64).min(self.length());
        Ok(self.cursor)
    }

    fn read(&mut self, frames: &mut [StereoFrame]) -> io::Result<usize> {
        let start = (self.cursor / FRAME_WIDTH) as usize;
        let available = self.frames.len().saturating_sub(start);
        let n = frames.len().min(available);
        frames[..n].copy_from_slice(&self.frames[start..start + n]);
        self.cursor = (start + n) as u64 * FRAME_WIDTH;
        Ok(n)
    }
}

pub fn decode_audio(path: &Path) -> Result<PcmSource> {
    let file = std::fs::File::open(path)?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Decode("no audio tracks found".into()))?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::Decode("unknown sample rate".into()))?;

    if channels > CHANNELS as usize {
        log::warn!(
            "{} has {} channels, only the first two are used",
            path.display(),
            channels
        );
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())?;

    let mut frames: Vec<StereoFrame> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                log::debug!("skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        // Mono is duplicated onto both channels
        for frame_samples in sample_buf.samples().chunks(spec.channels.count().max(1)) {
            let left = frame_samples[0] as f64;
            let right = frame_samples.get(1).copied().map_or(left, |r| r as f64);
            frames.push([left, right]);
        }
    }

    let source = PcmSource::from_frames(frames, sample_rate);

    log::debug!(
        "Decoded {}: {} frames, {}Hz, {:.1}s",
        path.display(),
        source.frame_count(),
        sample_rate,
        source.duration()
    );

    Ok(source)
}
