use std::io::{self, SeekFrom};

use super::{Downsampling, Precision};
use crate::audio::decode::{FrameSource, StereoFrame, FRAME_WIDTH};
use crate::error::Result;

/// Byte layout of a single chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkSpec {
    pub index: usize,
    pub byte_offset: u64,
    pub byte_length: u64,
    pub sub_window_frames: usize,
}

/// Pulls one downsampled sub-window per chunk out of a [`FrameSource`].
///
/// Chunks must be requested in increasing order: every policy except `none`
/// leaves the cursor at the end of the chunk it just sampled.
pub struct ChunkSampler<'a, S: FrameSource> {
    source: &'a mut S,
    chunk_size: u64,
    sub_window: usize,
    mode: Downsampling,
    buffer: Vec<StereoFrame>,
}

impl<'a, S: FrameSource> ChunkSampler<'a, S> {
    pub fn new(source: &'a mut S, chunks: usize, precision: Precision, mode: Downsampling) -> Self {
        // Truncating division: the tail of the stream beyond chunks * chunk_size is never read
        let chunk_size = source.length() / chunks.max(1) as u64;
        let sub_window = ((chunk_size / FRAME_WIDTH) / precision.ratio() as u64) as usize;
        Self {
            source,
            chunk_size,
            sub_window,
            mode,
            buffer: vec![[0.0; 2]; sub_window],
        }
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn sub_window(&self) -> usize {
        self.sub_window
    }

    pub fn chunk_spec(&self, index: usize) -> ChunkSpec {
        ChunkSpec {
            index,
            byte_offset: index as u64 * self.chunk_size,
            byte_length: self.chunk_size,
            sub_window_frames: self.sub_window,
        }
    }

    /// Reads the sub-window of chunk `index`. Near the end of the stream the
    /// returned slice may be shorter than [`Self::sub_window`].
    pub fn sample(&mut self, index: usize) -> Result<&[StereoFrame]> {
        let spec = self.chunk_spec(index);
        let n = match self.mode {
            Downsampling::None => read_frames(&mut *self.source, &mut self.buffer)?,
            Downsampling::Head => self.head(&spec)?,
            Downsampling::Center => self.center(&spec)?,
            Downsampling::Tail => self.tail(&spec)?,
        };
        if n < spec.sub_window_frames {
            log::trace!(
                "chunk {} at byte {}: short read, {} of {} frames",
                spec.index,
                spec.byte_offset,
                n,
                spec.sub_window_frames
            );
        }
        Ok(&self.buffer[..n])
    }

    fn window_bytes(&self) -> u64 {
        self.sub_window as u64 * FRAME_WIDTH
    }

    fn head(&mut self, spec: &ChunkSpec) -> Result<usize> {
        let n = read_frames(&mut *self.source, &mut self.buffer)?;
        let rest = spec.byte_length.saturating_sub(n as u64 * FRAME_WIDTH);
        seek(&mut *self.source, SeekFrom::Current(rest as i64))?;
        Ok(n)
    }

    fn tail(&mut self, spec: &ChunkSpec) -> Result<usize> {
        let skip = spec.byte_length.saturating_sub(self.window_bytes());
        if seek(&mut *self.source, SeekFrom::Current(skip as i64))?.is_none() {
            return Ok(0);
        }
        Ok(read_frames(&mut *self.source, &mut self.buffer)?)
    }

    fn center(&mut self, spec: &ChunkSpec) -> Result<usize> {
        let lead = (spec.byte_length / 2).saturating_sub(self.window_bytes() / 2);
        if seek(&mut *self.source, SeekFrom::Start(spec.byte_offset + lead))?.is_none() {
            return Ok(0);
        }
        let n = read_frames(&mut *self.source, &mut self.buffer)?;
        // Realign on the chunk boundary regardless of how much was consumed
        seek(&mut *self.source, SeekFrom::Start(spec.byte_offset + spec.byte_length))?;
        Ok(n)
    }
}

/// Fills `buf` as far as the source allows. End of stream is not an error.
fn read_frames<S: FrameSource + ?Sized>(source: &mut S, buf: &mut [StereoFrame]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Seeks, mapping end of stream to `None`.
fn seek<S: FrameSource + ?Sized>(source: &mut S, pos: SeekFrom) -> io::Result<Option<u64>> {
    match source.seek(pos) {
        Ok(offset) => Ok(Some(offset)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode::PcmSource;
    use crate::error::Error;

    /// Frame `i` carries `i` on the left channel so positions can be read back.
    fn indexed(n: usize) -> PcmSource {
        PcmSource::from_frames((0..n).map(|i| [i as f64, 0.0]).collect(), 44_100)
    }

    fn first_and_last(frames: &[StereoFrame]) -> (usize, usize) {
        (frames[0][0] as usize, frames[frames.len() - 1][0] as usize)
    }

    #[test]
    fn chunk_spec_layout() {
        let mut src = indexed(1000);
        let sampler = ChunkSampler::new(&mut src, 3, Precision::new(2).unwrap(), Downsampling::Head);
        // 4000 bytes / 3 = 1333 bytes, 333 frames, halved
        assert_eq!(sampler.chunk_size(), 1333);
        assert_eq!(
            sampler.chunk_spec(2),
            ChunkSpec {
                index: 2,
                byte_offset: 2666,
                byte_length: 1333,
                sub_window_frames: 166,
            }
        );
    }

    #[test]
    fn center_reads_the_middle_of_the_chunk() {
        // two chunks of 800 frames each
        let mut src = indexed(1600);
        let mut sampler =
            ChunkSampler::new(&mut src, 2, Precision::new(8).unwrap(), Downsampling::Center);
        assert_eq!(sampler.sub_window(), 100);

        let frames = sampler.sample(0).unwrap();
        assert_eq!(frames.len(), 100);
        assert_eq!(first_and_last(frames), (350, 449));

        let frames = sampler.sample(1).unwrap();
        assert_eq!(first_and_last(frames), (1150, 1249));
    }

    #[test]
    fn head_reads_the_start_and_skips_the_rest() {
        let mut src = indexed(400);
        let mut sampler = ChunkSampler::new(&mut src, 4, Precision::new(4).unwrap(), Downsampling::Head);
        assert_eq!(first_and_last(sampler.sample(0).unwrap()), (0, 24));
        assert_eq!(first_and_last(sampler.sample(1).unwrap()), (100, 124));
        assert_eq!(first_and_last(sampler.sample(2).unwrap()), (200, 224));
    }

    #[test]
    fn tail_reads_the_end_of_each_chunk() {
        let mut src = indexed(400);
        let mut sampler = ChunkSampler::new(&mut src, 4, Precision::new(4).unwrap(), Downsampling::Tail);
        assert_eq!(first_and_last(sampler.sample(0).unwrap()), (75, 99));
        assert_eq!(first_and_last(sampler.sample(1).unwrap()), (175, 199));
        assert_eq!(first_and_last(sampler.sample(2).unwrap()), (275, 299));
    }

    #[test]
    fn none_reads_densely_from_the_cursor() {
        let mut src = indexed(400);
        let mut sampler = ChunkSampler::new(&mut src, 4, Precision::new(4).unwrap(), Downsampling::None);
        assert_eq!(first_and_last(sampler.sample(0).unwrap()), (0, 24));
        assert_eq!(first_and_last(sampler.sample(1).unwrap()), (25, 49));
    }

    #[test]
    fn short_final_read_is_not_an_error() {
        let mut src = indexed(100);
        // Move the cursor so the dense reads run off the end
        src.seek(SeekFrom::Start(300)).unwrap();
        let mut sampler = ChunkSampler::new(&mut src, 2, Precision::FULL, Downsampling::None);
        assert_eq!(sampler.sample(0).unwrap().len(), 25);
        assert!(sampler.sample(1).unwrap().is_empty());
    }

    struct Failing;

    impl FrameSource for Failing {
        fn length(&self) -> u64 {
            64
        }

        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }

        fn read(&mut self, _frames: &mut [StereoFrame]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"))
        }
    }

    #[test]
    fn unexpected_eof_is_soft_but_other_errors_abort() {
        let mut src = Failing;
        let mut sampler = ChunkSampler::new(&mut src, 2, Precision::FULL, Downsampling::None);
        assert!(sampler.sample(0).unwrap().is_empty());

        let mut src = Failing;
        let mut sampler = ChunkSampler::new(&mut src, 2, Precision::FULL, Downsampling::Center);
        assert!(matches!(sampler.sample(0), Err(Error::Io(_))));
    }
}
