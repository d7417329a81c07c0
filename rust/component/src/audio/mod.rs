//! Types and utilities for audio buffers.
//!
//! Effects process audio in buffers: groups of samples arranged into
//! channels, where each channel is a contiguous `&[f32]`.

mod compare;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use compare::*;

/// Defines the layout of the channels in a buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    /// A single channel buffer.
    Mono,

    /// A two channel buffer.
    ///
    /// Channel 0 is the left channel, and channel 1 is the right channel.
    Stereo,
}

impl ChannelLayout {
    /// The number of channels in the layout.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gainstage_component::audio::ChannelLayout;
    /// assert_eq!(ChannelLayout::Mono.num_channels(), 1);
    /// assert_eq!(ChannelLayout::Stereo.num_channels(), 2);
    /// ```
    #[must_use]
    pub fn num_channels(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

/// A (potentially multi-channel) buffer of audio samples.
///
/// Each channel must be a contiguous slice, and all channels hold
/// [`Buffer::num_frames`] samples.
pub trait Buffer {
    /// The layout of the channels in the buffer.
    fn channel_layout(&self) -> ChannelLayout;

    /// The number of channels in the buffer.
    fn num_channels(&self) -> usize {
        self.channel_layout().num_channels()
    }

    /// The number of frames in the buffer.
    fn num_frames(&self) -> usize;

    /// Get all samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is greater than or equal to [`Self::num_channels()`].
    fn channel(&self, channel: usize) -> &[f32];
}

/// A [`Buffer`] whose samples can be written.
pub trait BufferMut: Buffer {
    /// Get all samples of one channel, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is greater than or equal to [`Buffer::num_channels()`].
    fn channel_mut(&mut self, channel: usize) -> &mut [f32];
}

/// Iterates over the channels of a buffer.
///
/// # Examples
///
/// ```
/// # use gainstage_component::audio::{BufferData, channels};
/// let buffer = BufferData::new_stereo([1.0, 2.0], [3.0, 4.0]);
/// assert!(channels(&buffer).eq([[1.0, 2.0], [3.0, 4.0]]));
/// ```
pub fn channels<B: Buffer>(buffer: &B) -> impl Iterator<Item = &[f32]> {
    (0..buffer.num_channels()).map(move |channel| buffer.channel(channel))
}

/// Iterates mutably over the channels of a buffer.
///
/// # Examples
///
/// ```
/// # use gainstage_component::audio::{BufferData, Buffer, channels_mut};
/// let mut buffer = BufferData::new_stereo([1.0, 2.0], [3.0, 4.0]);
/// for channel in channels_mut(&mut buffer) {
///     channel[0] = 0.0;
/// }
/// assert_eq!(buffer.channel(1), &[0.0, 4.0]);
/// ```
pub fn channels_mut<B: BufferMut>(buffer: &mut B) -> impl Iterator<Item = &mut [f32]> {
    let num_frames = buffer.num_frames();
    (0..buffer.num_channels()).map(move |channel| {
        let slice = buffer.channel_mut(channel);
        debug_assert!(slice.len() >= num_frames);
        // SAFETY: every index is visited once and channels never overlap,
        // so the yielded slices are disjoint.
        unsafe { std::slice::from_raw_parts_mut(slice.as_mut_ptr(), num_frames) }
    })
}

/// Fills every channel of `buffer` with silence.
///
/// # Examples
///
/// ```
/// # use gainstage_component::audio::{BufferData, Buffer, clear};
/// let mut buffer = BufferData::new_mono(vec![1.0, -1.0]);
/// clear(&mut buffer);
/// assert_eq!(buffer.channel(0), &[0.0, 0.0]);
/// ```
pub fn clear<B: BufferMut>(buffer: &mut B) {
    for channel in channels_mut(buffer) {
        channel.fill(0.0);
    }
}

/// An owned buffer, storing its channels one after another.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferData {
    channel_layout: ChannelLayout,
    num_frames: usize,
    data: Vec<f32>,
}

impl BufferData {
    /// A silent buffer.
    #[must_use]
    pub fn new(channel_layout: ChannelLayout, num_frames: usize) -> Self {
        Self {
            channel_layout,
            num_frames,
            data: vec![0f32; channel_layout.num_channels() * num_frames],
        }
    }

    /// A mono buffer holding `data`.
    #[must_use]
    pub fn new_mono(data: Vec<f32>) -> BufferData {
        Self {
            channel_layout: ChannelLayout::Mono,
            num_frames: data.len(),
            data,
        }
    }

    /// A stereo buffer from separate left and right channels.
    ///
    /// # Panics
    ///
    /// Panics if `left` and `right` have different lengths.
    #[must_use]
    pub fn new_stereo<L: IntoIterator<Item = f32>, R: IntoIterator<Item = f32>>(
        left: L,
        right: R,
    ) -> BufferData {
        let mut data: Vec<_> = left.into_iter().collect();
        let num_frames = data.len();
        data.extend(right);
        assert_eq!(num_frames * 2, data.len());
        Self {
            channel_layout: ChannelLayout::Stereo,
            num_frames,
            data,
        }
    }
}

impl Buffer for BufferData {
    fn channel_layout(&self) -> ChannelLayout {
        self.channel_layout
    }

    fn num_frames(&self) -> usize {
        self.num_frames
    }

    fn channel(&self, channel: usize) -> &[f32] {
        &self.data[channel * self.num_frames..(channel + 1) * self.num_frames]
    }
}

impl BufferMut for BufferData {
    fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        &mut self.data[channel * self.num_frames..(channel + 1) * self.num_frames]
    }
}
