//! Negotiation of input and output buses.

use gainstage_component::audio::ChannelLayout;

#[cfg(test)]
mod tests;

/// The channel layouts of the main input and output buses.
///
/// `None` means the bus is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    /// The main input bus.
    pub input: Option<ChannelLayout>,

    /// The main output bus.
    pub output: Option<ChannelLayout>,
}

impl BusLayout {
    /// Mono in, mono out.
    pub const MONO: Self = Self {
        input: Some(ChannelLayout::Mono),
        output: Some(ChannelLayout::Mono),
    };

    /// Stereo in, stereo out.
    pub const STEREO: Self = Self {
        input: Some(ChannelLayout::Stereo),
        output: Some(ChannelLayout::Stereo),
    };

    /// The channel layout effects see under this bus layout.
    ///
    /// Effects process in place, so both buses must be enabled and match.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Unsupported`] if either bus is disabled or the
    /// input and output differ.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gainstage_component::audio::ChannelLayout;
    /// # use gainstage_host::BusLayout;
    /// assert_eq!(BusLayout::STEREO.channel_layout(), Ok(ChannelLayout::Stereo));
    /// assert!(BusLayout { input: Some(ChannelLayout::Mono), output: Some(ChannelLayout::Stereo) }
    ///     .channel_layout()
    ///     .is_err());
    /// ```
    pub fn channel_layout(self) -> Result<ChannelLayout, LayoutError> {
        match self {
            BusLayout {
                input: Some(input),
                output: Some(output),
            } if input == output => Ok(output),
            BusLayout { input, output } => Err(LayoutError::Unsupported { input, output }),
        }
    }
}

impl Default for BusLayout {
    fn default() -> Self {
        Self::STEREO
    }
}

/// Errors from bus layout negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Only matching mono or stereo buses are supported.
    #[error("unsupported bus layout (input: {input:?}, output: {output:?})")]
    Unsupported {
        /// The requested input layout.
        input: Option<ChannelLayout>,

        /// The requested output layout.
        output: Option<ChannelLayout>,
    },

    /// The layout can't change while the processor is active.
    #[error("bus layout can't change while active")]
    Active,
}
