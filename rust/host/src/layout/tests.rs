use gainstage_component::audio::ChannelLayout;

use super::{BusLayout, LayoutError};

#[test]
fn matching_buses_are_supported() {
    assert_eq!(BusLayout::MONO.channel_layout(), Ok(ChannelLayout::Mono));
    assert_eq!(BusLayout::STEREO.channel_layout(), Ok(ChannelLayout::Stereo));
}

#[test]
fn default_is_stereo() {
    assert_eq!(BusLayout::default(), BusLayout::STEREO);
}

#[test]
fn mismatched_buses_are_rejected() {
    let layout = BusLayout {
        input: Some(ChannelLayout::Stereo),
        output: Some(ChannelLayout::Mono),
    };
    assert_eq!(
        layout.channel_layout(),
        Err(LayoutError::Unsupported {
            input: Some(ChannelLayout::Stereo),
            output: Some(ChannelLayout::Mono),
        })
    );
}

#[test]
fn disabled_buses_are_rejected() {
    for layout in [
        BusLayout {
            input: None,
            output: Some(ChannelLayout::Stereo),
        },
        BusLayout {
            input: Some(ChannelLayout::Mono),
            output: None,
        },
        BusLayout {
            input: None,
            output: None,
        },
    ] {
        assert!(matches!(
            layout.channel_layout(),
            Err(LayoutError::Unsupported { .. })
        ));
    }
}

#[test]
fn errors_describe_the_layout() {
    let err = BusLayout {
        input: None,
        output: Some(ChannelLayout::Mono),
    }
    .channel_layout()
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported bus layout (input: None, output: Some(Mono))"
    );
}
