use footswitch_control::{Capture, Channel, Classifier};

use crate::system::capture::Sampler;

pub fn capture_until_channel_changes(sampler: &mut Sampler, classifier: &mut Classifier) -> Channel {
    loop {
        let (samples, ()) = sampler.capture(|| ());
        if let Some(channel) = classifier.detect(samples) {
            return channel;
        }
    }
}
