/// Core types for AudioBoost
mod frame;
mod stream;

pub use frame::AudioFrame;
pub use stream::{StreamInfo, TimeBase};
