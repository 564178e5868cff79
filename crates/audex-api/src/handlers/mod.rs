pub mod extract_audio;
pub mod health;

pub use extract_audio::{extract_audio, ExtractAudioRequest, ExtractAudioResponse};
pub use health::health_check;
