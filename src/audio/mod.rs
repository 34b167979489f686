//! Podcast audio output: writing generated audio to disk and playing it back.

mod player;
mod writer;

pub use player::play;
pub use writer::{podcast_filename, save_first_audio, SavedAudio, DOWNLOAD_NAME};
