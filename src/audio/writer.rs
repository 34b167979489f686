//! Writes synthesized audio into the output directory.

use crate::error::{BlogcastError, Result};
use crate::tts::{AudioArtifact, AudioFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// File name offered when a podcast is downloaded.
pub const DOWNLOAD_NAME: &str = "generated_podcast.wav";

/// A podcast written to disk.
#[derive(Debug, Clone)]
pub struct SavedAudio {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub mime_type: &'static str,
}

impl SavedAudio {
    /// The file name within the output directory.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A fresh `podcast_<uuid>.wav` name.
pub fn podcast_filename() -> String {
    format!("podcast_{}.wav", Uuid::new_v4())
}

/// Persist the first audio payload, or fail with [`BlogcastError::NoAudio`].
///
/// Nothing is written when `audio` is empty.
#[instrument(skip(audio), fields(payloads = audio.len()))]
pub fn save_first_audio(audio: &[AudioArtifact], output_dir: &Path) -> Result<SavedAudio> {
    let first = audio.first().ok_or(BlogcastError::NoAudio)?;
    if audio.len() > 1 {
        warn!("Agent produced {} audio payloads, keeping the first", audio.len());
    }
    write_artifact(first, output_dir)
}

/// Decode an artifact and write it under a new unique name.
fn write_artifact(artifact: &AudioArtifact, output_dir: &Path) -> Result<SavedAudio> {
    let raw = artifact.decode()?;
    if raw.is_empty() {
        return Err(BlogcastError::NoAudio);
    }

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(podcast_filename());

    let contents = match artifact.format {
        AudioFormat::Pcm { sample_rate } => pcm_to_wav(&raw, sample_rate)?,
        AudioFormat::Encoded { .. } => raw,
    };

    std::fs::write(&path, &contents)?;
    info!("Wrote {} bytes to {}", contents.len(), path.display());

    Ok(SavedAudio {
        path,
        bytes_written: contents.len() as u64,
        mime_type: artifact.format.mime_type(),
    })
}

/// Wrap 16-bit little-endian mono PCM in a WAV container.
fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(pcm.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm_artifact(samples: &[i16]) -> AudioArtifact {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        AudioArtifact::from_bytes(&bytes, AudioFormat::Pcm { sample_rate: 22050 }, 10)
    }

    #[test]
    fn test_no_audio_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audio_generations");

        let err = save_first_audio(&[], &out).unwrap_err();
        assert!(matches!(err, BlogcastError::NoAudio));
        assert_eq!(err.to_string(), "No audio was generated. Please try again.");
        assert!(!out.exists());
    }

    #[test]
    fn test_pcm_is_written_as_wav() {
        let dir = tempfile::tempdir().unwrap();
        let samples = [0i16, 1000, -1000, i16::MAX, i16::MIN];

        let saved = save_first_audio(&[pcm_artifact(&samples)], dir.path()).unwrap();
        let name = saved.file_name();
        assert!(name.starts_with("podcast_"));
        assert!(name.ends_with(".wav"));
        assert_eq!(saved.mime_type, "audio/wav");

        let mut reader = hound::WavReader::open(&saved.path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 1);
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_encoded_audio_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::from_bytes(
            b"ID3fake-mp3",
            AudioFormat::Encoded {
                codec: "mp3".to_string(),
            },
            3,
        );

        let saved = save_first_audio(&[artifact], dir.path()).unwrap();
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"ID3fake-mp3");
        assert_eq!(saved.bytes_written, 11);
    }

    #[test]
    fn test_only_first_payload_is_written() {
        let dir = tempfile::tempdir().unwrap();
        save_first_audio(&[pcm_artifact(&[1, 2]), pcm_artifact(&[3, 4])], dir.path()).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_filenames_are_unique() {
        assert_ne!(podcast_filename(), podcast_filename());
    }
}
