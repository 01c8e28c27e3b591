//! Scoped audio buffer for voice input. Chunks accumulate between start
//! and stop; anything pushed after the stop is discarded, while audio
//! buffered up to that point survives for transcription. Dropping a
//! session releases the buffer on every exit path.

use log::debug;

/// Captured audio ready for transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, PartialEq, Eq)]
enum RecordingState {
    Recording,
    Stopped,
}

/// One recording from start to stop.
#[derive(Debug)]
pub struct RecordingSession {
    mime_type: String,
    buffer: Vec<u8>,
    state: RecordingState,
}

impl RecordingSession {
    pub fn start(mime_type: &str) -> Self {
        debug!("Recording started ({mime_type})");
        RecordingSession {
            mime_type: mime_type.to_string(),
            buffer: Vec::new(),
            state: RecordingState::Recording,
        }
    }

    /// Append a chunk. Returns whether it was accepted; chunks arriving
    /// after the stop are dropped.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> bool {
        if self.state == RecordingState::Stopped || chunk.is_empty() {
            return false;
        }
        self.buffer.extend_from_slice(chunk);
        true
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    /// Finish the recording. Buffered audio becomes the clip; an empty
    /// buffer yields nothing to transcribe.
    pub fn stop(mut self) -> Option<AudioClip> {
        self.state = RecordingState::Stopped;
        debug!("Recording stopped with {} buffered bytes", self.buffer.len());

        if self.buffer.is_empty() {
            return None;
        }
        Some(AudioClip {
            data: std::mem::take(&mut self.buffer),
            mime_type: self.mime_type.clone(),
        })
    }
}
