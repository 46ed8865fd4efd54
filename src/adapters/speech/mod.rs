//! Speech Synthesizer Adapters
//!
//! - `OpenAISpeechSynthesizer` - OpenAI text-to-speech (MP3 output)

mod openai_speech;

pub use openai_speech::{OpenAISpeechConfig, OpenAISpeechSynthesizer};
