/// Sound engine: procedural chiptune cues via rodio.
///
/// Three cues, generated as in-memory WAV buffers at init time:
/// eat (short rising blip, pitch follows the reward), game over
/// (falling tones) and new high score (fanfare).
///
/// Built without the "sound" feature, the stub SoundEngine does nothing.

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::wave::{self, SAMPLE_RATE};

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_game_over: Arc<Vec<u8>>,
        sfx_high_score: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_game_over: Arc::new(wave::make_wav(&wave::gen_game_over(), SAMPLE_RATE)),
                sfx_high_score: Arc::new(wave::make_wav(&wave::gen_fanfare(), SAMPLE_RATE)),
            })
        }

        fn play_bytes(&self, bytes: Vec<u8>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                if let Ok(src) = rodio::Decoder::new(Cursor::new(bytes)) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        /// Bigger rewards ring higher.
        pub fn play_eat(&self, reward: u32) {
            let freq = wave::eat_pitch(reward);
            self.play_bytes(wave::make_wav(&wave::gen_blip(freq, 0.06, 0.25), SAMPLE_RATE));
        }

        pub fn play_game_over(&self) { self.play_bytes(self.sfx_game_over.as_ref().clone()); }
        pub fn play_high_score(&self) { self.play_bytes(self.sfx_high_score.as_ref().clone()); }
    }
}

// ════════════════════════════════════════════════════════════
//  Waveform generators — all produce Vec<f32> mono samples
// ════════════════════════════════════════════════════════════

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
mod wave {
    use std::f32::consts::PI;

    pub const SAMPLE_RATE: u32 = 22050;

    pub fn eat_pitch(reward: u32) -> f32 {
        600.0 + reward.min(40) as f32 * 30.0
    }

    /// Two-partial blip with linear fade out
    pub fn gen_blip(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                let wave = (t * freq * 2.0 * PI).sin() * 0.7
                    + (t * freq * 2.0 * 2.0 * PI).sin() * 0.3;
                wave * env * volume
            })
            .collect()
    }

    fn notes(seq: &[(f32, f32)], volume: f32) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(freq, dur) in seq {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.3;
                samples.push((t * freq * 2.0 * PI).sin() * env * volume);
            }
        }
        samples
    }

    /// A4→F#4→Eb4→C4 with a tail fade
    pub fn gen_game_over() -> Vec<f32> {
        let mut samples = notes(&[(440.0, 0.12), (370.0, 0.12), (311.0, 0.12), (261.0, 0.2)], 0.3);
        let total = samples.len();
        let fade_len = total / 4;
        for (i, s) in samples.iter_mut().enumerate().skip(total - fade_len) {
            *s *= (total - i) as f32 / fade_len as f32;
        }
        samples
    }

    /// C5→E5→G5→C6, last note held
    pub fn gen_fanfare() -> Vec<f32> {
        notes(&[(523.0, 0.1), (659.0, 0.1), (784.0, 0.1), (1047.0, 0.35)], 0.3)
    }

    // ── WAV encoder: 16-bit mono PCM ──

    pub fn make_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
        let data_size = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes());  // PCM
        buf.extend_from_slice(&1u16.to_le_bytes());  // mono
        buf.extend_from_slice(&sample_rate.to_le_bytes());
        buf.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes());  // block align
        buf.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }
        buf
    }

}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_eat(&self, _reward: u32) {}
    pub fn play_game_over(&self) {}
    pub fn play_high_score(&self) {}
}
