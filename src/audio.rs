use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};

const SAMPLE_RATE: u32 = 44_100;

/// Render a sine tone as an in-memory WAV (PCM16 mono). Tones are built
/// once at startup; nothing is read from disk.
pub fn tone_wav(freq_hz: f32, duration_ms: f32, volume: f32) -> Vec<u8> {
    let num_samples = (duration_ms / 1000.0 * SAMPLE_RATE as f32) as u32;
    let mut data: Vec<u8> = Vec::with_capacity(num_samples as usize * 2 + 44);

    let block_align: u16 = 2; // mono 16-bit
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    for n in 0..num_samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample =
            (amplitude * (std::f32::consts::TAU * freq_hz * t).sin() * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

/// The two cues the game plays: a short high beep on food pickup and a
/// longer low one on game over.
pub struct SoundBank {
    pickup: Sound,
    game_over: Sound,
    volume: f32,
}

impl SoundBank {
    pub async fn load(volume: f32) -> Option<Self> {
        let pickup = load_sound_from_bytes(&tone_wav(440.0, 100.0, 0.8)).await;
        let game_over = load_sound_from_bytes(&tone_wav(220.0, 200.0, 0.8)).await;
        match (pickup, game_over) {
            (Ok(pickup), Ok(game_over)) => Some(Self {
                pickup,
                game_over,
                volume: volume.clamp(0.0, 1.0),
            }),
            _ => {
                macroquad::prelude::warn!("audio unavailable, continuing without sound");
                None
            }
        }
    }

    pub fn play_pickup(&self) {
        self.play(&self.pickup);
    }

    pub fn play_game_over(&self) {
        self.play(&self.game_over);
    }

    // Fire-and-forget; overlapping tones are fine.
    fn play(&self, sound: &Sound) {
        audio::play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: self.volume,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_has_a_well_formed_wav_header() {
        let wav = tone_wav(440.0, 100.0, 0.8);
        let samples = (0.1 * SAMPLE_RATE as f32) as usize;

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), 44 + samples * 2);

        let data_size = u32::from_le_bytes(wav[40..44].try_into().unwrap());
        assert_eq!(data_size as usize, samples * 2);
    }

    #[test]
    fn tone_starts_at_zero_amplitude() {
        let wav = tone_wav(440.0, 10.0, 1.0);
        let first = i16::from_le_bytes(wav[44..46].try_into().unwrap());
        assert_eq!(first, 0);
    }
}
