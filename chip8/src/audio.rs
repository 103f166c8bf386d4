use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use chip8_core::Audio;

const SAMPLE_RATE: i32 = 44100;
const AMPLITUDE: f64 = 28000.0;
const TONE: f64 = 441.0;

/// A sine wave generator fed to SDL from its audio thread
pub struct SineWave {
    sample: u64,
    rate: f64,
}

impl AudioCallback for SineWave {
    type Channel = i16;

    fn callback(&mut self, out: &mut [i16]) {
        for x in out.iter_mut() {
            let time = self.sample as f64 / self.rate;
            *x = (AMPLITUDE * (2.0 * std::f64::consts::PI * TONE * time).sin()) as i16;
            self.sample = self.sample.wrapping_add(1);
        }
    }
}

/// # Beeper
/// Plays a 441Hz tone through SDL while the gate is open.
/// The device is closed when the beeper is dropped.
pub struct Beeper {
    device: AudioDevice<SineWave>,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: Some(2048),
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| SineWave {
            sample: 0,
            rate: f64::from(spec.freq),
        })?;
        Ok(Beeper { device })
    }
}

impl Audio for Beeper {
    fn play(&mut self) {
        self.device.resume();
    }

    fn pause(&mut self) {
        self.device.pause();
    }
}
