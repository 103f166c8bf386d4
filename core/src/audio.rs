/// # Audio
/// A binary gate over some tone generator; the engine plays it while the sound timer is running.
pub trait Audio {
    fn play(&mut self);
    fn pause(&mut self);
}

/// Audio gate that makes no sound
#[derive(Debug, Default)]
pub struct Mute;

impl Audio for Mute {
    fn play(&mut self) {}

    fn pause(&mut self) {}
}
