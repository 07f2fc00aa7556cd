use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};
use spindle::config::AssetPaths;
use spindle::{AudioSink, Clip};
use std::path::Path;

/// Plays the wheel's clips through kira. Anything that fails to load stays silent.
pub struct SoundBoard {
    manager: Option<AudioManager<DefaultBackend>>,
    stopper: Option<StaticSoundData>,
    settle: Option<StaticSoundData>,
}

impl SoundBoard {
    pub fn new(assets: &AssetPaths) -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => Some(manager),
            Err(e) => {
                log::warn!("Audio disabled: {}", e);
                None
            }
        };

        Self {
            manager,
            stopper: load_clip(&assets.sound_stopper),
            settle: load_clip(&assets.sound_settle),
        }
    }
}

fn load_clip(path: &Path) -> Option<StaticSoundData> {
    StaticSoundData::from_file(path)
        .map_err(|e| log::warn!("Failed to load sound {}: {}", path.display(), e))
        .ok()
}

impl AudioSink for SoundBoard {
    fn play(&mut self, clip: Clip) {
        let Some(manager) = self.manager.as_mut() else {
            return;
        };
        let data = match clip {
            Clip::Stopper => &self.stopper,
            Clip::Settle => &self.settle,
        };
        if let Some(data) = data
            && let Err(e) = manager.play(data.clone())
        {
            log::debug!("Failed to play {}: {:?}", clip, e);
        }
    }
}
