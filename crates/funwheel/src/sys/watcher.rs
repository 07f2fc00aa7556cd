use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use spindle::config::{self, Config, ConfigError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Files whose changes the running app reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTargets {
    pub config: PathBuf,
    pub tasks: PathBuf,
}

impl WatchTargets {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config::get_config_path()?,
            tasks: config.tasks_path()?,
        })
    }

    pub fn directories(&self) -> BTreeSet<PathBuf> {
        [&self.config, &self.tasks]
            .into_iter()
            .filter_map(|p| p.parent())
            .map(Path::to_path_buf)
            .collect()
    }

    pub fn classify(&self, paths: &[PathBuf]) -> Vec<AppEvent> {
        let mut events = Vec::new();
        if paths.contains(&self.config) {
            events.push(AppEvent::ConfigChanged);
        }
        if paths.contains(&self.tasks) {
            events.push(AppEvent::TasksChanged);
        }
        events
    }
}

pub async fn run_async_watcher(tx: Sender<AppEvent>, targets: WatchTargets) {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    for dir in targets.directories() {
        if let Err(e) = fs_err::create_dir_all(&dir) {
            log::error!("Failed to create directory for watching: {}", e);
            continue;
        }
        if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
            log::error!("Failed to watch {}: {}", dir.display(), e);
        }
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                if !meaningful_event {
                    continue;
                }

                for app_event in targets.classify(&event.paths) {
                    log::debug!("{:?} from {:?}", app_event, event.paths);
                    if tx.send(app_event).await.is_err() {
                        return;
                    }
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> WatchTargets {
        WatchTargets {
            config: PathBuf::from("/home/ada/.config/funwheel/config.toml"),
            tasks: PathBuf::from("/home/ada/.local/share/funwheel/tasks.wfn"),
        }
    }

    #[test]
    fn test_classify() {
        let targets = targets();
        let cases = vec![
            (vec![targets.config.clone()], vec![AppEvent::ConfigChanged]),
            (vec![targets.tasks.clone()], vec![AppEvent::TasksChanged]),
            (
                vec![targets.tasks.clone(), targets.config.clone()],
                vec![AppEvent::ConfigChanged, AppEvent::TasksChanged],
            ),
            (
                vec![PathBuf::from("/home/ada/.config/funwheel/config.toml.swp")],
                vec![],
            ),
        ];

        for (paths, expected) in cases {
            assert_eq!(targets.classify(&paths), expected, "{paths:?}");
        }
    }

    #[test]
    fn test_directories_are_deduplicated() {
        let mut targets = targets();
        assert_eq!(targets.directories().len(), 2);

        targets.tasks = PathBuf::from("/home/ada/.config/funwheel/tasks.wfn");
        let dirs: Vec<PathBuf> = targets.directories().into_iter().collect();
        assert_eq!(dirs, vec![PathBuf::from("/home/ada/.config/funwheel")]);
    }
}
