use crate::events::AppEvent;
use crate::sys::watcher::{self, WatchTargets};
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(tx: Sender<AppEvent>, targets: WatchTargets) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(watcher::run_async_watcher(tx, targets));
    });
}
