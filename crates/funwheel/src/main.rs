use funwheel::gui::app::AppModel;
use funwheel::gui::window::APP_ID;
use funwheel::sys::runtime;
use funwheel::sys::watcher::WatchTargets;
use relm4::prelude::*;
use spindle::TaskList;
use spindle::config;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let tasks = funwheel::load_tasks(&config).unwrap_or_else(|e| {
        log::error!("Failed to load tasks: {}", e);
        TaskList::default()
    });

    let (tx, rx) = async_channel::bounded(32);

    match WatchTargets::from_config(&config) {
        Ok(targets) => runtime::start_background_services(tx, targets),
        Err(e) => log::warn!("Not watching for changes: {}", e),
    }

    let app = RelmApp::new(APP_ID);

    app.run::<AppModel>((config, tasks, rx));
}
