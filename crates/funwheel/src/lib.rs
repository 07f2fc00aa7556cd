pub mod audio;
pub mod events;
pub mod gui;
pub mod sys;

use spindle::{Config, TaskList};

pub fn load_tasks(config: &Config) -> anyhow::Result<TaskList> {
    let path = config.tasks_path()?;
    Ok(TaskList::load(&path, config.randomize_tasks)?)
}
