use crate::geometry::{SLICE_COUNT, slice_index};
use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use rand::seq::SliceRandom;
use std::path::Path;
use thiserror::Error;

const FILE_HEADER: &str = "# One line per task";
const ELLIPSIS: &str = "...";
const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, From, Into, AsRef)]
pub struct Task(String);

crate::impl_string_newtype!(Task);

impl Task {
    /// Shortens the task to at most `max_len` characters, ending in "..." when cut.
    pub fn ellipsize(&self, max_len: usize) -> String {
        if self.0.chars().count() <= max_len {
            return self.0.clone();
        }
        let keep = max_len.saturating_sub(ELLIPSIS.len());
        let mut short: String = self.0.chars().take(keep).collect();
        short.push_str(ELLIPSIS);
        short
    }
}

#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Task {task:?} {reason}")]
    Invalid { task: String, reason: &'static str },
}

/// A task has to survive a save and reload as exactly one line.
fn check_task(task: &str) -> Result<(), TaskError> {
    let reason = if task.starts_with(COMMENT_MARKER) {
        "starts with '#' and would be read back as a comment"
    } else if task.contains(['\n', '\r']) {
        "spans several lines"
    } else {
        return Ok(());
    };
    Err(TaskError::Invalid {
        task: task.to_string(),
        reason,
    })
}

/// Ordered tasks; the first eight are bound to the wheel's slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Trims each task and drops blank ones. Fails on tasks the file format cannot hold.
    pub fn new<I, S>(tasks: I) -> Result<Self, TaskError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tasks = tasks
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .map(|t| check_task(&t).map(|()| Task::new(t)))
            .collect::<Result<_, _>>()?;
        Ok(Self { tasks })
    }

    /// Parses the task file format: one task per line, `#` starts a comment line.
    pub fn parse(contents: &str) -> Self {
        let tasks = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
            .map(Task::new)
            .collect();
        Self { tasks }
    }

    /// Reads the task file. A missing file is an empty list.
    pub fn load(path: &Path, randomize: bool) -> Result<Self, TaskError> {
        if !path.exists() {
            log::debug!("No task file at {}", path.display());
            return Ok(Self::default());
        }

        let mut list = Self::parse(&fs::read_to_string(path)?);
        if randomize {
            list.tasks.shuffle(&mut rand::rng());
        }
        log::debug!("Loaded {} tasks from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn save(&self, path: &Path) -> Result<(), TaskError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        log::info!("Saved {} tasks to {}", self.len(), path.display());
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::from(FILE_HEADER);
        out.push('\n');
        for task in &self.tasks {
            out.push_str(task);
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Task bound to slice `index`, if the slice is not empty.
    pub fn slice(&self, index: usize) -> Option<&Task> {
        (index < SLICE_COUNT).then(|| self.tasks.get(index))?
    }

    /// Tasks that do not fit on the wheel.
    pub fn overflow(&self) -> &[Task] {
        self.tasks.get(SLICE_COUNT..).unwrap_or_default()
    }

    pub fn task_for_angle(&self, angle: f64) -> Option<&Task> {
        self.slice(slice_index(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("spindle-tasks-{}-{}", std::process::id(), name))
            .join("tasks.wfn")
    }

    fn eight() -> TaskList {
        TaskList::new(["dishes", "laundry", "gym", "read", "call mom", "taxes", "garden", "nap"]).unwrap()
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let list = TaskList::parse("# One line per task\n\n  dishes  \n#skip\nlaundry\n   \n");
        let tasks: Vec<&str> = list.iter().map(Task::as_str).collect();
        assert_eq!(tasks, vec!["dishes", "laundry"]);
    }

    #[test]
    fn test_render_round_trips_through_parse() {
        let list = eight();
        let rendered = list.render();
        assert!(rendered.starts_with("# One line per task\n"));
        assert_eq!(TaskList::parse(&rendered), list);
    }

    #[test]
    fn test_slices_beyond_eight_are_not_on_the_wheel() {
        let mut names: Vec<String> = (1..=10).map(|i| format!("task {i}")).collect();
        names.insert(3, "   ".to_string());
        let list = TaskList::new(names).unwrap();

        assert_eq!(list.len(), 10);
        assert_eq!(list.slice(7).map(Task::as_str), Some("task 8"));
        assert_eq!(list.slice(8), None);
        assert_eq!(list.overflow().len(), 2);
    }

    #[test]
    fn test_rest_angle_zero_picks_first_task() {
        let list = eight();
        assert_eq!(list.task_for_angle(0.0).map(Task::as_str), Some("dishes"));
        // slice index = floor(((360 - 100 + 22.5) mod 360) / 45) = 6
        assert_eq!(list.task_for_angle(100.0).map(Task::as_str), Some("garden"));
    }

    #[test]
    fn test_empty_slice_has_no_task() {
        let list = TaskList::new(["only"]).unwrap();
        assert_eq!(list.task_for_angle(0.0).map(Task::as_str), Some("only"));
        assert_eq!(list.task_for_angle(180.0), None);
    }

    #[test]
    fn test_ellipsize() {
        let task = Task::new("Clean the garage and sort the boxes");
        assert_eq!(task.ellipsize(38), "Clean the garage and sort the boxes");
        assert_eq!(task.ellipsize(12), "Clean the...");
        assert_eq!(Task::new("Äpfel pflücken").ellipsize(8), "Äpfel...");
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let list = eight();
        list.save(&path).unwrap();

        let loaded = TaskList::load(&path, false).unwrap();
        assert_eq!(loaded, list);

        let mut shuffled: Vec<Task> = TaskList::load(&path, true).unwrap().iter().cloned().collect();
        shuffled.sort();
        let mut expected: Vec<Task> = list.iter().cloned().collect();
        expected.sort();
        assert_eq!(shuffled, expected);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_tasks_that_would_not_reload_are_rejected() {
        let cases = vec![
            vec!["dishes", "#1 priority"],
            vec!["  # indented comment"],
            vec!["first line\nsecond line"],
            vec!["carriage\rreturn"],
        ];

        for tasks in cases {
            let err = TaskList::new(&tasks);
            assert!(matches!(err, Err(TaskError::Invalid { .. })), "{tasks:?}");
        }

        let list = TaskList::new(["pay bill #42", "  trailing newline \n"]).unwrap();
        assert_eq!(TaskList::parse(&list.render()), list);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let loaded = TaskList::load(&temp_path("missing"), false).unwrap();
        assert!(loaded.is_empty());
    }
}
