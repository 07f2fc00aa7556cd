use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use spindle::geometry::SLICE_COUNT;
use spindle::i18n::{I18n, Key};
use spindle::tasks::{TaskError, TaskList};
use std::path::PathBuf;

/// One entry row per slice. Saving writes the task file and hides the dialog.
pub struct TaskEditor {
    i18n: I18n,
    path: Option<PathBuf>,
    /// List being edited. Its tasks past the last slice are saved back unchanged.
    tasks: TaskList,
    rows: Vec<(gtk::Label, gtk::Entry)>,
    error: String,
    visible: bool,
}

#[derive(Debug)]
pub enum EditorMsg {
    Open {
        tasks: TaskList,
        i18n: I18n,
        path: PathBuf,
    },
    Save,
}

#[derive(Debug)]
pub enum EditorOutput {
    Saved(TaskList),
}

pub fn row_label(i18n: &I18n, index: usize) -> String {
    format!("{} #{}:", i18n.get(Key::TaskLabel), index + 1)
}

/// Entry texts for the slice rows. Tasks past the last slice are not shown.
pub fn row_texts(tasks: &TaskList) -> [String; SLICE_COUNT] {
    std::array::from_fn(|index| {
        tasks
            .slice(index)
            .map(|task| task.as_str().to_string())
            .unwrap_or_default()
    })
}

/// Builds the list to save from the rows, keeping the tasks that did not fit on the wheel.
pub fn collect_tasks<I>(rows: I, tasks: &TaskList) -> Result<TaskList, TaskError>
where
    I: IntoIterator<Item = String>,
{
    let overflow = tasks.overflow().iter().map(|task| task.as_str().to_string());
    TaskList::new(rows.into_iter().chain(overflow))
}

#[relm4::component(pub)]
impl SimpleComponent for TaskEditor {
    type Init = ();
    type Input = EditorMsg;
    type Output = EditorOutput;

    view! {
        #[root]
        gtk::Window {
            set_modal: true,
            set_resizable: false,
            #[watch]
            set_title: Some(model.i18n.get(Key::AppName)),
            #[watch]
            set_visible: model.visible,

            connect_close_request[sender] => move |_| {
                sender.input(EditorMsg::Save);
                glib::Propagation::Stop
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_margin_all: 12,

                #[name = "grid"]
                gtk::Grid {
                    set_row_spacing: 6,
                    set_column_spacing: 12,
                },

                gtk::Label {
                    set_xalign: 0.0,
                    set_wrap: true,
                    add_css_class: "funwheel-error",
                    #[watch]
                    set_label: &model.error,
                    #[watch]
                    set_visible: !model.error.is_empty(),
                },

                gtk::Button {
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_label: model.i18n.get(Key::ButtonTasksOk),
                    connect_clicked => EditorMsg::Save,
                },
            }
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let mut model = TaskEditor {
            i18n: I18n::default(),
            path: None,
            tasks: TaskList::default(),
            rows: Vec::with_capacity(SLICE_COUNT),
            error: String::new(),
            visible: false,
        };

        let widgets = view_output!();

        for index in 0..SLICE_COUNT {
            let label = gtk::Label::new(Some(&row_label(&model.i18n, index)));
            label.set_xalign(0.0);
            let entry = gtk::Entry::new();
            entry.set_hexpand(true);
            entry.set_width_chars(32);

            let sender = sender.clone();
            entry.connect_activate(move |_| sender.input(EditorMsg::Save));

            widgets.grid.attach(&label, 0, index as i32, 1, 1);
            widgets.grid.attach(&entry, 1, index as i32, 1, 1);
            model.rows.push((label, entry));
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            EditorMsg::Open { tasks, i18n, path } => {
                log::info!("Editing tasks in {}", path.display());
                self.i18n = i18n;
                for (index, ((label, entry), text)) in
                    self.rows.iter().zip(row_texts(&tasks)).enumerate()
                {
                    label.set_label(&row_label(&i18n, index));
                    entry.set_text(&text);
                }
                if let Some((_, first)) = self.rows.first() {
                    first.grab_focus();
                }
                self.tasks = tasks;
                self.path = Some(path);
                self.error.clear();
                self.visible = true;
            }
            EditorMsg::Save => {
                let Some(path) = self.path.clone() else {
                    self.visible = false;
                    return;
                };
                let rows = self.rows.iter().map(|(_, entry)| entry.text().to_string());
                let saved = collect_tasks(rows, &self.tasks)
                    .and_then(|list| list.save(&path).map(|()| list));
                match saved {
                    Ok(list) => {
                        self.visible = false;
                        self.error.clear();
                        if sender.output(EditorOutput::Saved(list)).is_err() {
                            log::debug!("Task editor output dropped");
                        }
                    }
                    Err(e) => {
                        log::warn!("Not saving tasks: {}", e);
                        self.error = e.to_string();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle::config::Language;

    fn tasks(names: &[&str]) -> TaskList {
        TaskList::new(names).unwrap()
    }

    #[test]
    fn test_row_labels_are_numbered_from_one() {
        assert_eq!(row_label(&I18n::new(Language::EnUs), 0), "Task #1:");
        assert_eq!(row_label(&I18n::new(Language::DeDe), 7), "Aufgabe #8:");
    }

    #[test]
    fn test_rows_are_filled_from_slices() {
        let texts = row_texts(&tasks(&["dishes", "laundry"]));
        assert_eq!(texts[0], "dishes");
        assert_eq!(texts[1], "laundry");
        assert!(texts[2..].iter().all(String::is_empty));
    }

    #[test]
    fn test_collect_keeps_overflow_and_drops_blank_rows() {
        let names: Vec<String> = (1..=10).map(|i| format!("task {i}")).collect();
        let current = TaskList::new(&names).unwrap();

        let mut rows = row_texts(&current).to_vec();
        rows[1] = "  ".to_string();
        rows[2] = "new task".to_string();

        let saved = collect_tasks(rows, &current).unwrap();
        let saved: Vec<&str> = saved.iter().map(|task| task.as_str()).collect();
        assert_eq!(saved.len(), 9);
        assert_eq!(saved[0], "task 1");
        assert_eq!(saved[1], "new task");
        assert_eq!(&saved[7..], &["task 9", "task 10"]);
    }

    #[test]
    fn test_collect_rejects_comment_rows() {
        let rows = ["#1 priority".to_string()];
        assert!(matches!(
            collect_tasks(rows, &TaskList::default()),
            Err(TaskError::Invalid { .. })
        ));
    }
}
