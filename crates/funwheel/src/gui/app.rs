use crate::audio::SoundBoard;
use crate::events::AppEvent;
use crate::gui::editor::{EditorMsg, EditorOutput, TaskEditor};
use crate::gui::scene::{Frame, Scene};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use spindle::config::{self, Config};
use spindle::geometry::Point;
use spindle::i18n::{I18n, Key};
use spindle::velocity::random_fling;
use spindle::{TaskList, Wheel};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub config: Config,
    pub i18n: I18n,
    pub tasks: TaskList,
    pub wheel: Wheel,
    pub scene: Rc<RefCell<Scene>>,
    pub sounds: SoundBoard,
    pub pointer: Point,
    pub pressed: bool,
    pub size: (f64, f64),
    pub last_frame: Frame,
    pub result: String,
    pub timer: Option<glib::SourceId>,
    pub editor: Controller<TaskEditor>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick,
    PointerMove(Point),
    Press(Point),
    Release,
    Resize(i32, i32),
    Fling,
    EditTasks,
    TasksSaved(TaskList),
    Close,
    TasksChanged,
    ConfigChanged,
}

impl From<EditorOutput> for AppMsg {
    fn from(output: EditorOutput) -> Self {
        match output {
            EditorOutput::Saved(tasks) => AppMsg::TasksSaved(tasks),
        }
    }
}

/// Pointer position during a drag. GTK reports drags as an offset from where they began.
pub fn drag_point(start: Option<(f64, f64)>, offset_x: f64, offset_y: f64) -> Option<Point> {
    start.map(|(x, y)| Point::new(x + offset_x, y + offset_y))
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::TasksChanged => AppMsg::TasksChanged,
            AppEvent::ConfigChanged => AppMsg::ConfigChanged,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, TaskList, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(model.i18n.get(Key::AppName)),
            add_css_class: "funwheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::space {
                        sender.input(AppMsg::Fling);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::e || key == gtk::gdk::Key::E {
                        sender.input(AppMsg::EditTasks);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerMove(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureDrag {
                        set_button: gtk::gdk::BUTTON_PRIMARY,
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Press(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some(point) = drag_point(gesture.start_point(), dx, dy) {
                                sender.input(AppMsg::PointerMove(point));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some(point) = drag_point(gesture.start_point(), dx, dy) {
                                sender.input(AppMsg::PointerMove(point));
                            }
                            sender.input(AppMsg::Release);
                        }
                    }
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_margin_bottom: 32,
                    add_css_class: "funwheel-result",
                    #[watch]
                    set_label: &model.result,
                    #[watch]
                    set_visible: !model.result.is_empty(),
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, tasks, rx) = init;

        theme::load_css();
        window::configure(&root, &config);

        let size = (
            f64::from(config.window_width),
            f64::from(config.window_height),
        );
        let center = Point::new(size.0 / 2.0, size.1 / 2.0);

        let editor = TaskEditor::builder()
            .transient_for(&root)
            .launch(())
            .forward(sender.input_sender(), AppMsg::from);

        let model = AppModel {
            i18n: I18n::new(config.language),
            wheel: Wheel::new(config.physics, center),
            scene: Rc::new(RefCell::new(Scene::new(&config, &tasks))),
            sounds: SoundBoard::new(&config.assets),
            pointer: center,
            pressed: false,
            size,
            last_frame: Frame::default(),
            result: String::new(),
            timer: None,
            editor,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            tasks,
            config,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let scene_draw = model.scene.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = scene_draw.borrow().draw(cr, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.start_timer(&sender);
        if model.config.edit_tasks_on_start {
            sender.input(AppMsg::EditTasks);
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Tick => self.tick(),
            AppMsg::PointerMove(point) => self.pointer = point,
            AppMsg::Press(point) => {
                self.pointer = point;
                self.pressed = true;
                self.result.clear();
            }
            AppMsg::Release => self.pressed = false,
            AppMsg::Resize(width, height) => {
                self.size = (f64::from(width), f64::from(height));
                self.wheel
                    .set_center(Point::new(self.size.0 / 2.0, self.size.1 / 2.0));
            }
            AppMsg::Fling => {
                let velocity = random_fling(&mut rand::rng(), self.wheel.physics());
                log::debug!("Flinging wheel at {:.2}", velocity);
                self.wheel.fling(velocity);
                self.result.clear();
            }
            AppMsg::EditTasks => self.edit_tasks(),
            AppMsg::TasksSaved(tasks) => self.apply_tasks(tasks),
            AppMsg::Close => self.root.close(),
            AppMsg::TasksChanged => self.reload_tasks(),
            AppMsg::ConfigChanged => self.reload_config(&sender),
        }
    }
}

impl AppModel {
    fn start_timer(&mut self, sender: &ComponentSender<Self>) {
        if let Some(timer) = self.timer.take() {
            timer.remove();
        }
        let interval = Duration::from_millis(u64::from(1000 / self.config.fps.max(1)));
        let sender = sender.clone();
        self.timer = Some(glib::timeout_add_local(interval, move || {
            sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        }));
    }

    fn tick(&mut self) {
        let result = match self.wheel.update(self.pointer, self.pressed) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Skipping tick: {}", e);
                return;
            }
        };
        result.dispatch(&mut self.sounds);

        if result.fire_settle_event {
            self.result = self.announce();
            log::info!("{}", self.result);
        }

        let frame = Frame::new(self.wheel.snapshot(), self.size.0, self.size.1);
        if frame != self.last_frame {
            self.scene.borrow_mut().update(&frame);
            self.last_frame = frame;
            self.drawing_area.queue_draw();
        }
    }

    fn announce(&self) -> String {
        match self.tasks.slice(self.wheel.slice_index()) {
            Some(task) => format!(
                "{} {}",
                self.i18n.get(Key::ResultPrefix),
                task.ellipsize(self.config.task_max_length)
            ),
            None => self.i18n.get(Key::EmptySlice).to_string(),
        }
    }

    fn edit_tasks(&self) {
        match self.config.tasks_path() {
            Ok(path) => self.editor.emit(EditorMsg::Open {
                tasks: self.tasks.clone(),
                i18n: self.i18n,
                path,
            }),
            Err(e) => log::error!("Cannot edit tasks: {}", e),
        }
    }

    fn apply_tasks(&mut self, tasks: TaskList) {
        self.scene
            .borrow_mut()
            .set_tasks(&tasks, self.config.task_max_length);
        self.tasks = tasks;
        self.drawing_area.queue_draw();
    }

    fn reload_tasks(&mut self) {
        match crate::load_tasks(&self.config) {
            Ok(tasks) => {
                self.apply_tasks(tasks);
                log::info!("Tasks reloaded");
            }
            Err(e) => log::error!("Failed to reload tasks: {}", e),
        }
    }

    fn reload_config(&mut self, sender: &ComponentSender<Self>) {
        let new_config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        self.i18n = I18n::new(new_config.language);
        if new_config.physics != self.config.physics {
            self.wheel.set_physics(new_config.physics);
        }
        if new_config.assets != self.config.assets {
            self.sounds = SoundBoard::new(&new_config.assets);
        }
        let fps_changed = new_config.fps != self.config.fps;
        self.config = new_config;

        *self.scene.borrow_mut() = Scene::new(&self.config, &self.tasks);
        self.last_frame = Frame::default();
        self.reload_tasks();
        if fps_changed {
            self.start_timer(sender);
        }
        log::info!("Configuration reloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_point_adds_offset_to_start() {
        let cases = vec![
            (Some((400.0, 400.0)), (0.0, 0.0), Some(Point::new(400.0, 400.0))),
            (Some((600.0, 300.0)), (12.5, 40.0), Some(Point::new(612.5, 340.0))),
            (Some((100.0, 500.0)), (-30.0, -80.0), Some(Point::new(70.0, 420.0))),
            (None, (5.0, 5.0), None),
        ];

        for (start, (dx, dy), expected) in cases {
            assert_eq!(drag_point(start, dx, dy), expected, "{start:?} + ({dx}, {dy})");
        }
    }

    #[test]
    fn test_editor_output_maps_to_tasks_saved() {
        let tasks = TaskList::new(["dishes"]).unwrap();
        match AppMsg::from(EditorOutput::Saved(tasks.clone())) {
            AppMsg::TasksSaved(saved) => assert_eq!(saved, tasks),
            other => panic!("unexpected message {other:?}"),
        }
    }
}
