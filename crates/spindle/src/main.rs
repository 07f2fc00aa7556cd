use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use spindle::config::{self, Config};
use spindle::geometry::Point;
use spindle::i18n::{I18n, Key};
use spindle::velocity::random_fling;
use spindle::{AudioSink, Clip, SpinningDirection, TaskList, TickResult, Wheel};

const PICK_MAX_TICKS: u64 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "spindle", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin the wheel headless and report where it settles
    Simulate {
        /// Initial velocity in degrees per tick; negative spins left
        #[arg(short, long, default_value_t = 15.0, allow_negative_numbers = true)]
        velocity: f64,

        /// Seed for the detent randomness
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,

        /// Print every tick as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Spin with a random velocity and print the chosen task
    Pick {
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Show or replace the task list
    Tasks {
        #[command(subcommand)]
        command: TasksCommand,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum TasksCommand {
    /// Print the tasks with the slice they are bound to
    List,
    /// Replace the task list
    Set { tasks: Vec<String> },
    /// Print the task file location
    Path,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Write the commented default config if none exists
    Init,
}

/// Stands in for the speaker when there is no GUI.
struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, clip: Clip) {
        log::debug!("play {clip}");
    }
}

#[derive(Serialize)]
struct TickLine<'a> {
    tick: u64,
    #[serde(flatten)]
    result: &'a TickResult,
    velocity: f64,
    direction: SpinningDirection,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = config::load_or_default();

    match cli.command {
        Commands::Simulate {
            velocity,
            seed,
            max_ticks,
            json,
        } => simulate(&config, velocity, seed, max_ticks, json),
        Commands::Pick { seed } => pick(&config, seed),
        Commands::Tasks { command } => tasks(&config, command),
        Commands::Config { command } => match command {
            ConfigCommand::Path => {
                println!("{}", config::get_config_path()?.display());
                Ok(())
            }
            ConfigCommand::Init => {
                let path =
                    config::write_default_config().context("Failed to write default config")?;
                println!("{}", path.display());
                Ok(())
            }
        },
    }
}

fn wheel_for(config: &Config, seed: Option<u64>) -> Wheel {
    let center = Point::new(
        f64::from(config.window_width) / 2.0,
        f64::from(config.window_height) / 2.0,
    );
    match seed {
        Some(seed) => Wheel::seeded(config.physics, center, seed),
        None => Wheel::new(config.physics, center),
    }
}

fn simulate(
    config: &Config,
    velocity: f64,
    seed: Option<u64>,
    max_ticks: u64,
    json: bool,
) -> anyhow::Result<()> {
    if !velocity.is_finite() {
        anyhow::bail!("Velocity must be a finite number, got {velocity}");
    }

    let mut wheel = wheel_for(config, seed);
    wheel.fling(velocity);

    let mut sink = LogSink;
    let mut stoppers = 0u64;
    let mut line_error = None;
    let settled = wheel.coast_until_settled(max_ticks, |tick, result, snapshot| {
        result.dispatch(&mut sink);
        stoppers += u64::from(result.play_stopper_sound);
        if json && line_error.is_none() {
            let line = TickLine {
                tick,
                result,
                velocity: snapshot.velocity,
                direction: snapshot.direction,
            };
            match serde_json::to_string(&line) {
                Ok(line) => println!("{line}"),
                Err(e) => line_error = Some(e),
            }
        }
    })?;
    if let Some(e) = line_error {
        return Err(e.into());
    }

    let snapshot = wheel.snapshot();
    match settled {
        Some(tick) => {
            let tasks = TaskList::load(&config.tasks_path()?, false)?;
            let task = tasks
                .slice(wheel.slice_index())
                .map_or_else(|| "-".to_string(), |t| t.ellipsize(config.task_max_length));
            println!(
                "settled after {tick} ticks at {:.2} degrees, slice {} ({task}), {stoppers} stoppers",
                snapshot.angle,
                wheel.slice_index()
            )
        }
        None => println!(
            "still spinning after {max_ticks} ticks at {:.2} degrees, velocity {:.3}",
            snapshot.angle, snapshot.velocity
        ),
    }
    Ok(())
}

fn pick(config: &Config, seed: Option<u64>) -> anyhow::Result<()> {
    let tasks = TaskList::load(&config.tasks_path()?, config.randomize_tasks)?;
    let i18n = I18n::new(config.language);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let velocity = random_fling(&mut rng, &config.physics);

    let mut wheel = wheel_for(config, seed);
    wheel.fling(velocity);
    let mut sink = LogSink;
    let settled =
        wheel.coast_until_settled(PICK_MAX_TICKS, |_, result, _| result.dispatch(&mut sink))?;
    if settled.is_none() {
        anyhow::bail!("The wheel did not settle within {PICK_MAX_TICKS} ticks");
    }

    match tasks.slice(wheel.slice_index()) {
        Some(task) => println!(
            "{} {}",
            i18n.get(Key::ResultPrefix),
            task.ellipsize(config.task_max_length)
        ),
        None => println!("{}", i18n.get(Key::EmptySlice)),
    }
    Ok(())
}

fn tasks(config: &Config, command: TasksCommand) -> anyhow::Result<()> {
    let path = config.tasks_path()?;
    match command {
        TasksCommand::List => {
            let tasks = TaskList::load(&path, false)?;
            for (index, task) in tasks.iter().enumerate() {
                match tasks.slice(index) {
                    Some(_) => println!("{index}: {task}"),
                    None => println!("-: {task} (not on the wheel)"),
                }
            }
        }
        TasksCommand::Set { tasks } => {
            let list = TaskList::new(tasks).context("Refusing to save the task list")?;
            list.save(&path)
                .with_context(|| format!("Failed to save tasks to {}", path.display()))?;
            if !list.overflow().is_empty() {
                log::warn!(
                    "Only the first 8 tasks fit on the wheel, {} left off",
                    list.overflow().len()
                );
            }
        }
        TasksCommand::Path => println!("{}", path.display()),
    }
    Ok(())
}
