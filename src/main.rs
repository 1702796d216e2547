use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing::{error, info, warn};

use ruckrs::config::AppConfig;
use ruckrs::error::{ErrorSeverity, RuckError};
use ruckrs::format::{
    format_calories, format_distance, format_duration, format_pace, format_weight, short_id,
    workout_detail, workout_row,
};
use ruckrs::logging::init_logging;
use ruckrs::session::{is_exit, split_line};
use ruckrs::{GearCategory, GearItem, Route, RuckStore, Workout, WorkoutDraft};

/// ruckrs - Rucking Workout Log
///
/// Keep a gear inventory, pick preset routes and record weighted-pack
/// workouts. Data lives for one run of the program; use `session` to issue
/// several commands against the same data.
#[derive(Parser)]
#[command(name = "ruckrs")]
#[command(version)]
#[command(about = "Rucking workout log", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print entities as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// One line typed inside `ruckrs session`
#[derive(Parser)]
#[command(name = "ruckrs", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    /// Print entities as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the gear inventory
    Gear {
        #[command(subcommand)]
        action: GearAction,
    },

    /// List preset routes
    Routes,

    /// Record a new workout
    Log {
        /// Preset route (name or id); its distance is used
        #[arg(short, long, conflicts_with = "distance")]
        route: Option<String>,

        /// Custom distance in miles
        #[arg(short, long)]
        distance: Option<String>,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..24))]
        hours: u32,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..60))]
        minutes: u32,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..60))]
        seconds: u32,

        /// Gear carried (name or id), repeatable
        #[arg(short, long)]
        gear: Vec<String>,
    },

    /// Show workout history, newest first
    History {
        /// Number of workouts to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// One text entry per workout instead of a table
        #[arg(long)]
        plain: bool,
    },

    /// Show the details of one workout
    Show {
        /// Workout id or id prefix
        query: String,
    },

    /// Change the distance or duration of a recorded workout
    Edit {
        /// Workout id or id prefix
        query: String,

        /// New distance in miles
        #[arg(short, long)]
        distance: Option<f64>,

        /// New duration in seconds
        #[arg(short = 't', long)]
        duration: Option<f64>,
    },

    /// Delete a recorded workout
    Rm {
        /// Workout id or id prefix
        query: String,
    },

    /// Read commands from stdin against one set of data
    Session,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum GearAction {
    /// List gear items
    List {
        /// Group items by category
        #[arg(long)]
        grouped: bool,
    },

    /// Add a gear item
    Add {
        #[arg(short, long)]
        name: String,

        /// Weight in pounds
        #[arg(short, long)]
        weight: f64,

        /// Vest, Stone, Backpack or Sandbag
        #[arg(short, long)]
        category: GearCategory,
    },

    /// Change a gear item; past workouts keep their own copy
    Edit {
        /// Gear name or id
        query: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        weight: Option<f64>,

        #[arg(short, long)]
        category: Option<GearCategory>,
    },

    /// Remove a gear item; past workouts keep their own copy
    Rm {
        /// Gear name or id
        query: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Everything a command needs: the data plus the settings it was started with
struct App {
    store: RuckStore,
    config: AppConfig,
    config_path: PathBuf,
}

#[derive(Tabled)]
struct GearRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&GearItem> for GearRow {
    fn from(item: &GearItem) -> Self {
        GearRow {
            id: short_id(&item.id),
            name: item.name.clone(),
            weight: format_weight(item.weight),
            category: item.category.to_string(),
        }
    }
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Route")]
    name: String,
    #[tabled(rename = "Distance")]
    distance: String,
}

impl From<&Route> for RouteRow {
    fn from(route: &Route) -> Self {
        RouteRow {
            id: short_id(&route.id),
            name: route.name.clone(),
            distance: format_distance(route.distance),
        }
    }
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Pace")]
    pace: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Calories")]
    calories: String,
}

impl From<&Workout> for WorkoutRow {
    fn from(workout: &Workout) -> Self {
        WorkoutRow {
            id: short_id(&workout.id),
            date: workout.date.format("%Y-%m-%d %H:%M").to_string(),
            route: workout
                .route_name
                .clone()
                .unwrap_or_else(|| "Custom".to_string()),
            distance: format_distance(workout.distance),
            duration: format_duration(workout.duration),
            pace: format_pace(workout.pace()),
            weight: format_weight(workout.total_gear_weight()),
            calories: format_calories(workout.calories),
        }
    }
}

/// Workout as JSON, with the derived values alongside the stored ones
#[derive(Serialize)]
struct WorkoutView<'a> {
    #[serde(flatten)]
    workout: &'a Workout,
    total_gear_weight: f64,
    pace: f64,
}

impl<'a> From<&'a Workout> for WorkoutView<'a> {
    fn from(workout: &'a Workout) -> Self {
        WorkoutView {
            workout,
            total_gear_weight: workout.total_gear_weight(),
            pace: workout.pace(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let config = AppConfig::load_or_default(&config_path)?;

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    init_logging(&log_config)?;

    if !config.display.color {
        colored::control::set_override(false);
    }

    let store = if config.seed.load_examples {
        RuckStore::seeded()
    } else {
        RuckStore::empty()
    };

    let mut app = App {
        store,
        config,
        config_path,
    };

    match cli.command {
        Commands::Session => run_session(&mut app),
        command => run_command(&mut app, command, cli.json),
    }
}

fn run_session(app: &mut App) -> Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();

    info!("session started");
    if interactive {
        println!(
            "{}",
            "ruckrs session. Type a command (e.g. `history`), `help`, or `exit`.".dimmed()
        );
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", "ruck> ".bold());
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read session input")?;

        let words = match split_line(&line) {
            Ok(words) => words,
            Err(err) => {
                report_error(&err.into());
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }
        if is_exit(&words) {
            break;
        }

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                // help and usage errors are printed by clap itself
                let _ = err.print();
                continue;
            }
        };

        if matches!(parsed.command, Commands::Session) {
            println!("{}", "Already in a session.".yellow());
            continue;
        }

        if let Err(err) = run_command(app, parsed.command, parsed.json) {
            report_error(&err);
        }
    }

    info!(
        gear = app.store.gear.len(),
        workouts = app.store.workouts.len(),
        "session ended"
    );
    Ok(())
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<RuckError>() {
        Some(ruck_err) => {
            match ruck_err.severity() {
                ErrorSeverity::Error => error!(error = %ruck_err, "command failed"),
                ErrorSeverity::Warning => warn!(error = %ruck_err, "command rejected"),
                ErrorSeverity::Info => info!(error = %ruck_err, "command rejected"),
            }
            eprintln!("{} {}", "✗".red(), ruck_err.user_message());
        }
        None => {
            error!(error = %err, "command failed");
            eprintln!("{} {:#}", "✗".red(), err);
        }
    }
}

fn run_command(app: &mut App, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Gear { action } => run_gear(app, action, json),

        Commands::Routes => {
            let routes = app.store.routes.list();
            if json {
                return print_json(&routes);
            }
            print_table(routes.iter().map(RouteRow::from).collect());
            Ok(())
        }

        Commands::Log {
            route,
            distance,
            hours,
            minutes,
            seconds,
            gear,
        } => {
            let mut draft = WorkoutDraft::new().with_duration(hours, minutes, seconds);

            match (route, distance) {
                (Some(query), _) => {
                    let route = app.store.resolve_route(&query)?;
                    draft = draft.with_route(route.id);
                }
                (None, Some(text)) => draft = draft.with_distance(text),
                (None, None) => bail!(RuckError::Validation(
                    "either --route or --distance is required".to_string()
                )),
            }

            for query in &gear {
                let item = app.store.resolve_gear(query)?;
                draft.gear.insert(item.id);
            }

            let workout = app.store.submit(&draft)?;
            info!(id = %workout.id, "workout logged");

            if json {
                return print_json(&WorkoutView::from(&workout));
            }
            println!("{}", "✓ Workout recorded".green().bold());
            println!("{}", workout_detail(&workout));
            Ok(())
        }

        Commands::History { limit, plain } => {
            let limit = limit.unwrap_or(app.config.display.history_limit);
            let history: Vec<&Workout> =
                app.store.workouts.history().into_iter().take(limit).collect();

            if json {
                let views: Vec<WorkoutView> = history.into_iter().map(WorkoutView::from).collect();
                return print_json(&views);
            }
            if history.is_empty() {
                println!("{}", "No workouts recorded yet.".dimmed());
                return Ok(());
            }
            if plain {
                let entries: Vec<String> = history.into_iter().map(workout_row).collect();
                println!("{}", entries.join("\n\n"));
                return Ok(());
            }
            print_table(history.into_iter().map(WorkoutRow::from).collect());
            Ok(())
        }

        Commands::Show { query } => {
            let workout = app.store.resolve_workout(&query)?;
            if json {
                return print_json(&WorkoutView::from(workout));
            }
            println!("{}", workout_detail(workout));
            Ok(())
        }

        Commands::Edit {
            query,
            distance,
            duration,
        } => {
            let mut workout = app.store.resolve_workout(&query)?.clone();
            if let Some(distance) = distance {
                workout.distance = distance;
            }
            if let Some(duration) = duration {
                workout.duration = duration;
            }

            app.store.workouts.update(workout.clone());

            if json {
                return print_json(&WorkoutView::from(&workout));
            }
            println!("{}", "✓ Workout updated (calories unchanged)".green());
            println!("{}", workout_detail(&workout));
            Ok(())
        }

        Commands::Rm { query } => {
            let id = app.store.resolve_workout(&query)?.id;
            app.store.workouts.delete(id);
            println!("{} {}", "✓ Deleted workout".green(), short_id(&id));
            Ok(())
        }

        Commands::Session => bail!("session cannot be nested"),

        Commands::Config { action } => run_config(app, action),
    }
}

fn run_gear(app: &mut App, action: GearAction, json: bool) -> Result<()> {
    match action {
        GearAction::List { grouped } => {
            let catalog = &app.store.gear;
            if json {
                return print_json(&catalog.list());
            }
            if catalog.is_empty() {
                println!("{}", "No gear yet. Add some with `gear add`.".dimmed());
                return Ok(());
            }

            if grouped {
                for (category, items) in catalog.grouped_by_category() {
                    println!("{}", category.to_string().cyan().bold());
                    print_table(items.into_iter().map(GearRow::from).collect());
                }
            } else {
                print_table(catalog.list().iter().map(GearRow::from).collect());
            }
            Ok(())
        }

        GearAction::Add {
            name,
            weight,
            category,
        } => {
            let item = app.store.gear.add(name, weight, category);
            if json {
                return print_json(&item);
            }
            println!("{}", "✓ Gear added".green());
            print_table(vec![GearRow::from(&item)]);
            Ok(())
        }

        GearAction::Edit {
            query,
            name,
            weight,
            category,
        } => {
            let mut item = app.store.resolve_gear(&query)?.clone();
            if let Some(name) = name {
                item.name = name;
            }
            if let Some(weight) = weight {
                item.weight = weight;
            }
            if let Some(category) = category {
                item.category = category;
            }

            app.store.gear.update(item.clone());

            if json {
                return print_json(&item);
            }
            println!("{}", "✓ Gear updated".green());
            print_table(vec![GearRow::from(&item)]);
            Ok(())
        }

        GearAction::Rm { query } => {
            let item = app.store.resolve_gear(&query)?.clone();
            app.store.gear.delete(item.id);
            println!("{} {}", "✓ Removed".green(), item.name);
            Ok(())
        }
    }
}

fn run_config(app: &mut App, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", format!("# {}", app.config_path.display()).dimmed());
            print!("{}", app.config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { force } => {
            if app.config_path.exists() && !force {
                bail!(RuckError::Configuration(format!(
                    "{} already exists (use --force to overwrite)",
                    app.config_path.display()
                )));
            }

            let mut config = AppConfig::default();
            config.save_to_file(&app.config_path)?;
            println!("{} {}", "✓ Wrote".green(), app.config_path.display());
            Ok(())
        }
    }
}
