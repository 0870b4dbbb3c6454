use std::{
    fmt::Display,
    path::Path,
    str::FromStr,
    time::{Duration, Instant},
};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{error, info};

use crate::{floating_type_mod::FT, init_collision_sim};

use super::{
    config::{load_config, write_default_config},
    error::AppError,
    snapshot_exporter::SnapshotExporter,
};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const CARGO_PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const PROGRESS_INTERVAL: usize = 1000;

pub fn start() {
    let matches = App::new("Hard Disc Gas Simulation")
        .version(CARGO_PKG_VERSION)
        .about(CARGO_PKG_DESCRIPTION)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Run simulation with given config")
                .arg(
                    Arg::with_name("SIMULATION_CONFIG")
                        .help("YAML file with `simulation` parameters and `scene` setup")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("TICKS")
                        .long("ticks")
                        .short("n")
                        .takes_value(true)
                        .required_unless("MAX_SECONDS")
                        .help("Stop simulation after the given number of collisions"),
                )
                .arg(
                    Arg::with_name("MAX_SECONDS")
                        .long("max-seconds")
                        .short("s")
                        .required(false)
                        .takes_value(true)
                        .help("Stop simulation once the simulated time reaches the given value"),
                )
                .arg(
                    Arg::with_name("OVERWRITE_CONFIG_FILE")
                        .long("overwrite-config-file")
                        .short("c")
                        .required(false)
                        .takes_value(true)
                        .help("Overwrite config"),
                )
                .arg(
                    Arg::with_name("STATISTICS_ENABLED")
                        .help("Track performance of individual phases")
                        .short("p")
                        .long("statistics-enabled")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("STATISTICS_PATH")
                        .long("statistics-path")
                        .short("w")
                        .required(false)
                        .takes_value(true)
                        .help("Where to write statistics to"),
                )
                .arg(
                    Arg::with_name("SNAPSHOT_DIR")
                        .long("snapshot-dir")
                        .required(false)
                        .takes_value(true)
                        .help("Write particle snapshots (YAML) into this folder"),
                )
                .arg(
                    Arg::with_name("SNAPSHOT_EVERY")
                        .long("snapshot-every")
                        .required(false)
                        .takes_value(true)
                        .default_value("1")
                        .help("Write a snapshot every K ticks"),
                ),
        )
        .subcommand(
            SubCommand::with_name("write-default-config")
                .about("Write the default configuration to a file")
                .arg(
                    Arg::with_name("OUTPUT_YAML")
                        .help("YAML file where the configuration is written to")
                        .default_value("./hard-disc-gas.yaml")
                        .takes_value(true),
                ),
        )
        .get_matches();

    init_logger(matches.occurrences_of("v"));

    let result = if let Some(run_matches) = matches.subcommand_matches("run") {
        run(run_matches)
    } else if let Some(subcmd_matches) = matches.subcommand_matches("write-default-config") {
        let path = Path::new(subcmd_matches.value_of("OUTPUT_YAML").unwrap_or("./hard-disc-gas.yaml"));
        write_default_config(path).map(|()| println!("Wrote default configuration to `{}`", path.display()))
    } else {
        unreachable!()
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn parse_arg<T>(matches: &ArgMatches, name: &'static str, long: &'static str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    matches
        .value_of(name)
        .map(|value| {
            value.parse::<T>().map_err(|e| AppError::Argument {
                name: long,
                value: value.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}

fn run(run_matches: &ArgMatches) -> Result<(), AppError> {
    let config_path = Path::new(run_matches.value_of("SIMULATION_CONFIG").unwrap_or_default());
    let overwrite_path = run_matches.value_of("OVERWRITE_CONFIG_FILE").map(Path::new);
    let mut config = load_config(config_path, overwrite_path)?;

    let counters_enabled = run_matches.is_present("STATISTICS_ENABLED");
    config.simulation.counters_enabled |= counters_enabled;
    info!("{:?}", config);

    let max_ticks: Option<usize> = parse_arg(run_matches, "TICKS", "ticks")?;
    let max_seconds: Option<FT> = parse_arg(run_matches, "MAX_SECONDS", "max-seconds")?;
    let snapshot_every: usize = parse_arg(run_matches, "SNAPSHOT_EVERY", "snapshot-every")?.unwrap_or(1);
    if snapshot_every == 0 {
        return Err(AppError::Argument {
            name: "snapshot-every",
            value: "0".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    let statistics_path_opt = run_matches.value_of("STATISTICS_PATH");

    let mut simulation = init_collision_sim(&config)?;

    let mut snapshot_exporter = match run_matches.value_of("SNAPSHOT_DIR") {
        Some(folder) => Some(SnapshotExporter::new(folder, "hard-disc-gas")?),
        None => None,
    };
    if let Some(exporter) = &mut snapshot_exporter {
        exporter.add_snapshot(&simulation)?;
    }

    let initial_energy = simulation.kinetic_energy();
    let mut total_duration = Duration::from_nanos(0);

    loop {
        if max_ticks.map_or(false, |n| simulation.step_number() >= n) {
            break;
        }
        if max_seconds.map_or(false, |t| simulation.time() >= t) {
            break;
        }

        let a = Instant::now();
        let report = simulation.single_step()?;
        total_duration += a.elapsed();

        if let Some(exporter) = &mut snapshot_exporter {
            if report.step_number % snapshot_every == 0 {
                exporter.add_snapshot(&simulation)?;
            }
        }

        if report.step_number % PROGRESS_INTERVAL == 0 {
            info!(
                "{:05}: time {} ({}msec AVG per tick)",
                report.step_number,
                report.time,
                (total_duration / report.step_number as u32).as_secs_f32() * 1000.
            );
        }
    }

    info!(
        "finished {} ticks, simulated time {}, kinetic energy {} (initial {})",
        simulation.step_number(),
        simulation.time(),
        simulation.kinetic_energy(),
        initial_energy
    );

    if counters_enabled {
        let s = simulation.statistics().write();
        print!("{}", s);
        if let Some(statistics_path) = statistics_path_opt {
            std::fs::write(statistics_path, s).map_err(AppError::io(statistics_path))?;
        }
    }

    Ok(())
}
