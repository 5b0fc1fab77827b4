use serde::Serialize;
use tracing::error;

use crate::config::AppConfig;
use crate::data::DataRegistry;
use crate::error::{PopulationError, Result};
use crate::server::{self, api};

const USAGE: &str =
    "usage: poptrends <serve|countries|population|growth|trends|snapshot|validate> [args]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Countries,
    Population,
    Growth,
    Trends,
    Snapshot,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("countries") => Some(Command::Countries),
        Some("population") => Some(Command::Population),
        Some("growth") => Some(Command::Growth),
        Some("trends") => Some(Command::Trends),
        Some("snapshot") => Some(Command::Snapshot),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Dispatch a command line and return the process exit code (0 ok, 1 failure, 2 usage).
pub fn run_with_args(args: &[String]) -> i32 {
    let config = AppConfig::from_env();
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(&config),
        Some(Command::Countries) => {
            run_query(&config, |registry| Ok(api::list_countries(registry)))
        }
        Some(Command::Population) => handle_population(&config, args),
        Some(Command::Growth) => handle_growth(&config, args),
        Some(Command::Trends) => handle_trends(&config, args),
        Some(Command::Snapshot) => handle_snapshot(&config, args),
        Some(Command::Validate) => handle_validate(&config, args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_serve(config: &AppConfig) -> i32 {
    let registry = match config.load_registry() {
        Ok(registry) => registry,
        Err(err) => {
            error!(error = %err, "failed to load dataset");
            return 1;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to start async runtime");
            return 1;
        }
    };

    match runtime.block_on(server::run_server(&config.bind_addr, registry)) {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, "server error");
            1
        }
    }
}

fn handle_population(config: &AppConfig, args: &[String]) -> i32 {
    let Some(codes) = args.get(2) else {
        eprintln!("usage: poptrends population <CODE[,CODE...]>");
        return 2;
    };
    run_query(config, |registry| api::population_data(registry, codes))
}

fn handle_growth(config: &AppConfig, args: &[String]) -> i32 {
    let (Some(code), Some(raw_year)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: poptrends growth <CODE> <YEAR>");
        return 2;
    };
    let Some(year) = parse_year_arg(raw_year) else {
        return 2;
    };
    run_query(config, |registry| api::country_growth(registry, code, year))
}

fn handle_trends(config: &AppConfig, args: &[String]) -> i32 {
    let Some(code) = args.get(2) else {
        eprintln!("usage: poptrends trends <CODE> [START_YEAR] [END_YEAR]");
        return 2;
    };
    let mut bounds = [None, None];
    for (slot, raw) in bounds.iter_mut().zip(args.iter().skip(3)) {
        let Some(year) = parse_year_arg(raw) else {
            return 2;
        };
        *slot = Some(year);
    }
    let [start_year, end_year] = bounds;
    run_query(config, |registry| {
        api::trends(registry, code, start_year, end_year)
    })
}

fn handle_snapshot(config: &AppConfig, args: &[String]) -> i32 {
    let year = match args.get(2) {
        Some(raw) => match parse_year_arg(raw) {
            Some(year) => Some(year),
            None => return 2,
        },
        None => None,
    };
    run_query(config, |registry| api::dashboard(registry, year))
}

fn handle_validate(config: &AppConfig, args: &[String]) -> i32 {
    let mut config = config.clone();
    if let Some(path) = args.get(2) {
        config.dataset_path = path.into();
    }

    match config.load_registry() {
        Ok(registry) => {
            let dataset = registry.dataset();
            println!(
                "validation passed: {} (rows={}, countries={}, regions={})",
                config.dataset_path.display(),
                dataset.len(),
                dataset.list_countries().len(),
                registry.regions().len()
            );
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn run_query<T, F>(config: &AppConfig, query: F) -> i32
where
    T: Serialize,
    F: FnOnce(&DataRegistry) -> Result<T>,
{
    let registry = match config.load_registry() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("failed to load dataset: {err}");
            return 1;
        }
    };

    let payload = query(registry.as_ref()).and_then(|value| {
        serde_json::to_string_pretty(&value)
            .map_err(|err| PopulationError::Internal(err.to_string()))
    });
    match payload {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn parse_year_arg(raw: &str) -> Option<i32> {
    let year = raw.trim().parse::<i32>().ok();
    if year.is_none() {
        eprintln!("invalid year '{raw}'");
    }
    year
}
