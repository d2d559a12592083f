use std::fmt::Write as _;
use std::sync::Arc;

use crate::data::Catalog;
use crate::format::{EffectType, FormatRegistry};
use crate::parallel::{validate_teams, WorkerPool};
use crate::team::{load_team_file, Team};
use crate::validate::Validator;

const USAGE: &str = "usage: teamcheck <validate|rules|format|formats>";

/// Env var capping the worker threads used by `validate` (0 or unset: all cores).
pub const WORKERS_ENV: &str = "TEAMCHECK_WORKERS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Validate,
    Rules,
    Format,
    Formats,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("validate") => Some(Command::Validate),
        Some("rules") => Some(Command::Rules),
        Some("format") => Some(Command::Format),
        Some("formats") => Some(Command::Formats),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let required = match command {
        Command::Validate => 4,
        Command::Rules | Command::Format => 3,
        Command::Formats => 2,
    };
    if args.len() < required {
        eprintln!("{}", command_usage(command));
        return 2;
    }

    let Some(catalog) = load_catalog() else {
        return 1;
    };
    let validator = Validator::from_catalog(&catalog);

    match command {
        Command::Validate => handle_validate(&validator, &args[2], &args[3..]),
        Command::Rules => handle_rules(&validator, &args[2]),
        Command::Format => handle_format(&validator, &args[2]),
        Command::Formats => handle_formats(&catalog.formats),
    }
}

fn command_usage(command: Command) -> &'static str {
    match command {
        Command::Validate => "usage: teamcheck validate <format> <team.json> [team.json...]",
        Command::Rules => "usage: teamcheck rules <format>",
        Command::Format => "usage: teamcheck format <name>",
        Command::Formats => "usage: teamcheck formats",
    }
}

fn load_catalog() -> Option<Arc<Catalog>> {
    let data_dir = Catalog::data_dir_from_env();
    match Catalog::load(&data_dir) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            eprintln!("failed to load data from '{data_dir}': {err}");
            None
        }
    }
}

/// Playable formats grouped under their section headings, in definition order.
fn handle_formats(formats: &FormatRegistry) -> i32 {
    let mut report = String::new();
    let mut section = None;
    for format in formats.iter().filter(|format| format.effect_type == EffectType::Format) {
        if section != Some(format.section.as_str()) {
            section = Some(format.section.as_str());
            let _ = writeln!(&mut report, "{}:", format.section);
        }
        let _ = writeln!(&mut report, "  {}  {}", format.id, format.name);
    }
    print!("{report}");
    0
}

fn handle_validate(validator: &Validator, format: &str, paths: &[String]) -> i32 {
    let mut teams: Vec<Team> = Vec::with_capacity(paths.len());
    for path in paths {
        match load_team_file(path) {
            Ok(team) => teams.push(team),
            Err(err) => {
                eprintln!("failed to load team: {err}");
                return 1;
            }
        }
    }

    let pool = WorkerPool::with_workers(workers_from_env());
    let results = match validate_teams(validator, &teams, Some(format), &pool) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    let mut report = String::new();
    let mut invalid = 0;
    for (path, problems) in paths.iter().zip(&results) {
        if problems.is_empty() {
            let _ = writeln!(&mut report, "{path}: valid");
            continue;
        }
        invalid += 1;
        let _ = writeln!(&mut report, "{path}: {} problem(s)", problems.len());
        for problem in problems {
            let _ = writeln!(&mut report, "- {problem}");
        }
    }
    print!("{report}");
    if invalid == 0 {
        0
    } else {
        1
    }
}

fn handle_rules(validator: &Validator, name: &str) -> i32 {
    let resolver = validator.resolver();
    let table = resolver
        .format(name)
        .and_then(|format| resolver.resolve(&format));
    match table {
        Ok(table) => print_json(&*table, "rule table"),
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_format(validator: &Validator, name: &str) -> i32 {
    match validator.resolver().format(name) {
        Ok(format) => print_json(&*format, "format"),
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn workers_from_env() -> usize {
    let raw = std::env::var(WORKERS_ENV).ok();
    raw.as_deref()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = &raw {
                eprintln!("invalid {WORKERS_ENV} '{value}', using all cores");
            }
            0
        })
}
