use std::env;
use std::process;

use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches};

use weighted_sokoban::config::{Config, Format, Strategy};
use weighted_sokoban::level::Level;
use weighted_sokoban::solver::Outcome;
use weighted_sokoban::{Dir, LoadLevel, Pos, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("weighted-sokoban")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds the cheapest solution of sokoban levels with weighted boxes")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("heuristic")
                .long("--heuristic")
                .takes_value(true)
                .possible_values(&["assignment", "sum-of-minima"])
                .default_value("assignment")
                .help("estimate of the remaining cost"),
        )
        .arg(
            Arg::with_name("penalty")
                .long("--penalty")
                .takes_value(true)
                .validator(is_number)
                .help("added to the estimate of seen box configurations, can cost optimality (0 = off)"),
        )
        .arg(
            Arg::with_name("max-nodes")
                .long("--max-nodes")
                .takes_value(true)
                .validator(is_number)
                .help("give up after expanding this many states"),
        )
        .arg(
            Arg::with_name("stats")
                .long("--stats")
                .help("print search statistics"),
        )
        .arg(
            Arg::with_name("status")
                .long("--status")
                .help("print progress while searching"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("-x")
                .long("--xsb")
                .help("print levels in XSB format (default)"),
        )
        .arg(
            Arg::with_name("warehouse")
                .short("-w")
                .long("--warehouse")
                .help("print levels in warehouse format"),
        )
        .group(ArgGroup::with_name("format").args(&["xsb", "warehouse"]))
        .arg(
            Arg::with_name("taboo")
                .long("--taboo")
                .help("print taboo cells instead of solving"),
        )
        .arg(
            Arg::with_name("replay")
                .long("--replay")
                .takes_value(true)
                .value_name("ACTIONS")
                .help("apply actions (e.g. Right,Right,Down or rrD) instead of solving"),
        )
        .arg(
            Arg::with_name("walk")
                .long("--walk")
                .takes_value(true)
                .value_name("ROW,COL")
                .help("print the shortest walk to a cell without pushing instead of solving"),
        )
        .group(ArgGroup::with_name("mode").args(&["taboo", "replay", "walk"]))
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap();
    let level = path.load_level().unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => eprintln!("Can't load level {} in {}: {}", path, dir.display(), err),
            Err(_) => eprintln!("Can't load level {}: {}", path, err),
        }
        process::exit(1);
    });

    let format = if matches.is_present("warehouse") {
        Format::Warehouse
    } else {
        Format::Xsb
    };

    if matches.is_present("taboo") {
        print_taboo(&level);
    } else if let Some(actions) = matches.value_of("replay") {
        replay(&level, actions, format);
    } else if let Some(dest) = matches.value_of("walk") {
        walk(&level, dest);
    } else {
        solve(&level, path, &matches, format);
    }
}

fn is_number(s: String) -> Result<(), String> {
    s.parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("{} is not a non-negative number", s))
}

fn print_taboo(level: &Level) {
    match level.taboo() {
        Ok(taboo) => print!("{}", taboo),
        Err(err) => {
            eprintln!("Invalid level: {}", err);
            process::exit(1);
        }
    }
}

/// Comma separated names or letters, or a LURD string.
fn parse_actions(actions: &str) -> Result<Vec<Dir>, String> {
    let actions = actions.trim();
    if actions.contains(',') {
        actions
            .split(',')
            .map(|action| action.parse::<Dir>().map_err(|err| format!("{}", err)))
            .collect()
    } else if let Ok(dir) = actions.parse::<Dir>() {
        Ok(vec![dir])
    } else {
        actions
            .chars()
            .map(|c| c.to_string().parse::<Dir>().map_err(|err| format!("{}", err)))
            .collect()
    }
}

fn replay(level: &Level, actions: &str, format: Format) {
    let actions = parse_actions(actions).unwrap_or_else(|err| {
        eprintln!("Invalid actions: {}", err);
        process::exit(1);
    });
    match level.replay(&actions) {
        Some(state) => print!("{}", level.format_state(format, &state)),
        None => println!("Impossible"),
    }
}

fn walk(level: &Level, dest: &str) {
    let coords: Vec<_> = dest.split(',').map(|n| n.trim().parse::<u8>()).collect();
    let dest = match coords.as_slice() {
        [Ok(r), Ok(c)] => Pos::new(*r, *c),
        _ => {
            eprintln!("Invalid cell: {} (expected ROW,COL)", dest);
            process::exit(1);
        }
    };
    match level.walk(dest) {
        Ok(Some(moves)) => {
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
        }
        Ok(None) => println!("Unreachable"),
        Err(err) => {
            eprintln!("Invalid level: {}", err);
            process::exit(1);
        }
    }
}

fn solve(level: &Level, path: &str, matches: &ArgMatches<'_>, format: Format) {
    // validators already checked these
    let strategy: Strategy = matches
        .value_of("heuristic")
        .and_then(|s| s.parse().ok())
        .unwrap_or(Config::default().strategy);
    let config = Config {
        strategy,
        revisit_penalty: matches
            .value_of("penalty")
            .and_then(|n| n.parse().ok())
            .unwrap_or(0),
        max_nodes: matches.value_of("max-nodes").and_then(|n| n.parse().ok()),
    };

    println!("Solving {}...", path);
    let solver_ok = level
        .solve(&config, matches.is_present("status"))
        .unwrap_or_else(|err| {
            eprintln!("Invalid level: {}", err);
            process::exit(1);
        });
    if matches.is_present("stats") {
        println!("{}", solver_ok.stats);
    }

    match solver_ok.outcome {
        Outcome::Solved(ref solution) => {
            println!("Found solution:");
            print!("{}", level.format_solution(format, &solution.moves, true));
            println!("{}", solution.moves);
            println!("Moves: {}", solution.moves.move_cnt());
            println!("Pushes: {}", solution.moves.push_cnt());
            println!("Cost: {}", solution.cost);
        }
        Outcome::NoSolution => println!("No solution"),
        Outcome::BudgetExhausted => println!(
            "No solution within {} expanded states",
            config.max_nodes.unwrap_or_default()
        ),
    }
}
