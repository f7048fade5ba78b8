//! savegame-tool: make, inspect, resume and catalogue saved games.
//!
//! Usage:
//!   savegame-tool demo --seed 7 --players 4 [--out DIR] [--db PATH]
//!   savegame-tool inspect FILE [--json]
//!   savegame-tool resume FILE [--ignore-constraints]
//!   savegame-tool list [--db PATH]
//!   savegame-tool import FILE [--db PATH]
//!
//! Every command accepts `--config PATH` (JSON, see `SaveConfig`).

mod units;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use savegame_core::{
    config::SaveConfig,
    game::StandardBoardProjector,
    loader::create_loaded_game,
    sample::sample_game,
    store::{self, SaveStore},
    LiveSession, SnapshotModel,
};
use std::env;
use std::path::Path;
use units::bytes_to_human_units;

#[derive(serde::Serialize)]
struct SeatSummary<'a> {
    seat:         usize,
    name:         Option<&'a str>,
    vacant:       bool,
    robot:        bool,
    total_vp:     i32,
    pieces:       usize,
    dev_cards:    usize,
    has_fortress: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match arg_str(&args, "--config") {
        Some(path) => SaveConfig::load(path)?,
        None => SaveConfig::default(),
    };

    dispatch(&args, &config)
}

fn dispatch(args: &[String], config: &SaveConfig) -> Result<()> {
    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        return Ok(());
    };

    match command {
        "demo" => run_demo(args, config),
        "inspect" => run_inspect(args),
        "resume" => run_resume(args, config),
        "list" => run_list(args, config),
        "import" => run_import(args, config),
        other => {
            log::warn!("Unknown command: {other}");
            print_usage();
            anyhow::bail!("unknown command: {other}")
        }
    }
}

fn run_demo(args: &[String], config: &SaveConfig) -> Result<()> {
    let seed = parse_arg(args, "--seed", 42u64);
    let players = parse_arg(args, "--players", config.demo_players);
    let out = arg_str(args, "--out").unwrap_or(&config.save_dir);
    if players == 0 {
        anyhow::bail!("--players must be at least 1");
    }

    let now = Utc::now();
    let game = sample_game(seed, players, now - Duration::minutes(40));
    let model = SnapshotModel::capture(&game, &StandardBoardProjector)?;
    let path = store::save_to_file(&model, Path::new(out), config.pretty_json)?;

    println!("saved-game demo");
    println!("  seed:    {seed}");
    println!("  game:    {}", model.game_name);
    println!("  state:   {}", model.game_state);
    println!("  board:   {:?}", model.board_info.encoding_format());
    println!("  file:    {}", path.display());
    println!("  size:    {}", bytes_to_human_units(file_len(&path)?)?);

    if let Some(db) = arg_str(args, "--db") {
        let store = open_store(db)?;
        let id = store.insert_saved_game(&model, now)?;
        log::info!("demo game '{}' stored in {db} as {id}", model.game_name);
        println!("  stored:  {id}");
    }
    Ok(())
}

fn run_inspect(args: &[String]) -> Result<()> {
    let path = positional(args, "inspect FILE")?;
    let model = store::load_from_file(Path::new(path))?;

    if args.iter().any(|a| a == "--json") {
        let seats: Vec<SeatSummary> = model
            .player_seats
            .iter()
            .enumerate()
            .map(|(seat, s)| SeatSummary {
                seat,
                name:         s.name.as_deref(),
                vacant:       s.is_seat_vacant,
                robot:        s.is_robot,
                total_vp:     s.total_vp,
                pieces:       s.pieces.len(),
                dev_cards:    s.new_dev_cards.len() + s.old_dev_cards.len(),
                has_fortress: s.fortress_piece.is_some(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&seats)?);
        return Ok(());
    }

    println!("=== {} ===", model.game_name);
    println!("  model version:  {}", model.model_version);
    println!("  min version:    {}", model.game_min_version);
    println!("  state:          {}", model.game_state);
    println!("  current player: {}", model.current_player_number);
    println!("  dice:           {}", model.current_dice);
    println!("  duration:       {}s", model.game_duration_seconds);
    println!("  options:        {}", model.game_options.as_deref().unwrap_or("(defaults)"));
    println!("  board:          {:?}", model.board_info.encoding_format());
    println!("  constraints:    {}", model.constraints.len());
    println!("  size:           {}", bytes_to_human_units(file_len(Path::new(path))?)?);
    println!();
    for (pn, seat) in model.player_seats.iter().enumerate() {
        if seat.is_seat_vacant {
            println!("  seat {pn}: (vacant)");
            continue;
        }
        let kind = match (seat.is_robot, seat.robot_class.as_deref()) {
            (false, _) => "human".to_string(),
            (true, Some(class)) => format!("robot {class}"),
            (true, None) => "robot".to_string(),
        };
        println!(
            "  seat {pn}: {} ({kind}) | VP {} | pieces {} | cards {}+{}",
            seat.name.as_deref().unwrap_or("?"),
            seat.total_vp,
            seat.pieces.len(),
            seat.new_dev_cards.len(),
            seat.old_dev_cards.len(),
        );
    }
    Ok(())
}

fn run_resume(args: &[String], config: &SaveConfig) -> Result<()> {
    let path = positional(args, "resume FILE")?;
    let ignore = config.ignore_constraints || args.iter().any(|a| a == "--ignore-constraints");

    let model = store::load_from_file(Path::new(path))?;
    let mut game = create_loaded_game(&model)?;
    println!("loaded '{}' in state {}", game.name, game.game_state());

    model
        .resume_play(&mut game, ignore)
        .with_context(|| format!("resuming {path}"))?;
    println!("resumed '{}' in state {}", game.name, game.game_state());
    Ok(())
}

fn run_list(args: &[String], config: &SaveConfig) -> Result<()> {
    let db = arg_str(args, "--db").unwrap_or(&config.db_path);
    let store = open_store(db)?;
    let rows = store.list_saved_games()?;
    if rows.is_empty() {
        println!("(no saved games in {db})");
        return Ok(());
    }
    for row in rows {
        println!(
            "{} | {} | v{} | {} | {} | {}",
            row.id,
            row.game_name,
            row.model_version,
            row.game_state,
            row.saved_at.format("%Y-%m-%d %H:%M:%S"),
            bytes_to_human_units(row.size_bytes as i64)?,
        );
    }
    Ok(())
}

fn run_import(args: &[String], config: &SaveConfig) -> Result<()> {
    let path = positional(args, "import FILE")?;
    let db = arg_str(args, "--db").unwrap_or(&config.db_path);

    let model = store::load_from_file(Path::new(path))?;
    let store = open_store(db)?;
    let id = store.insert_saved_game(&model, Utc::now())?;
    log::info!("imported {path} into {db} as {id}");
    println!("imported '{}' as {id}", model.game_name);
    Ok(())
}

fn open_store(db: &str) -> Result<SaveStore> {
    if let Some(dir) = Path::new(db).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let store = SaveStore::open(db)?;
    store.migrate()?;
    Ok(store)
}

fn file_len(path: &Path) -> Result<i64> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    Ok(i64::try_from(len)?)
}

fn print_usage() {
    println!("usage: savegame-tool <demo|inspect|resume|list|import> [options]");
}

/// Second argument, the command's operand.
fn positional<'a>(args: &'a [String], usage: &str) -> Result<&'a str> {
    args.get(2)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .with_context(|| format!("usage: savegame-tool {usage}"))
}

fn arg_str<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
