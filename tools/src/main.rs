//! vibe-runner: headless runner for Idle Vibe Tycoon.
//!
//! Usage:
//!   vibe-runner --seed 12345 --seconds 3600 --db save.db
//!   vibe-runner --seed 12345 --ipc-mode
//!
//! Autoplay drives a greedy player against a manual clock. IPC mode reads
//! one JSON `PlayerCommand` per stdin line and answers with one JSON state
//! view per line, ticking against the wall clock.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use vibe_tycoon_core::{
    clock::{ManualClock, SystemClock, TimeSource},
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    event::GameEvent,
    formulas::format_number,
    repair::RepairQuote,
    state::ActiveModal,
    store::SaveStore,
    terminal::{Terminal, TerminalLine},
    types::Millis,
};

#[derive(serde::Serialize)]
struct UiState<'a> {
    project_name: &'a str,
    level: u32,
    progress: f64,
    resource: f64,
    production_per_second: f64,
    prestige_multiplier: f64,
    total_apps_delivered: u64,
    paused: bool,
    cash: f64,
    market: &'static str,
    fatigue: u32,
    max_fatigue: u32,
    day: u32,
    sleep_debt: u32,
    stability: f64,
    active_modal: ActiveModal,
    bugs_clicks_progress: u32,
    bugs_clicks_required: u32,
    buttons: Vec<ButtonView<'a>>,
    automations: Vec<AutomationView<'a>>,
    repair_quotes: Vec<RepairQuote>,
    events: Vec<GameEvent>,
    lines: Vec<TerminalLine>,
}

#[derive(serde::Serialize)]
struct ButtonView<'a> {
    id: &'a str,
    label: &'a str,
    cost: f64,
    cooldown_remaining_ms: Millis,
}

#[derive(serde::Serialize)]
struct AutomationView<'a> {
    id: &'a str,
    name: &'a str,
    level: u32,
    next_cost: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let seconds = parse_arg(&args, "--seconds", 600u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db", ":memory:");
    let slot = string_arg(&args, "--slot", "default");
    let data_dir = string_arg(&args, "--data-dir", "./data");

    let started: DateTime<Utc> = Utc::now();
    if !ipc_mode {
        println!("Idle Vibe Tycoon - vibe-runner");
        println!("  started:   {}", started.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("  seed:      {seed}");
        println!("  seconds:   {seconds}");
        println!("  db:        {db}");
        println!("  slot:      {slot}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let config = if Path::new(data_dir).is_dir() {
        GameConfig::load(data_dir)?
    } else {
        log::warn!("Data dir {data_dir} not found, using built-in balance");
        GameConfig::default()
    };

    let store = SaveStore::open(db)?;
    store.migrate()?;

    if ipc_mode {
        let mut engine = GameEngine::open(config, seed, Box::new(SystemClock), store, slot)?;
        engine.announce_session();
        run_ipc_loop(&mut engine)
    } else {
        let clock = ManualClock::new(started.timestamp_millis().max(0) as Millis);
        let mut engine = GameEngine::open(config, seed, Box::new(clock.clone()), store, slot)?;
        engine.announce_session();
        let mut terminal = Terminal::new(engine.config().balance.presentation.terminal_capacity);
        run_autoplay(&mut engine, &clock, &mut terminal, seconds)?;
        print_summary(&engine, &terminal, seconds)
    }
}

fn run_ipc_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let command: PlayerCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {}", buffer.trim());
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events = engine.apply(&command)?;
        let lines = engine.take_due_lines();
        let view = build_ui_state(engine, events, lines);
        writeln!(stdout, "{}", serde_json::to_string(&view)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &GameEngine, events: Vec<GameEvent>, lines: Vec<TerminalLine>) -> UiState<'_> {
    let state = engine.state();
    let now = engine.now();
    let repair_quotes = if state.events.active_modal == ActiveModal::Hardware {
        engine.repair_quotes()
    } else {
        Vec::new()
    };

    UiState {
        project_name: &state.project_name,
        level: state.level,
        progress: state.progress,
        resource: state.resource,
        production_per_second: state.production_per_second(),
        prestige_multiplier: state.prestige_multiplier,
        total_apps_delivered: state.total_apps_delivered,
        paused: state.is_paused,
        cash: state.economy.cash,
        market: state.economy.market_direction.arrow(),
        fatigue: state.fatigue.fatigue_level,
        max_fatigue: state.fatigue.max_fatigue,
        day: state.fatigue.day_count,
        sleep_debt: state.fatigue.sleep_debt,
        stability: state.stability,
        active_modal: state.events.active_modal,
        bugs_clicks_progress: state.events.bugs_clicks_progress,
        bugs_clicks_required: state.events.bugs_clicks_required,
        buttons: state
            .action_buttons
            .iter()
            .map(|b| ButtonView {
                id: &b.id,
                label: &b.label,
                cost: b.base_cost,
                cooldown_remaining_ms: b.cooldown_remaining(now),
            })
            .collect(),
        automations: state
            .automations
            .iter()
            .map(|a| AutomationView {
                id: &a.id,
                name: &a.name,
                level: a.current_level,
                next_cost: a.next_cost(),
            })
            .collect(),
        repair_quotes,
        events,
        lines,
    }
}

/// Greedy player: clear modals, rest when nearly exhausted, buy the
/// cheapest affordable automation, then press the strongest ready button.
fn run_autoplay(
    engine:   &mut GameEngine,
    clock:    &ManualClock,
    terminal: &mut Terminal,
    seconds:  u64,
) -> Result<()> {
    let step_ms = engine.config().balance.presentation.tick_interval_ms.max(1);
    let end = clock.now_ms().saturating_add(seconds.saturating_mul(1000));

    while clock.now_ms() < end {
        clock.advance(step_ms);
        engine.tick()?;

        if let Some(command) = choose_command(engine) {
            engine.apply(&command)?;
        }
        terminal.extend(engine.take_due_lines());
    }
    Ok(())
}

fn choose_command(engine: &GameEngine) -> Option<PlayerCommand> {
    let state = engine.state();
    match state.events.active_modal {
        ActiveModal::Bugs => return Some(PlayerCommand::ClickBugsModal),
        ActiveModal::Hardware => {
            let cheapest = engine
                .repair_quotes()
                .into_iter()
                .filter(|q| q.affordable)
                .min_by(|a, b| a.cost.total_cmp(&b.cost));
            return Some(match cheapest {
                Some(quote) => PlayerCommand::ResolveHardware { tier: quote.tier },
                None => {
                    log::warn!("Hardware repair unaffordable with cash {}, resetting", state.economy.cash);
                    PlayerCommand::ResetGame
                }
            });
        }
        ActiveModal::None => {}
    }

    if state.fatigue.ratio() >= 0.95 {
        return Some(PlayerCommand::Sleep);
    }

    let purchase = state
        .automations
        .iter()
        .filter(|a| a.next_cost() <= state.resource)
        .min_by(|a, b| a.next_cost().total_cmp(&b.next_cost()));
    if let Some(automation) = purchase {
        return Some(PlayerCommand::BuyAutomation { automation_id: automation.id.clone() });
    }

    let now = engine.now();
    state
        .action_buttons
        .iter()
        .filter(|b| b.is_ready(now) && b.base_cost <= state.resource)
        .max_by(|a, b| a.base_progress.total_cmp(&b.base_progress))
        .map(|b| PlayerCommand::Click { button_id: b.id.clone() })
}

fn print_summary(engine: &GameEngine, terminal: &Terminal, seconds: u64) -> Result<()> {
    let state = engine.state();
    let delivered = engine
        .store()
        .map(|s| s.event_count(state.game_id, "app_delivered"))
        .transpose()?
        .unwrap_or(0);

    println!("=== RUN SUMMARY ===");
    println!("  game_id:        {}", state.game_id);
    println!("  simulated:      {seconds}s");
    println!("  project:        {} (level {})", state.project_name, state.level);
    println!("  progress:       {:.1}%", state.progress);
    println!("  apps delivered: {} ({delivered} logged)", state.total_apps_delivered);
    println!("  prestige:       {:.3}x", state.prestige_multiplier);
    println!(
        "  code points:    {} (+{}/s)",
        format_number(state.resource),
        format_number(state.production_per_second())
    );
    println!(
        "  cash:           ${} (market {})",
        format_number(state.economy.cash),
        state.economy.market_direction.arrow()
    );
    println!("  day:            {} (fatigue {}/{})", state.fatigue.day_count, state.fatigue.fatigue_level, state.fatigue.max_fatigue);
    println!("  stability:      {:.0}%", state.stability);
    println!("  clicks:         {}", state.total_clicks);

    println!();
    println!("=== TERMINAL (last {} lines) ===", terminal.len());
    for line in terminal.lines() {
        println!("  {}", line.text);
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str, default: &'a str) -> &'a str {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
        .unwrap_or(default)
}
