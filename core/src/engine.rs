//! The progression engine: sole owner of the simulation state.
//!
//! CONTROL STATES:
//!   Running       no modal open; clicks advance progress.
//!   EventBlocked  bugs or hardware modal open; clicks, purchases and
//!                 manual sleep are ignored and progress is frozen until
//!                 resolution. Ticks, pause and reset still run.
//!
//! RULES:
//!   - Every action runs to completion and either mutates or is a no-op.
//!   - All gameplay randomness flows through the one RandomSource.
//!     Draw order inside a click: market flip, event draw, bugs
//!     requirement, delivery payment.
//!   - All timestamps come from the TimeSource.
//!   - A snapshot is saved after every mutating action; mutating events
//!     are appended to the store's event log.
//!   - Narrative lines go to the DisplayQueue; the engine owns no timers.

use crate::{
    clock::{ManualClock, TimeSource},
    command::PlayerCommand,
    config::GameConfig,
    economy::{self, MarketDirection},
    error::GameResult,
    event::{EventLogEntry, GameEvent, IgnoreReason},
    fatigue::DayRollover,
    formulas,
    procedural::{FileNode, ProjectGenerator},
    random_event::{self, RandomEvent},
    repair::{self, RepairOutcome, RepairQuote, RepairTier},
    rng::{GameRng, RandomSource, RngBank, StreamSlot},
    snapshot::{GameSnapshot, RestoreOutcome},
    state::{ActiveModal, SimulationState},
    store::SaveStore,
    terminal::{DisplayQueue, LogKind, TerminalLine},
    types::{GameId, Millis},
};

/// Start time of the manual clock handed out by `build_test`.
pub const TEST_EPOCH_MS: Millis = 1_700_000_000_000;

pub const DEFAULT_SLOT: &str = "default";

pub struct GameEngine {
    config:    GameConfig,
    state:     SimulationState,
    clock:     Box<dyn TimeSource>,
    rng:       Box<dyn RandomSource>,
    narrative: GameRng,
    display:   DisplayQueue,
    store:     Option<SaveStore>,
    slot:      String,
    restore_outcome: RestoreOutcome,
}

impl GameEngine {
    /// A fresh game with no persistence.
    pub fn new(config: GameConfig, seed: u64, clock: Box<dyn TimeSource>) -> Self {
        let bank = RngBank::new(seed);
        let mut narrative = bank.stream(StreamSlot::Narrative);
        let state = fresh_state(&config, &mut narrative, clock.now_ms());
        Self {
            display: DisplayQueue::new(config.balance.presentation.log_stagger_ms),
            rng: Box::new(bank.stream(StreamSlot::Gameplay)),
            narrative,
            state,
            clock,
            config,
            store: None,
            slot: DEFAULT_SLOT.to_string(),
            restore_outcome: RestoreOutcome::NoSnapshot,
        }
    }

    /// Open the game saved in `slot`, or start fresh if there is none or
    /// it cannot be used. Only database errors propagate.
    pub fn open(
        config: GameConfig,
        seed:   u64,
        clock:  Box<dyn TimeSource>,
        store:  SaveStore,
        slot:   &str,
    ) -> GameResult<Self> {
        let json = store.load_snapshot(slot)?;
        let mut engine = Self::new(config, seed, clock);
        let fresh = engine.state.clone();
        let (state, outcome) = GameSnapshot::restore_or(json.as_deref(), || fresh);
        engine.state = state;
        engine.restore_outcome = outcome;
        engine.store = Some(store);
        engine.slot = slot.to_string();
        if engine.restore_outcome != RestoreOutcome::Restored {
            engine.save_snapshot()?;
        }
        log::info!(
            "Opened slot '{slot}' ({:?}): project '{}' level {}",
            engine.restore_outcome,
            engine.state.project_name,
            engine.state.level
        );
        Ok(engine)
    }

    /// Default config, a manual clock at TEST_EPOCH_MS, no persistence.
    /// Returns the clock handle so callers can advance time.
    pub fn build_test(seed: u64) -> (Self, ManualClock) {
        let clock = ManualClock::new(TEST_EPOCH_MS);
        let engine = Self::new(GameConfig::default(), seed, Box::new(clock.clone()));
        (engine, clock)
    }

    /// Like `build_test`, backed by an in-memory save store.
    pub fn build_test_with_store(seed: u64) -> GameResult<(Self, ManualClock)> {
        let store = SaveStore::in_memory()?;
        store.migrate()?;
        let clock = ManualClock::new(TEST_EPOCH_MS);
        let engine = Self::open(GameConfig::default(), seed, Box::new(clock.clone()), store, DEFAULT_SLOT)?;
        Ok((engine, clock))
    }

    /// Replace the gameplay random source (e.g. with a ScriptedRng).
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Adopt a previously captured state. Invalid states are rejected
    /// and the current state is kept.
    pub fn load_state(&mut self, state: SimulationState) -> GameResult<RestoreOutcome> {
        if let Err(reason) = state.validate() {
            log::warn!("Refusing to load state: {reason}");
            return Ok(RestoreOutcome::Rejected { reason });
        }
        self.state = state;
        self.save_snapshot()?;
        Ok(RestoreOutcome::Restored)
    }

    // ── Read-only views ────────────────────────────────────────

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game_id(&self) -> GameId {
        self.state.game_id
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    pub fn restore_outcome(&self) -> &RestoreOutcome {
        &self.restore_outcome
    }

    pub fn store(&self) -> Option<&SaveStore> {
        self.store.as_ref()
    }

    /// Shut the engine down and hand back its store.
    pub fn into_store(self) -> Option<SaveStore> {
        self.store
    }

    pub fn file_tree(&self) -> FileNode {
        ProjectGenerator::file_tree(&self.state.project_name)
    }

    pub fn repair_quotes(&self) -> Vec<RepairQuote> {
        repair::quotes(&self.config.balance.repair, self.state.stability, self.state.economy.cash)
    }

    /// Terminal lines whose display time has come.
    pub fn take_due_lines(&mut self) -> Vec<TerminalLine> {
        let now = self.clock.now_ms();
        self.display.take_due(now)
    }

    pub fn pending_lines(&self) -> usize {
        self.display.len()
    }

    /// Session banner shown when a host attaches.
    pub fn announce_session(&mut self) {
        let now = self.clock.now_ms();
        let lines = [
            (LogKind::Success, "╔═══════════════════════════════════════════╗".to_string()),
            (LogKind::Success, "║   IDLE VIBE TYCOON - AI CODE SIMULATOR    ║".to_string()),
            (LogKind::Success, "╚═══════════════════════════════════════════╝".to_string()),
            (LogKind::Output, String::new()),
            (LogKind::Command, format!("$ Initializing project: {}", self.state.project_name)),
            (LogKind::Info, "$ Loading holographic development environment...".to_string()),
            (LogKind::Success, "✓ System ready. Start clicking to code!".to_string()),
            (LogKind::Output, String::new()),
        ];
        for (kind, text) in lines {
            self.display.push(now, kind, text);
        }
    }

    // ── Dispatch ───────────────────────────────────────────────

    pub fn apply(&mut self, command: &PlayerCommand) -> GameResult<Vec<GameEvent>> {
        log::debug!("apply {}", command.name());
        match command {
            PlayerCommand::Tick                             => self.tick(),
            PlayerCommand::Pause                            => self.set_paused(true),
            PlayerCommand::Resume                           => self.set_paused(false),
            PlayerCommand::Click { button_id }              => self.click(button_id),
            PlayerCommand::BuyAutomation { automation_id }  => self.buy_automation(automation_id),
            PlayerCommand::ClickBugsModal                   => self.click_bugs_modal(),
            PlayerCommand::ResolveHardware { tier }         => self.resolve_hardware(*tier),
            PlayerCommand::Sleep                            => self.sleep(),
            PlayerCommand::ResetGame                        => self.reset_game(),
        }
    }

    // ── Actions ────────────────────────────────────────────────

    /// Accrue passive production for the time since the last tick.
    /// Safe at any cadence: a long gap accrues proportionally.
    pub fn tick(&mut self) -> GameResult<Vec<GameEvent>> {
        if self.state.is_paused {
            return ignored("tick", IgnoreReason::Paused);
        }
        let now = self.clock.now_ms();
        let elapsed_ms = now.saturating_sub(self.state.last_tick_ms);
        if elapsed_ms == 0 {
            return Ok(vec![GameEvent::ProductionAccrued { elapsed_secs: 0.0, amount: 0.0 }]);
        }
        let elapsed_secs = elapsed_ms as f64 / 1000.0;
        let amount = (self.state.production_per_second() * elapsed_secs).min(f64::MAX);
        self.state.resource = (self.state.resource + amount).min(f64::MAX);
        self.state.last_tick_ms = now;
        self.commit(vec![GameEvent::ProductionAccrued { elapsed_secs, amount }])
    }

    pub fn set_paused(&mut self, paused: bool) -> GameResult<Vec<GameEvent>> {
        if self.state.is_paused == paused {
            return Ok(vec![]);
        }
        self.state.is_paused = paused;
        if !paused {
            // Paused time does not accrue.
            self.state.last_tick_ms = self.clock.now_ms();
        }
        self.commit(vec![GameEvent::PauseChanged { paused }])
    }

    /// Use an action button.
    pub fn click(&mut self, button_id: &str) -> GameResult<Vec<GameEvent>> {
        let now = self.clock.now_ms();
        if self.state.is_blocked() {
            return ignored("click", IgnoreReason::ModalActive { modal: self.state.events.active_modal });
        }
        let Some(index) = self.state.action_buttons.iter().position(|b| b.id == button_id) else {
            return ignored("click", IgnoreReason::UnknownButton { button_id: button_id.to_string() });
        };
        let button = &self.state.action_buttons[index];
        let remaining_ms = button.cooldown_remaining(now);
        if remaining_ms > 0 {
            return ignored("click", IgnoreReason::Cooldown { remaining_ms });
        }
        if self.state.resource < button.base_cost {
            return ignored(
                "click",
                IgnoreReason::InsufficientResource { needed: button.base_cost, available: self.state.resource },
            );
        }

        let cost = button.base_cost;
        let label = button.label.clone();
        let prestige = self.state.prestige_multiplier;
        let progress_gain = formulas::click_progress(button.base_progress, self.state.level) * prestige;
        let resource_gain = button.base_progress * prestige;
        let old_progress = self.state.progress;
        let new_progress = (old_progress + progress_gain).min(100.0);

        self.state.resource = (self.state.resource - cost + resource_gain).max(0.0);
        self.state.progress = new_progress;
        self.state.total_clicks += 1;
        self.state.action_buttons[index].last_used_ms = now;

        let mut events = vec![GameEvent::ButtonClicked {
            button_id: button_id.to_string(),
            cost,
            resource_gain,
            progress_gain,
            progress: new_progress,
        }];

        let fatigue_cfg = &self.config.balance.fatigue;
        let rent_interval = self.config.balance.economy.rent_interval_days;
        if let Some(rollover) = self.state.fatigue.exert(fatigue_cfg.fatigue_per_click, rent_interval) {
            self.apply_rollover(rollover, now, &mut events);
        }

        let direction = MarketDirection::roll(self.rng.as_mut());
        self.state.economy.market_direction = direction;
        events.push(GameEvent::MarketMoved { direction });

        let code = ProjectGenerator::pseudo_code(&label, self.state.level, &mut self.narrative);
        self.display
            .push_staggered(now, code.into_iter().map(|line| (LogKind::classify(&line), line)));

        self.check_thresholds(old_progress, new_progress, now, &mut events);

        if !self.state.is_blocked() && self.state.progress >= 100.0 {
            self.deliver(now, &mut events);
        }

        log::debug!(
            "click {button_id}: progress {old_progress:.2} -> {:.2}, resource {:.2}",
            self.state.progress,
            self.state.resource
        );
        self.commit(events)
    }

    /// Buy one level of an automation.
    pub fn buy_automation(&mut self, automation_id: &str) -> GameResult<Vec<GameEvent>> {
        if self.state.is_blocked() {
            return ignored("buy_automation", IgnoreReason::ModalActive { modal: self.state.events.active_modal });
        }
        let now = self.clock.now_ms();
        let Some(automation) = self.state.automations.iter_mut().find(|a| a.id == automation_id) else {
            return ignored(
                "buy_automation",
                IgnoreReason::UnknownAutomation { automation_id: automation_id.to_string() },
            );
        };
        let cost = automation.next_cost();
        if self.state.resource < cost {
            return ignored(
                "buy_automation",
                IgnoreReason::InsufficientResource { needed: cost, available: self.state.resource },
            );
        }

        automation.current_level += 1;
        let new_level = automation.current_level;
        let name = automation.name.clone();
        self.state.resource -= cost;

        self.display.push(
            now,
            LogKind::Command,
            format!("$ npm install {}@latest", ProjectGenerator::slug(&name)),
        );
        self.display.push(now, LogKind::Success, format!("✓ {name} upgraded to level {new_level}"));

        log::debug!("bought {automation_id} level {new_level} for {cost}");
        self.commit(vec![GameEvent::AutomationPurchased {
            automation_id: automation_id.to_string(),
            cost,
            new_level,
        }])
    }

    /// Complete the current project. Only a finished project outside a
    /// modal can be delivered. Clicks and modal resolution deliver on
    /// their own once progress saturates.
    pub fn deliver_app(&mut self) -> GameResult<Vec<GameEvent>> {
        if self.state.is_blocked() {
            return ignored("deliver_app", IgnoreReason::ModalActive { modal: self.state.events.active_modal });
        }
        if self.state.progress < 100.0 {
            return ignored("deliver_app", IgnoreReason::ProjectIncomplete { progress: self.state.progress });
        }
        let now = self.clock.now_ms();
        let mut events = Vec::new();
        self.deliver(now, &mut events);
        self.commit(events)
    }

    /// One click towards clearing the bugs modal.
    pub fn click_bugs_modal(&mut self) -> GameResult<Vec<GameEvent>> {
        let active = self.state.events.active_modal;
        if active != ActiveModal::Bugs {
            return ignored(
                "click_bugs_modal",
                IgnoreReason::NoMatchingModal { expected: ActiveModal::Bugs, actual: active },
            );
        }
        let now = self.clock.now_ms();
        let per_click = self.config.balance.fatigue.fatigue_per_click;
        self.state.fatigue.exert_blocked(per_click);

        let ev = &mut self.state.events;
        ev.bugs_clicks_progress += 1;
        let (progress, required) = (ev.bugs_clicks_progress, ev.bugs_clicks_required);
        let mut events = vec![GameEvent::BugsClickRegistered { progress, required }];

        if progress >= required {
            self.state.events.close_modal();
            events.push(GameEvent::BugsResolved { clicks: progress });
            self.display.push(now, LogKind::Success, "✓ Dependency conflicts resolved. Back to work!");
            self.deliver_if_saturated(now, &mut events);
        }
        self.commit(events)
    }

    /// Pay for a hardware repair tier and close the hardware modal.
    pub fn resolve_hardware(&mut self, tier: RepairTier) -> GameResult<Vec<GameEvent>> {
        let active = self.state.events.active_modal;
        if active != ActiveModal::Hardware {
            return ignored(
                "resolve_hardware",
                IgnoreReason::NoMatchingModal { expected: ActiveModal::Hardware, actual: active },
            );
        }
        let now = self.clock.now_ms();
        let outcome = repair::attempt(
            &self.config.balance.repair,
            tier,
            self.state.stability,
            self.state.economy.cash,
        );
        match outcome {
            None => ignored("resolve_hardware", IgnoreReason::UnknownRepairTier { tier }),
            Some(RepairOutcome::Unaffordable { cost, cash }) => {
                self.display.push(now, LogKind::Error, "Insufficient funds!");
                ignored("resolve_hardware", IgnoreReason::InsufficientCash { needed: cost, available: cash })
            }
            Some(RepairOutcome::Repaired { cost, cash, stability }) => {
                self.state.economy.cash = cash;
                self.state.stability = stability;
                self.state.events.close_modal();
                self.display.push(
                    now,
                    LogKind::Success,
                    format!("✓ {} complete (-${cost}). System stability: {stability}%", tier.label()),
                );
                let mut events = vec![GameEvent::HardwareRepaired { tier, cost, stability }];
                self.deliver_if_saturated(now, &mut events);
                self.commit(events)
            }
        }
    }

    /// Manual rest: next day, fatigue and sleep debt cleared.
    pub fn sleep(&mut self) -> GameResult<Vec<GameEvent>> {
        if self.state.is_blocked() {
            return ignored("sleep", IgnoreReason::ModalActive { modal: self.state.events.active_modal });
        }
        let now = self.clock.now_ms();
        let rollover = self.state.fatigue.sleep(self.config.balance.economy.rent_interval_days);
        let mut events = Vec::new();
        self.apply_rollover(rollover, now, &mut events);
        self.commit(events)
    }

    /// Start over from the configured defaults, discarding the saved game.
    pub fn reset_game(&mut self) -> GameResult<Vec<GameEvent>> {
        let now = self.clock.now_ms();
        if let Some(store) = &self.store {
            store.discard_snapshot(&self.slot)?;
        }
        self.state = fresh_state(&self.config, &mut self.narrative, now);
        self.display.clear();
        self.display.push(now, LogKind::Info, "🔄 Resetting game to initial state...");
        self.announce_session();

        log::info!("Game reset: {} '{}'", self.state.game_id, self.state.project_name);
        self.commit(vec![GameEvent::GameReset {
            game_id: self.state.game_id,
            project_name: self.state.project_name.clone(),
        }])
    }

    // ── Transitions ────────────────────────────────────────────

    /// Edge-triggered threshold check. At most one event per click;
    /// the first threshold wins when both are crossed at once.
    fn check_thresholds(&mut self, old: f64, new: f64, now: Millis, events: &mut Vec<GameEvent>) {
        let cfg = &self.config.balance.events;
        let flags = &mut self.state.events;
        let threshold = if !flags.triggered_first && old < cfg.first_threshold && new >= cfg.first_threshold {
            flags.triggered_first = true;
            cfg.first_threshold
        } else if !flags.triggered_second && old < cfg.second_threshold && new >= cfg.second_threshold {
            flags.triggered_second = true;
            cfg.second_threshold
        } else {
            return;
        };

        let drawn = random_event::select(self.rng.as_mut(), cfg);
        events.push(GameEvent::ThresholdReached { threshold, outcome: drawn.kind() });

        match drawn {
            RandomEvent::None => {
                self.display.push(
                    now,
                    LogKind::Success,
                    format!("✓ {threshold}% milestone reached. Build is stable."),
                );
            }
            RandomEvent::Bugs { clicks_required } => {
                let ev = &mut self.state.events;
                ev.active_modal = ActiveModal::Bugs;
                ev.bugs_clicks_required = clicks_required;
                ev.bugs_clicks_progress = 0;
                events.push(GameEvent::ModalOpened {
                    modal: ActiveModal::Bugs,
                    bugs_clicks_required: Some(clicks_required),
                });
                self.display.push(now, LogKind::Error, "⚠ DEPENDENCY CONFLICT: multiple conflicts in package.json");
                self.display.push(now, LogKind::Info, format!("Resolve {clicks_required} merge conflicts to continue."));
            }
            RandomEvent::Hardware => {
                self.state.events.active_modal = ActiveModal::Hardware;
                events.push(GameEvent::ModalOpened { modal: ActiveModal::Hardware, bugs_clicks_required: None });
                self.display.push(now, LogKind::Error, "⚠ HARDWARE FAILURE: critical system malfunction");
                self.display.push(
                    now,
                    LogKind::Info,
                    format!("Choose a repair option. System stability: {}%", self.state.stability),
                );
            }
        }
        log::debug!("threshold {threshold}% -> {:?}", drawn.kind());
    }

    /// A delivery deferred by a modal fires once the modal closes.
    fn deliver_if_saturated(&mut self, now: Millis, events: &mut Vec<GameEvent>) {
        if !self.state.is_blocked() && self.state.progress >= 100.0 {
            self.deliver(now, events);
        }
    }

    fn deliver(&mut self, now: Millis, events: &mut Vec<GameEvent>) {
        let market = self.state.economy.market_direction;
        let payment = economy::delivery_payment(&self.config.balance.economy, market, self.rng.as_mut());
        self.state.economy.receive(&payment);

        let completed_level = self.state.level;
        let delivered_name = self.state.project_name.clone();
        self.state.total_apps_delivered += 1;
        self.state.prestige_multiplier = formulas::prestige_multiplier(self.state.total_apps_delivered);
        self.state.progress = 0.0;
        self.state.level += 1;

        let next_project = ProjectGenerator::project_name(&mut self.narrative);
        let labels = ProjectGenerator::button_labels(&next_project);
        self.state.project_name = next_project.clone();
        self.state.relabel(&labels);
        self.state.events.clear_thresholds();

        let prestige = self.state.prestige_multiplier;
        let banner = [
            (LogKind::Output, String::new()),
            (LogKind::Success, "========================================".to_string()),
            (LogKind::Success, format!("🚀 APP DELIVERED: {delivered_name}")),
            (LogKind::Success, format!("Level {completed_level} Complete!")),
            (LogKind::Success, format!("Payment received: ${} (market {})", payment.amount, market.arrow())),
            (LogKind::Info, format!("Prestige Multiplier: {prestige:.2}x")),
            (LogKind::Success, "========================================".to_string()),
            (LogKind::Output, String::new()),
            (LogKind::Command, format!("$ cd /projects/{}", ProjectGenerator::slug(&next_project))),
            (LogKind::Info, format!("Starting new project: {next_project}")),
        ];
        for (kind, text) in banner {
            self.display.push(now, kind, text);
        }

        log::info!(
            "Delivered '{delivered_name}' (level {completed_level}) for ${} [{market:?}], prestige {prestige:.3}",
            payment.amount
        );
        events.push(GameEvent::AppDelivered {
            project_name: delivered_name,
            completed_level,
            payment: payment.amount,
            payment_multiplier: payment.multiplier,
            market,
            prestige_multiplier: prestige,
            next_project,
        });
    }

    fn apply_rollover(&mut self, rollover: DayRollover, now: Millis, events: &mut Vec<GameEvent>) {
        let max = self.state.fatigue.max_fatigue;
        if rollover.automatic {
            self.display.push(now, LogKind::Info, "💤 Exhausted. You passed out at the keyboard...");
        }
        self.display.push(
            now,
            LogKind::Info,
            format!("☀ Day {} begins (fatigue {}/{max})", rollover.day, rollover.starting_fatigue),
        );
        events.push(GameEvent::DayStarted {
            day: rollover.day,
            starting_fatigue: rollover.starting_fatigue,
            automatic: rollover.automatic,
        });

        if rollover.rent_due {
            let amount = self.state.economy.charge_rent(&self.config.balance.economy);
            let cash = self.state.economy.cash;
            self.display.push(now, LogKind::Error, format!("Rent due: -${amount} (cash ${cash})"));
            events.push(GameEvent::RentCharged { day: rollover.day, amount, cash });
        }
        log::info!("Day {} started (automatic={})", rollover.day, rollover.automatic);
    }

    // ── Persistence ────────────────────────────────────────────

    /// Save the snapshot and log events if anything changed.
    fn commit(&mut self, events: Vec<GameEvent>) -> GameResult<Vec<GameEvent>> {
        let mutated = events.iter().any(|e| !matches!(e, GameEvent::ActionIgnored { .. }));
        if mutated {
            self.save_snapshot()?;
        }
        if let Some(store) = &self.store {
            let now = self.clock.now_ms();
            for event in events.iter().filter(|e| e.is_logged()) {
                store.append_event(&EventLogEntry {
                    id:         None,
                    slot:       self.slot.clone(),
                    game_id:    self.state.game_id,
                    at_ms:      now,
                    event_type: event.type_name().to_string(),
                    payload:    serde_json::to_string(event)?,
                })?;
            }
        }
        Ok(events)
    }

    fn save_snapshot(&self) -> GameResult<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let snapshot = GameSnapshot::capture(&self.state, self.clock.now_ms());
        store.save_snapshot(
            &self.slot,
            self.state.game_id,
            snapshot.version,
            &snapshot.saved_at.to_rfc3339(),
            &snapshot.to_json()?,
        )?;
        Ok(())
    }
}

fn fresh_state(config: &GameConfig, narrative: &mut GameRng, now: Millis) -> SimulationState {
    let mut id_bytes = [0u8; 16];
    id_bytes[..8].copy_from_slice(&narrative.next_u64().to_le_bytes());
    id_bytes[8..].copy_from_slice(&narrative.next_u64().to_le_bytes());
    let game_id = uuid::Builder::from_random_bytes(id_bytes).into_uuid();

    let project_name = ProjectGenerator::project_name(narrative);
    let labels = ProjectGenerator::button_labels(&project_name);
    SimulationState::new(config, game_id, project_name, &labels, now)
}

fn ignored(action: &str, reason: IgnoreReason) -> GameResult<Vec<GameEvent>> {
    log::debug!("{action} ignored: {reason:?}");
    Ok(vec![GameEvent::ActionIgnored { action: action.to_string(), reason }])
}
