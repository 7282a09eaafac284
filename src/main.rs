//! DeskPet: headless host.
//!
//! Wires the pet core to file storage, the system clock and log output,
//! and drives it from the tick scheduler.  Pointer input comes from a
//! scripted tour of the screen; a GUI host replaces the pointer source,
//! event sink and notifier with toolkit-backed adapters.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ScriptedPointer   LogEventSink   JsonStore      SystemClock   │
//! │  (PointerSource)   (EventSink)    (Document+Cfg) (Clock)       │
//! │  LogNotifier                                                   │
//! │  (Notifier)                                                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Motion · FSM · Reminders · Countdown                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven)                                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use deskpet::adapters::json_store::JsonStore;
use deskpet::adapters::log_sink::LogEventSink;
use deskpet::adapters::memory::MemoryStore;
use deskpet::adapters::notifier::LogNotifier;
use deskpet::adapters::pointer::ScriptedPointer;
use deskpet::adapters::time::SystemClock;
use deskpet::app::commands::AppCommand;
use deskpet::app::ports::{
    Clock, ConfigPort, DocumentStore, PointerSource, ScheduleFiredKind, SchedulerDelegate,
    TickKind,
};
use deskpet::app::service::AppService;
use deskpet::config::{self, PetConfig};
use deskpet::geometry::Point;
use deskpet::scheduler::Scheduler;

/// Granularity of the host loop.  Finer than the fastest schedule.
const LOOP_SLEEP_MS: u64 = 10;

/// Headless desktop pet
#[derive(Parser)]
#[command(name = "deskpet")]
#[command(version)]
#[command(about = "Cursor-following desktop pet core, driven headless", long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.desktop_pet)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Stop after this many seconds (runs until killed otherwise)
    #[arg(long)]
    run_secs: Option<u64>,

    /// Screen size for the scripted pointer tour
    #[arg(long, default_value_t = 1920.0)]
    screen_width: f64,

    #[arg(long, default_value_t = 1080.0)]
    screen_height: f64,

    /// Start a countdown at launch (minutes; the configured default if omitted)
    #[arg(long, num_args = 0..=1)]
    countdown: Option<Option<u32>>,
}

// ── Scheduler delegate ────────────────────────────────────────
//
// Bridges the scheduler (which knows nothing about the service) to the
// AppService tick methods and the adapters they need.

struct HostLoop<'a, S: DocumentStore, P: PointerSource> {
    app: &'a mut AppService,
    store: &'a S,
    pointer: P,
    clock: &'a SystemClock,
    sink: LogEventSink,
    notifier: LogNotifier,
}

impl<S: DocumentStore, P: PointerSource> SchedulerDelegate for HostLoop<'_, S, P> {
    fn on_schedule_fired(&mut self, tick: TickKind, kind: ScheduleFiredKind) {
        if kind == ScheduleFiredKind::OneShot {
            debug!("One-shot {:?} fired", tick);
        }
        match tick {
            TickKind::Motion => self.app.motion_tick(&mut self.sink),
            TickKind::PointerPoll => {
                if let Some(p) = self.pointer.sample() {
                    self.app.pointer_sample(p, &mut self.sink);
                }
            }
            TickKind::ReminderCheck => {
                let fired = self.app.reminder_tick(
                    self.clock.now(),
                    &mut self.notifier,
                    self.store,
                    &mut self.sink,
                );
                if kind == ScheduleFiredKind::OneShot && fired > 0 {
                    info!("{} reminder(s) fell due while DeskPet was not running", fired);
                }
            }
            TickKind::Countdown => self.app.countdown_tick(&mut self.notifier, &mut self.sink),
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("DeskPet v{}", env!("CARGO_PKG_VERSION"));

    if cli.ephemeral {
        info!("Ephemeral session: nothing will be written to disk");
        run(&cli, &MemoryStore::new())
    } else {
        let dir = cli.data_dir.clone().unwrap_or_else(config::default_data_dir);
        info!("Data directory: {}", dir.display());
        run(&cli, &JsonStore::new(dir))
    }
}

fn run<S: DocumentStore + ConfigPort>(cli: &Cli, store: &S) -> Result<()> {
    // ── 1. Load config (or defaults) ──────────────────────────
    let config = match ConfigPort::load(store) {
        Ok(c) => c,
        Err(e) => {
            warn!("Settings unusable ({}), running with defaults", e);
            PetConfig::default()
        }
    };

    // ── 2. Load document and build the service ────────────────
    let doc = DocumentStore::load(store);
    let start = Point::new(cli.screen_width / 2.0, cli.screen_height / 2.0);
    let mut scheduler = Scheduler::for_pet(&config);
    let mut app = AppService::new(config, doc, start).context("invalid configuration")?;

    let clock = SystemClock::new();
    let mut host = HostLoop {
        app: &mut app,
        store,
        pointer: ScriptedPointer::screen_tour(cli.screen_width, cli.screen_height, 80.0),
        clock: &clock,
        sink: LogEventSink::new(),
        notifier: LogNotifier::new(),
    };
    host.app.start(&mut host.sink);

    if let Some(minutes) = cli.countdown {
        host.app
            .handle_command(
                AppCommand::StartCountdown { minutes },
                clock.now(),
                store,
                &mut host.sink,
            )
            .context("cannot start countdown")?;
    }

    // ── 3. Tick loop ──────────────────────────────────────────
    let deadline_ms = cli.run_secs.map(|s| s.saturating_mul(1000));
    let mut last_ms = clock.uptime_ms();
    loop {
        thread::sleep(Duration::from_millis(LOOP_SLEEP_MS));
        let now_ms = clock.uptime_ms();
        scheduler.tick(now_ms - last_ms, &mut host);
        last_ms = now_ms;

        if host.app.take_timing_change() {
            scheduler.retime(&host.app.current_config());
        }

        if deadline_ms.is_some_and(|d| now_ms >= d) {
            break;
        }
    }

    // ── 4. Shutdown ───────────────────────────────────────────
    scheduler.set_enabled(false);
    let notified = host.notifier.sent();
    let mut sink = host.sink;
    app.save_if_dirty(store, &mut sink);
    info!(
        "Stopped after {} motion ticks, {} notifications, final state {:?}",
        app.motion_ticks(),
        notified,
        app.state()
    );
    Ok(())
}
