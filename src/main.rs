use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sysmon::report;
use sysmon::sampler::Sampler;

/// Terminal monitor for host cpu, memory, swap, disk, temperature and uptime.
#[derive(Parser, Debug)]
#[command(name = "sysmon", version, about)]
struct Cli {
    /// Seconds between samples
    #[arg(short, long, default_value_t = 2, env = "SYSMON_INTERVAL")]
    interval: u64,
}

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn request_shutdown(_signal: libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

fn install_signal_handlers() {
    let handler = request_shutdown as extern "C" fn(libc::c_int);
    // SAFETY: the handler only stores into an atomic, which is
    // async-signal-safe
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        libc::signal(libc::SIGTERM, handler as libc::sighandler_t);
    }
}

/// Sleeps in short slices so a shutdown request interrupts the wait instead
/// of the loop dying mid-cycle.
fn interruptible_sleep(duration: Duration) {
    const SLICE: Duration = Duration::from_millis(100);

    let mut remaining = duration;
    while !SHUTDOWN.load(Ordering::SeqCst) && remaining > Duration::from_secs(0) {
        let step = remaining.min(SLICE);
        thread::sleep(step);
        remaining -= step;
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    install_signal_handlers();

    println!("Starting System Monitor...");
    println!("Press Ctrl+C to exit");
    thread::sleep(Duration::from_secs(1));

    let mut sampler = Sampler::new();
    let interval = Duration::from_secs(cli.interval);

    while !SHUTDOWN.load(Ordering::SeqCst) {
        let snapshot = sampler.sample();
        if let Err(err) = report::render(&snapshot) {
            tracing::warn!("failed to render snapshot: {}", err);
        }

        interruptible_sleep(interval);
    }
}
