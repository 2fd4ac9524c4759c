//! MirrorFS CLI - mount a passthrough view of a directory.
//!
//! This binary resolves logging and mount configuration from the
//! environment and command line, then hands the supervised run to the
//! mirrorfs library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mirrorfs::app::{AppConfig, AppError, MirrorFsApp};
use mirrorfs::config::MountConfig;
use mirrorfs::logging::{self, LogLevel};
use mirrorfs::profiling::ProfilingConfig;

// Heap snapshots dump the process allocator's profile; jemalloc must be
// the global allocator for prof.dump to have anything to write.
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Expose a directory tree through a passthrough FUSE mount.
#[derive(Parser, Debug)]
#[command(name = "mirrorfs", author, version)]
#[command(about = "Expose a directory tree through a passthrough FUSE mount")]
struct Cli {
    /// Where the mounted view becomes visible
    #[arg(value_name = "MOUNTPOINT")]
    mountpoint: PathBuf,

    /// Directory to expose
    #[arg(value_name = "ORIGINAL")]
    original: PathBuf,

    /// Mount with allow_other and kernel-side permission checks
    #[arg(long)]
    allow_other: bool,

    /// Mount read-only
    #[arg(short = 'r', long)]
    read_only: bool,

    /// Call the mount syscall instead of the fusermount helper
    #[arg(long)]
    direct_mount: bool,

    /// Like --direct-mount, but do not fall back to the helper
    #[arg(long, requires = "direct_mount")]
    direct_mount_strict: bool,

    /// Log every filesystem request
    #[arg(long)]
    debug: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Write a CPU profile (pprof format) to this file
    #[arg(long, value_name = "FILE")]
    cpuprofile: Option<PathBuf>,

    /// Also render the CPU profile as a flamegraph SVG
    #[arg(long, value_name = "FILE", requires = "cpuprofile")]
    flamegraph: Option<PathBuf>,

    /// Write heap snapshots to <PREFIX>-<N>.heap on SIGUSR1
    ///
    /// Heap profiling must be activated in the allocator, e.g. by
    /// starting the process with MALLOC_CONF=prof:true.
    #[arg(long, value_name = "PREFIX")]
    memprofile: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging state must exist before any component logs.
    let level = if cli.debug {
        LogLevel::Debug
    } else {
        logging::resolve()
    };
    logging::init(level);

    if let Err(e) = run(cli) {
        eprintln!("mirrorfs: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mount = MountConfig::new(&cli.original, &cli.mountpoint)
        .with_allow_other(cli.allow_other)
        .with_read_only(cli.read_only)
        .with_direct_mount(cli.direct_mount, cli.direct_mount_strict)
        .with_debug(cli.debug);

    let profiling = ProfilingConfig {
        cpu_profile: cli.cpuprofile.clone(),
        flamegraph: cli.flamegraph.clone(),
        heap_snapshot_prefix: cli.memprofile.clone(),
    };

    if !cli.quiet {
        print_banner(&cli, &profiling);
    }

    MirrorFsApp::new(AppConfig::new(mount).with_profiling(profiling)).run()?;

    if !cli.quiet {
        println!();
        println!("Filesystem unmounted.");
    }
    Ok(())
}

fn print_banner(cli: &Cli, profiling: &ProfilingConfig) {
    println!("MirrorFS v{}", mirrorfs::VERSION);
    println!();
    println!("Original:   {}", cli.original.display());
    println!("Mountpoint: {}", cli.mountpoint.display());
    println!();
    if let Some(path) = &profiling.cpu_profile {
        println!("Writing CPU profile to {}", path.display());
    }
    if profiling.heap_snapshot_prefix.is_some() {
        println!(
            "Send SIGUSR1 to {} to write a heap snapshot",
            std::process::id()
        );
    }
    if profiling.any_enabled() {
        println!("Note: unmount gracefully, otherwise the profile file(s) will stay empty");
        println!();
    }
    println!("Press Ctrl+C to unmount and exit");
    println!();
}
