//! Distances between repertoires: probability distributions over the joint
//! states of a set of binary variables.
//!
//! ## Layers
//!
//! - [`hamming`]: Hamming cost matrices, tiered between an in-process table and a persistent [`hamming::Store`]
//! - [`transport`]: exact optimal transport over a dense cost matrix
//! - [`measures`]: primitive distances and divergences
//! - [`dispatch`]: measure registry, directions, configuration and the phi entry points
pub mod dispatch;
pub mod hamming;
pub mod measures;
pub mod repertoire;
pub mod transport;

pub use dispatch::*;
pub use hamming::*;
pub use measures::*;
pub use repertoire::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Probability mass of a single joint state.
pub type Probability = f64;
/// Distances, transport costs, divergences.
pub type Energy = f64;
/// Information-theoretic quantities.
pub type Entropy = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// COST MATRIX CACHE
// ============================================================================
/// Cost matrices for fewer nodes than this are held in the process-wide table.
/// The rest go through the persistent store.
pub const PRECOMPUTED_HAMMING_MATRICES: usize = 10;
/// Environment variable naming the directory of the on-disk matrix cache.
pub const CACHE_DIR_ENV: &str = "REPERTOIRE_CACHE_DIR";
/// Fallback directory of the on-disk matrix cache.
pub const CACHE_DIR_DEFAULT: &str = "cache";

// ============================================================================
// CONFIGURATION DEFAULTS
// ============================================================================
/// Number of decimal digits distances are rounded to.
pub const PRECISION: usize = 6;
/// Environment variable overriding the configured measure.
pub const MEASURE_ENV: &str = "REPERTOIRE_MEASURE";
/// Environment variable overriding the configured precision.
pub const PRECISION_ENV: &str = "REPERTOIRE_PRECISION";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
