//! Repertoire Distance CLI
//!
//! - measure: distance between two repertoires of one mechanism
//! - big: distance between two whole-system repertoires
//! - warm: precompute Hamming cost matrices into the on-disk cache
//!
//! Repertoires are JSON arrays, either flat in state order or nested one axis per node.

use clap::Parser;
use ::repertoire::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Query {
    #[command(
        about = "Distance between two repertoires of a single mechanism",
        alias = "small"
    )]
    Measure {
        #[command(flatten)]
        settings: Settings,
        #[arg(long, short, default_value = "past")]
        direction: String,
        #[arg(required = true)]
        d1: String,
        #[arg(required = true)]
        d2: String,
    },
    #[command(
        about = "Distance between two whole-system repertoires",
        alias = "system"
    )]
    Big {
        #[command(flatten)]
        settings: Settings,
        #[arg(required = true)]
        r1: String,
        #[arg(required = true)]
        r2: String,
    },
    #[command(about = "Precompute Hamming cost matrices into the disk cache")]
    Warm {
        #[arg(required = true)]
        nodes: Vec<usize>,
    },
}

/// overrides layered on top of the environment, or a config file
#[derive(clap::Args)]
struct Settings {
    #[arg(long, short)]
    measure: Option<String>,
    #[arg(long, short)]
    precision: Option<usize>,
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,
}

impl Settings {
    fn resolve(self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path)?,
            None => Config::from_env()?,
        };
        if let Some(measure) = self.measure {
            config.measure = measure;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    log();
    let ref hamming = Hamming::persistent();
    match Query::parse() {
        Query::Measure {
            settings,
            direction,
            d1,
            d2,
        } => {
            let ref config = settings.resolve()?;
            let direction = Direction::try_from(direction.as_str())?;
            let ref d1 = Repertoire::try_from(d1.as_str())?;
            let ref d2 = Repertoire::try_from(d2.as_str())?;
            log::info!("{:<32}{:<16}{}", "measuring", direction, config);
            let distance = small_phi_measure(direction, d1, d2, config, hamming)?;
            println!("{}", distance);
        }
        Query::Big { settings, r1, r2 } => {
            let ref config = settings.resolve()?;
            let ref r1 = Repertoire::try_from(r1.as_str())?;
            let ref r2 = Repertoire::try_from(r2.as_str())?;
            log::info!("{:<32}{:<16}{}", "measuring", "system", config);
            let distance = big_phi_measure(r1, r2, config, hamming)?;
            println!("{}", distance);
        }
        Query::Warm { nodes } => {
            for n in nodes {
                hamming.warm(n)?;
            }
        }
    }
    Ok(())
}
