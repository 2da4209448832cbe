use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "torus-snake", version, about = "Snake on a wrap-around grid, in your terminal")]
pub struct Args {
    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,

    /// Don't ring the terminal bell for sounds.
    #[arg(long)]
    pub mute: bool,

    /// Seed for item placement.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["torus-snake"]).unwrap();
        assert!(args.log_file.is_none());
        assert_eq!(args.log_level, "info");
        assert!(!args.mute);
        assert!(args.seed.is_none());
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "torus-snake",
            "--log-file",
            "snake.log",
            "--log-level",
            "debug",
            "--mute",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("snake.log")));
        assert_eq!(args.log_level, "debug");
        assert!(args.mute);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn seed_makes_the_rng_repeatable() {
        let args = Args::try_parse_from(["torus-snake", "--seed", "7"]).unwrap();
        let (mut a, mut b) = (args.rng(), args.rng());
        let first: Vec<i32> = (0..8).map(|_| a.gen_range(0..20)).collect();
        let second: Vec<i32> = (0..8).map(|_| b.gen_range(0..20)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_a_bad_seed() {
        assert!(Args::try_parse_from(["torus-snake", "--seed", "soon"]).is_err());
    }
}
