//! Demo runner configuration: environment first, command line flags on top.

use std::env;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub width: usize,
    pub height: usize,
    pub colors: u8,
    pub seed: Option<u32>,
    pub moves: u32,
    pub json: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            colors: 5,
            seed: None,
            moves: 10,
            json: false,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            width: env_parse("MATCH3_WIDTH").unwrap_or(defaults.width),
            height: env_parse("MATCH3_HEIGHT").unwrap_or(defaults.height),
            colors: env_parse("MATCH3_COLORS").unwrap_or(defaults.colors),
            seed: env_parse("MATCH3_SEED"),
            moves: env_parse("MATCH3_MOVES").unwrap_or(defaults.moves),
            json: false,
        }
    }

    /// Apply `--width N --height N --colors N --seed N --moves N --json` over `self`
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        fn value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
            let v = args
                .get(i)
                .ok_or_else(|| anyhow!("missing value for {}", flag))?;
            v.parse::<T>()
                .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
        }

        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--width" => {
                    i += 1;
                    self.width = value(args, i, "--width")?;
                }
                "--height" => {
                    i += 1;
                    self.height = value(args, i, "--height")?;
                }
                "--colors" => {
                    i += 1;
                    self.colors = value(args, i, "--colors")?;
                }
                "--seed" => {
                    i += 1;
                    self.seed = Some(value(args, i, "--seed")?);
                }
                "--moves" => {
                    i += 1;
                    self.moves = value(args, i, "--moves")?;
                }
                "--json" => self.json = true,
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }

        if self.width == 0 || self.height == 0 {
            return Err(anyhow!("board must be at least 1x1"));
        }
        Ok(self)
    }
}
