use std::env;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::domain::rules::{DEFAULT_STARTING_LIVES, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::AppError;

pub const DEFAULT_MAX_PLAYERS: usize = 10;

/// Table rules read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Lives each player starts with (`KUNG_STARTING_LIVES`, default 3).
    pub starting_lives: u8,
    /// Seats per session (`KUNG_MAX_PLAYERS`, default 10).
    pub max_players: usize,
    /// Fixed base seed for every session (`KUNG_SHUFFLE_SEED`). When unset each
    /// session draws its own seed from OS entropy.
    pub shuffle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: DEFAULT_STARTING_LIVES,
            max_players: DEFAULT_MAX_PLAYERS,
            shuffle_seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let starting_lives =
            parse_var(&lookup, "KUNG_STARTING_LIVES")?.unwrap_or(defaults.starting_lives);
        if starting_lives == 0 {
            return Err(AppError::config("KUNG_STARTING_LIVES must be at least 1"));
        }

        let max_players = parse_var(&lookup, "KUNG_MAX_PLAYERS")?.unwrap_or(defaults.max_players);
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&max_players) {
            return Err(AppError::config(format!(
                "KUNG_MAX_PLAYERS must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {max_players}"
            )));
        }

        let shuffle_seed = parse_var(&lookup, "KUNG_SHUFFLE_SEED")?;

        Ok(Self {
            starting_lives,
            max_players,
            shuffle_seed,
        })
    }

    /// Base seed for a new session.
    pub fn session_seed(&self) -> Result<u64, AppError> {
        match self.shuffle_seed {
            Some(seed) => Ok(seed),
            None => OsRng
                .try_next_u64()
                .map_err(|e| AppError::internal(format!("OS entropy unavailable: {e}"))),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|e| AppError::config(format!("{key}={trimmed:?} is invalid: {e}")))
}
