//! Host configuration from environment variables.

use settlers_core::PlayerColor;
use thiserror::Error;

pub const DEFAULT_PLAYERS: &str = "Player1:red,Player2:blue";
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least two players are needed, got {0}")]
    NotEnoughPlayers(usize),

    #[error("Too many players: {0}")]
    TooManyPlayers(usize),

    #[error("Empty player name in {0:?}")]
    EmptyName(String),

    #[error("Unknown color {0:?}")]
    UnknownColor(String),

    #[error("Invalid seed {0:?}")]
    InvalidSeed(String),

    #[error("Invalid frame rate {0:?}")]
    InvalidFps(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Names and colors in registration order
    pub players: Vec<(String, PlayerColor)>,
    /// Fixed seed for a reproducible game
    pub seed: Option<u64>,
    /// Frames per second of the input/render loop
    pub fps: u32,
}

impl HostConfig {
    /// Read `SETTLERS_PLAYERS`, `SETTLERS_SEED` and `SETTLERS_FPS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("SETTLERS_PLAYERS").ok(),
            std::env::var("SETTLERS_SEED").ok(),
            std::env::var("SETTLERS_FPS").ok(),
        )
    }

    pub fn from_vars(
        players: Option<String>,
        seed: Option<String>,
        fps: Option<String>,
    ) -> Result<Self, ConfigError> {
        let players = parse_players(players.as_deref().unwrap_or(DEFAULT_PLAYERS))?;

        let seed = seed
            .map(|s| s.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSeed(s)))
            .transpose()?;

        let fps = match fps {
            Some(s) => match s.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidFps(s)),
            },
            None => DEFAULT_FPS,
        };

        Ok(Self { players, seed, fps })
    }

    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn colors(&self) -> Vec<PlayerColor> {
        self.players.iter().map(|(_, color)| *color).collect()
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            players: vec![
                ("Player1".to_string(), PlayerColor::Red),
                ("Player2".to_string(), PlayerColor::Blue),
            ],
            seed: None,
            fps: DEFAULT_FPS,
        }
    }
}

/// Parse `name[:color],...`. A missing color falls back to the seat color.
fn parse_players(list: &str) -> Result<Vec<(String, PlayerColor)>, ConfigError> {
    let mut players = Vec::new();

    for (seat, entry) in list.split(',').map(str::trim).filter(|e| !e.is_empty()).enumerate() {
        let (name, color) = match entry.split_once(':') {
            Some((name, color)) => {
                let color = PlayerColor::from_name(color.trim())
                    .ok_or_else(|| ConfigError::UnknownColor(color.trim().to_string()))?;
                (name.trim(), color)
            }
            None => (entry, PlayerColor::for_player(seat as u8)),
        };

        if name.is_empty() {
            return Err(ConfigError::EmptyName(entry.to_string()));
        }
        players.push((name.to_string(), color));
    }

    if players.len() < 2 {
        return Err(ConfigError::NotEnoughPlayers(players.len()));
    }
    if players.len() > u8::MAX as usize {
        return Err(ConfigError::TooManyPlayers(players.len()));
    }
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::from_vars(None, None, None).unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.names(), vec!["Player1", "Player2"]);
    }

    #[test]
    fn test_players_with_and_without_colors() {
        let config = HostConfig::from_vars(Some("Ann:orange, Ben , Cy:WHITE".into()), None, None).unwrap();
        assert_eq!(
            config.players,
            vec![
                ("Ann".to_string(), PlayerColor::Orange),
                ("Ben".to_string(), PlayerColor::Blue),
                ("Cy".to_string(), PlayerColor::White),
            ]
        );
    }

    #[test]
    fn test_bad_players() {
        assert_eq!(
            HostConfig::from_vars(Some("Solo:red".into()), None, None),
            Err(ConfigError::NotEnoughPlayers(1))
        );
        assert_eq!(
            HostConfig::from_vars(Some("A:red,B:teal".into()), None, None),
            Err(ConfigError::UnknownColor("teal".into()))
        );
        assert_eq!(
            HostConfig::from_vars(Some("A:red,:blue".into()), None, None),
            Err(ConfigError::EmptyName(":blue".into()))
        );
    }

    #[test]
    fn test_seed_and_fps() {
        let config = HostConfig::from_vars(None, Some("42".into()), Some("30".into())).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.fps, 30);

        assert_eq!(
            HostConfig::from_vars(None, Some("abc".into()), None),
            Err(ConfigError::InvalidSeed("abc".into()))
        );
        assert_eq!(
            HostConfig::from_vars(None, None, Some("0".into())),
            Err(ConfigError::InvalidFps("0".into()))
        );
    }
}
