use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::sprite::SpriteSyntaxError;

#[derive(Debug)]
pub enum GameError {
    AssetLoad { path: PathBuf, reason: String },
    SpriteSyntax { path: PathBuf, source: SpriteSyntaxError },
    ConfigRead { path: PathBuf, source: io::Error },
    ConfigParse { path: PathBuf, source: serde_json::Error },
    InvalidEnemyVariant { index: u8 },
    PlayAreaTooSmall { width: i32, height: i32, min_width: i32 },
    Terminal(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { path, reason } => {
                write!(f, "failed to load asset {}: {reason}", path.display())
            }
            Self::SpriteSyntax { path, source } => {
                write!(f, "bad sprite {}: {source}", path.display())
            }
            Self::ConfigRead { path, source } => {
                write!(f, "cannot read settings {}: {source}", path.display())
            }
            Self::ConfigParse { path, source } => {
                write!(f, "invalid settings {}: {source}", path.display())
            }
            Self::InvalidEnemyVariant { index } => {
                write!(f, "enemy variant index out of range: {index} (allowed 1..=5)")
            }
            Self::PlayAreaTooSmall {
                width,
                height,
                min_width,
            } => write!(
                f,
                "play area {width}x{height} too small: need a width of at least {min_width}"
            ),
            Self::Terminal(err) => write!(f, "terminal error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SpriteSyntax { source, .. } => Some(source),
            Self::ConfigRead { source, .. } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::Terminal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        Self::Terminal(err)
    }
}
