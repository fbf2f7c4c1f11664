use std::fmt;

use courtsync_roster::RosterError;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad tolerance, unmapped attribute, etc.).
    ConfigValidation(String),
    /// The `[roster]` section names a league without builtin tables.
    UnknownLeague(String),
    /// Roster table construction failed.
    Roster(RosterError),
    /// Missing required column in a source's CSV header.
    MissingColumn { source: String, column: String },
    /// IO error (file read, etc.) surfaced by a caller.
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownLeague(league) => write!(f, "unknown builtin league: '{league}'"),
            Self::Roster(err) => write!(f, "roster error: {err}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<RosterError> for ReconError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}
