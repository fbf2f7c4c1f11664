use std::fmt;

#[derive(Debug)]
pub enum RosterError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Table validation error (empty table, dangling reference, etc.).
    TableValidation(String),
    /// An abbreviation or alias points at a team not in the canonical table.
    UnknownTarget { kind: &'static str, key: String, target: String },
    /// Two aliases collide case-insensitively.
    DuplicateAlias(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "roster parse error: {msg}"),
            Self::TableValidation(msg) => write!(f, "roster validation error: {msg}"),
            Self::UnknownTarget { kind, key, target } => {
                write!(f, "{kind} '{key}' targets unknown team '{target}'")
            }
            Self::DuplicateAlias(alias) => {
                write!(f, "alias '{alias}' collides with another alias (case-insensitive)")
            }
        }
    }
}

impl std::error::Error for RosterError {}
