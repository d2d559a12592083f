//! Configuration errors. These abort whatever operation triggered them; problems with
//! user-supplied sets and teams are reported as plain strings instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse json '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to parse yaml '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Format #{index} must have a name with alphanumeric characters, not '{name}'")]
    MissingFormatName { index: usize, name: String },
    #[error("Format #{index} has a duplicate ID: '{id}'")]
    DuplicateFormat { index: usize, id: String },
    #[error("Format \"{format}\" requires nonexistent mod: '{mod_id}'")]
    UnknownMod { format: String, mod_id: String },
    #[error("Mod '{mod_id}' inherits from nonexistent mod '{parent}'")]
    UnknownParentMod { mod_id: String, parent: String },

    #[error("We don't currently support bans in generated teams")]
    BansInGeneratedTeam,
    #[error("More than one thing matches \"{0}\"; please use something like \"-item:metronome\" to disambiguate")]
    AmbiguousBan(String),
    #[error("Nothing matches \"{0}\"")]
    NothingMatches(String),
    #[error("Unrecognized rule \"{0}\"")]
    UnknownRule(String),
    #[error("Confusing rule {0}")]
    ConfusingRule(String),

    #[error("Excessive rule table recursion in {format}: {rule}")]
    ExcessiveRecursion { format: String, rule: String },
    #[error("Cyclic format reference: {0}")]
    CyclicReference(String),
    #[error("\"{format}\" has conflicting legality checks from \"{first}\" and \"{second}\"")]
    ConflictingLegalityCheck {
        format: String,
        first: String,
        second: String,
    },
    #[error("No legality check is registered under '{0}'")]
    UnknownLegalityCheck(String),

    #[error("Unrecognized format \"{0}\"")]
    UnknownFormat(String),
    #[error("The format already has your custom rules")]
    RedundantCustomRules,
}

pub type Result<T> = std::result::Result<T, Error>;
