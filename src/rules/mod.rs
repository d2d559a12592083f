//! Rule parsing and resolution.
//!
//! A format's ruleset, banlist, unbanlist and custom rules are parsed into
//! [RuleSpec]s and flattened, through every referenced sub-format, into a [RuleTable].

mod ban;
mod parser;
mod resolver;
mod table;

pub use ban::{Ban, BanLimit, BanTarget, ComplexBan, SetFeatures};
pub use parser::{RuleParser, RuleSpec, VALID_TAGS};
pub use resolver::{RuleResolver, MAX_RULE_DEPTH};
pub use table::{LegalityCheckRef, RuleTable};
