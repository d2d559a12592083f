//! Move-combination analysis: Baton Pass boost passing and generation 2 sleep trapping.

use crate::data::items::Item;
use crate::data::moves::Move;
use crate::id::to_id;

const SPEED_BOOST_ABILITIES: &[&str] = &["motordrive", "rattled", "speedboost", "steadfast", "weakarmor"];
const SPEED_BOOST_ITEMS: &[&str] = &["blazikenite", "eeviumz", "kommoniumz", "salacberry"];
const NON_SPEED_BOOST_ABILITIES: &[&str] = &[
    "angerpoint", "competitive", "defiant", "download", "justified", "lightningrod", "moxie",
    "sapsipper", "stormdrain",
];
const NON_SPEED_BOOST_ITEMS: &[&str] = &[
    "absorbbulb", "apicotberry", "cellbattery", "eeviumz", "ganlonberry", "keeberry",
    "kommoniumz", "liechiberry", "luminousmoss", "marangaberry", "petayaberry", "snowball",
    "starfberry", "weaknesspolicy",
];
const NON_SPEED_BOOST_MOVES: &[&str] = &[
    "acupressure", "bellydrum", "chargebeam", "curse", "diamondstorm", "fellstinger",
    "fierydance", "flowershield", "poweruppunch", "rage", "rototiller", "skullbash", "stockpile",
];

const SLEEP_MOVES: &[&str] = &["hypnosis", "lovelykiss", "sing", "sleeppowder", "spore"];
const TRAP_MOVES: &[&str] = &["meanlook", "spiderweb"];

/// Where a set's boost of one kind comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BoostSource {
    None,
    /// A move, ability or item that boosts every time.
    Passive,
    /// The one-shot boost of the named move used as a Z-Move.
    ZMove(String),
}

/// Whether a Baton Passer can pass both a Speed boost and a boost to another stat.
/// Two boosts that come from two different Z-Moves don't count, since only one Z-Move
/// can be used per battle.
pub fn passes_speed_and_other_boost(ability: &str, item: Option<&Item>, moves: &[&Move]) -> bool {
    let mut speed = BoostSource::None;
    let mut other = BoostSource::None;

    for mv in moves {
        let id = mv.id();
        if id.as_str() == "flamecharge" || mv.raises_speed() {
            speed = BoostSource::Passive;
        }
        if NON_SPEED_BOOST_MOVES.contains(&id.as_str()) || mv.raises_other_stat() {
            other = BoostSource::Passive;
        }

        let z_powered = item
            .and_then(|item| item.z_move_type.as_deref())
            .is_some_and(|ty| ty == mv.move_type);
        if let (true, Some(z_boost)) = (z_powered, mv.z_move_boost) {
            if z_boost.raises_speed() && speed == BoostSource::None {
                speed = BoostSource::ZMove(mv.name.clone());
            }
            if z_boost.raises_other_stat()
                && (other == BoostSource::None || speed == BoostSource::ZMove(mv.name.clone()))
            {
                other = BoostSource::ZMove(mv.name.clone());
            }
        }
    }

    let ability = to_id(ability);
    let item = item.map(|item| item.id().to_string()).unwrap_or_default();

    if SPEED_BOOST_ABILITIES.contains(&ability.as_str()) || SPEED_BOOST_ITEMS.contains(&item.as_str()) {
        speed = BoostSource::Passive;
    }
    if speed == BoostSource::None {
        return false;
    }
    if NON_SPEED_BOOST_ABILITIES.contains(&ability.as_str())
        || NON_SPEED_BOOST_ITEMS.contains(&item.as_str())
    {
        other = BoostSource::Passive;
    }
    if other == BoostSource::None {
        return false;
    }

    !matches!((&speed, &other), (BoostSource::ZMove(a), BoostSource::ZMove(b)) if a != b)
}

/// A sleep move alongside a trapping move.
pub fn has_sleep_trap(moves: &[&Move]) -> bool {
    let mut sleep = false;
    let mut trap = false;
    for mv in moves {
        let id = mv.id();
        if SLEEP_MOVES.contains(&id.as_str()) {
            sleep = true;
        } else if TRAP_MOVES.contains(&id.as_str()) {
            trap = true;
        }
    }
    sleep && trap
}
