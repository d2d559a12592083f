#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use teamcheck::data::Catalog;
use teamcheck::rules::RuleResolver;
use teamcheck::team::{PokemonSet, Team};
use teamcheck::validate::Validator;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn catalog() -> Arc<Catalog> {
    Catalog::load(data_dir()).expect("sample data should load")
}

pub fn resolver() -> RuleResolver {
    RuleResolver::from_catalog(&catalog())
}

pub fn validator() -> Validator {
    Validator::from_catalog(&catalog())
}

pub fn set(value: serde_json::Value) -> PokemonSet {
    serde_json::from_value(value).expect("set json")
}

pub fn team(sets: Vec<serde_json::Value>) -> Team {
    Team::new(sets.into_iter().map(set).collect())
}

pub fn count(problems: &[String], needle: &str) -> usize {
    problems.iter().filter(|problem| problem.contains(needle)).count()
}
