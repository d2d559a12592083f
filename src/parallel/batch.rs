//! Batch team validation across a worker pool.

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::parallel::pool::WorkerPool;
use crate::team::Team;
use crate::validate::Validator;

/// Validate every team, in parallel, returning each team's problems in input order.
/// `format` overrides the format each team names. The first configuration error aborts
/// the batch.
pub fn validate_teams(
    validator: &Validator,
    teams: &[Team],
    format: Option<&str>,
    pool: &WorkerPool,
) -> Result<Vec<Vec<String>>> {
    debug!(teams = teams.len(), workers = pool.workers, "validating team batch");
    pool.install(|| {
        teams
            .par_iter()
            .map(|team| validator.validate_team(team, format))
            .collect()
    })
}
