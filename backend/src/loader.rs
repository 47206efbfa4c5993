//! Loads the CSV sources into the tables, one committed batch per entity.
//!
//! Entities are loaded strictly in [`Entity::LOAD_ORDER`]. The first failure
//! stops the run; entities committed before it stay in the database.

use std::path::{Path, PathBuf};

use ingest::Entity;

use crate::target::BatchTarget;

/// The sources to load, in the order they are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    pub sources: Vec<(Entity, PathBuf)>,
}

impl LoadPlan {
    /// `teams.csv`, `agents.csv`, ... all from `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            sources: Entity::LOAD_ORDER
                .into_iter()
                .map(|entity| (entity, dir.join(entity.source_file())))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<(Entity, usize)>,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.loaded.iter().map(|(_, rows)| rows).sum()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("loading '{entity}' failed: {error}")]
pub struct LoadFailure {
    /// What was committed before the failure.
    pub committed: LoadReport,
    pub entity: Entity,
    #[source]
    pub error: crate::Error,
}

#[tracing::instrument(skip_all)]
pub async fn load<T>(plan: &LoadPlan, target: &mut T) -> Result<LoadReport, LoadFailure>
where
    T: BatchTarget + ?Sized,
{
    let mut report = LoadReport::default();

    for (entity, path) in plan.sources.iter() {
        tracing::info!("Loading data for '{}'", entity);

        let result = match ingest::read_file(*entity, path) {
            Ok(batch) => target.insert(batch).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(rows) => {
                tracing::info!("Loaded {} records into '{}'", rows, entity);
                report.loaded.push((*entity, rows));
            }
            Err(error) => {
                tracing::error!("Loading '{}': {}", entity, error);
                return Err(LoadFailure {
                    committed: report,
                    entity: *entity,
                    error,
                });
            }
        }
    }

    tracing::info!("All data loaded successfully, {} records", report.total());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plan_in_dir() {
        let plan = LoadPlan::in_dir(Path::new("data"));

        assert_eq!(
            vec![
                (Entity::Team, PathBuf::from("data/teams.csv")),
                (Entity::Agent, PathBuf::from("data/agents.csv")),
                (Entity::Player, PathBuf::from("data/players.csv")),
                (Entity::Game, PathBuf::from("data/games.csv")),
                (Entity::Stat, PathBuf::from("data/stats.csv")),
            ],
            plan.sources
        );
    }
}
