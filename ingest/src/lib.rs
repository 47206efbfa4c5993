//! Reading the CSV sources of the five entities into typed, validated rows.
//!
//! Nothing in here talks to the database. A [`Batch`] is everything one
//! entity's source file contained, already normalized and ready to insert.

use std::path::Path;

mod entity;
pub use entity::Entity;

mod error;
pub use error::SourceError;

pub mod rows;
pub use rows::{AgentRow, GameRow, PlayerRow, StatRow, TeamRow};

pub mod stats;

#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Teams(Vec<TeamRow>),
    Agents(Vec<AgentRow>),
    Players(Vec<PlayerRow>),
    Games(Vec<GameRow>),
    Stats(Vec<StatRow>),
}

impl Batch {
    pub fn entity(&self) -> Entity {
        match self {
            Self::Teams(_) => Entity::Team,
            Self::Agents(_) => Entity::Agent,
            Self::Players(_) => Entity::Player,
            Self::Games(_) => Entity::Game,
            Self::Stats(_) => Entity::Stat,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Teams(r) => r.len(),
            Self::Agents(r) => r.len(),
            Self::Players(r) => r.len(),
            Self::Games(r) => r.len(),
            Self::Stats(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the source file of `entity` from `dir`.
pub fn read_batch(entity: Entity, dir: &Path) -> Result<Batch, SourceError> {
    read_file(entity, &dir.join(entity.source_file()))
}

#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn read_file(entity: Entity, path: &Path) -> Result<Batch, SourceError> {
    let file = std::fs::File::open(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SourceError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| entity.source_file().to_owned());
    let batch = read_batch_from(entity, std::io::BufReader::new(file), &name)?;
    tracing::debug!("Read {} rows from {}", batch.len(), path.display());

    Ok(batch)
}

/// Like [`read_batch`] but from any reader. `file` is only used in errors.
pub fn read_batch_from<R>(entity: Entity, reader: R, file: &str) -> Result<Batch, SourceError>
where
    R: std::io::Read,
{
    let batch = match entity {
        Entity::Team => Batch::Teams(rows::read(reader, file, rows::unchanged, rows::team)?),
        Entity::Agent => Batch::Agents(rows::read(reader, file, rows::unchanged, rows::agent)?),
        Entity::Player => Batch::Players(rows::read(reader, file, rows::unchanged, rows::player)?),
        Entity::Game => Batch::Games(rows::read(reader, file, rows::unchanged, rows::game)?),
        Entity::Stat => Batch::Stats(rows::read(
            reader,
            file,
            stats::canonical_header,
            stats::normalize,
        )?),
    };

    Ok(batch)
}
