use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::StoreError;
use super::traits::{ProblemDefinition, ProblemStore, validate_id};

/// Problem store reading one `{id}.toml` file per problem from a directory.
///
/// Files are read on every lookup, so edits are picked up without a restart.
pub struct TomlProblemStore {
    base_path: PathBuf,
}

impl TomlProblemStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn problem_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{id}.toml"))
    }
}

#[async_trait]
impl ProblemStore for TomlProblemStore {
    async fn find_problem(&self, id: &str) -> Result<Option<ProblemDefinition>, StoreError> {
        validate_id(id)?;
        let path = self.problem_path(id);
        debug!(path = %path.display(), "Reading problem definition");

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut problem: ProblemDefinition =
            toml::from_str(&content).map_err(|e| StoreError::Malformed {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        if problem.id != id {
            return Err(StoreError::Malformed {
                id: id.to_string(),
                reason: format!("file declares id {:?}", problem.id),
            });
        }
        if problem.title.is_empty() {
            problem.title = id.to_string();
        }
        Ok(Some(problem))
    }
}
