use std::collections::HashMap;

use async_trait::async_trait;

use super::error::StoreError;
use super::traits::{ProblemDefinition, ProblemStore, validate_id};

/// Problem store backed by a map, filled once at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProblemStore {
    problems: HashMap<String, ProblemDefinition>,
}

impl InMemoryProblemStore {
    pub fn new(problems: impl IntoIterator<Item = ProblemDefinition>) -> Self {
        Self {
            problems: problems.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[async_trait]
impl ProblemStore for InMemoryProblemStore {
    async fn find_problem(&self, id: &str) -> Result<Option<ProblemDefinition>, StoreError> {
        validate_id(id)?;
        Ok(self.problems.get(id).cloned())
    }
}
