mod error;
mod traits;

pub mod filesystem;
pub mod memory;

pub use error::StoreError;
pub use filesystem::TomlProblemStore;
pub use memory::InMemoryProblemStore;
pub use traits::{ProblemDefinition, ProblemStore};
