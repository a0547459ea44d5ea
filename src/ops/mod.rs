pub mod deadline;
pub mod sort;
pub mod store;

pub use sort::SortKey;
pub use store::{Diagnostic, StoreError, TaskStore};
