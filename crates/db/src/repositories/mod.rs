//! Repository layer: stateless structs with associated async functions that
//! take a pool and return row models.

pub mod project_repo;

pub use project_repo::ProjectRepo;
