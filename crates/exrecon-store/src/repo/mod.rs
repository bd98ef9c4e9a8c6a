//! Repository layer mapping `Example` records to the `examples` table

pub mod example_repo;

pub use example_repo::ExampleRepo;
