pub mod example;
pub mod metadata;
pub mod payload;

pub use example::{Candidate, EntityAnnotation, Example, Provenance};
pub use metadata::ExampleMetadata;
pub use payload::Payload;
