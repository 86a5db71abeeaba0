//! Symptom extraction pipeline
//!
//! Turns free-text symptom descriptions into deduplicated symptoms and a
//! ranked list of medical specializations:
//! - `normalizer`: input validation and cleanup
//! - `engine`: stub, keyword and model-backed extraction engines
//! - `mapper`: weighted symptom to specialization lookup
//! - `pipeline`: orchestration of the above

pub mod engine;
pub mod mapper;
pub mod normalizer;
pub mod pipeline;

pub use engine::{create_engine, KeywordEngine, ModelBackedEngine, StubEngine};
pub use mapper::{MappingEntry, SpecializationMapper, WeightedSpecialization};
pub use normalizer::TextNormalizer;
pub use pipeline::SymptomPipeline;
