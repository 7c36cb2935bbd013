pub mod catalog;
pub mod matching;
pub mod model;
pub mod recommender;
pub mod sources;
pub mod vectorize;

pub use catalog::Catalog;
pub use model::SimilarityModel;
pub use recommender::{Recommender, RecommenderSettings, SearchOutcome};
pub use sources::{ModelSource, ModelSourceKind};
