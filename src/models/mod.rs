pub mod movie;

pub use movie::{Genre, Movie, MovieRecord, ProcessedMovie};
