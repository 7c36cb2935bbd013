use std::{collections::HashMap, io::Read, path::Path};

use crate::{
    error::AppResult,
    models::{Movie, MovieRecord},
    services::matching::best_match,
};

/// Raw movie catalog, indexed by id and searchable by title
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    titles: Vec<String>,
    by_id: HashMap<u64, usize>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let catalog = Self::from_reader(std::fs::File::open(path)?)?;

        tracing::info!(
            path = %path.display(),
            movies = catalog.len(),
            "Loaded movie catalog"
        );

        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let records = reader
            .deserialize()
            .collect::<Result<Vec<MovieRecord>, csv::Error>>()?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<MovieRecord>) -> AppResult<Self> {
        let movies = records
            .into_iter()
            .map(Movie::try_from)
            .collect::<AppResult<Vec<Movie>>>()?;

        let titles = movies.iter().map(|m| m.title.clone()).collect();

        let mut by_id = HashMap::with_capacity(movies.len());
        for (idx, movie) in movies.iter().enumerate() {
            by_id.entry(movie.id).or_insert(idx);
        }

        Ok(Self {
            movies,
            titles,
            by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// First movie carrying `id`
    pub fn by_id(&self, id: u64) -> Option<&Movie> {
        self.by_id.get(&id).map(|&idx| &self.movies[idx])
    }

    /// Closest title at or above `cutoff`
    pub fn by_title(&self, title: &str, cutoff: f64) -> Option<&Movie> {
        best_match(title, &self.titles, cutoff).map(|m| &self.movies[m.index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::matching::DEFAULT_SCORE_CUTOFF;

    const CSV: &str = "\
id,title,genres,overview,release_date,vote_average,runtime,poster,budget
862,Toy Story,\"[{\"\"id\"\": 16, \"\"name\"\": \"\"Animation\"\"}]\",Toys come alive.,1995-10-30,7.7,81.0,https://img/ts.jpg,30000000
863,Toy Story 2,\"[{\"\"id\"\": 16, \"\"name\"\": \"\"Animation\"\"}, {\"\"id\"\": 35, \"\"name\"\": \"\"Comedy\"\"}]\",Woody is stolen.,,7.3,,https://img/ts2.jpg,90000000
862,Toy Story (dup),[],,,,,,0
";

    #[test]
    fn test_from_reader() {
        let catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 3);
        let sequel = catalog.by_id(863).unwrap();
        assert_eq!(sequel.genres, "Animation, Comedy");
        assert_eq!(sequel.release_date, "Unknown release date");
        assert_eq!(sequel.runtime, "Not available");
    }

    #[test]
    fn test_by_id_returns_first_row() {
        let catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(catalog.by_id(862).unwrap().title, "Toy Story");
        assert!(catalog.by_id(1).is_none());
    }

    #[test]
    fn test_by_title() {
        let catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();

        let movie = catalog.by_title("toy story", DEFAULT_SCORE_CUTOFF).unwrap();
        assert_eq!(movie.id, 862);
        assert_eq!(movie.runtime, "81");

        assert!(catalog.by_title("Jaws", DEFAULT_SCORE_CUTOFF).is_none());
    }

    #[test]
    fn test_by_title_duplicate_titles_returns_first_row() {
        let csv = "\
id,title,genres,overview,release_date,vote_average,runtime,poster
500,Heat,[],Made for TV.,1986-03-14,5.1,101.0,
949,Heat,[],A heist crew is hunted.,1995-12-15,7.7,170.0,https://img/heat.jpg
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();

        let movie = catalog.by_title("Heat", DEFAULT_SCORE_CUTOFF).unwrap();
        assert_eq!(movie.id, 500);
        assert_eq!(catalog.by_id(949).unwrap().title, "Heat");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Catalog::load("/nonexistent/movies.csv").is_err());
    }
}
