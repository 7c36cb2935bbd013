use minijinja::Environment;

use crate::{error::AppResult, services::SearchOutcome};

const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Page templates, compiled into the binary
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, page: &SearchOutcome) -> AppResult<String> {
        let template = self.env.get_template("index.html")?;
        Ok(template.render(page)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;

    fn movie(title: &str) -> Movie {
        Movie {
            id: 1,
            title: title.to_string(),
            genres: "Crime".to_string(),
            overview: "A heist crew is hunted.".to_string(),
            release_date: "1995-12-15".to_string(),
            vote_average: 7.7,
            runtime: "170".to_string(),
            poster_url: None,
        }
    }

    #[test]
    fn test_render_empty_page() {
        let html = Templates::new()
            .unwrap()
            .render_index(&SearchOutcome::default())
            .unwrap();

        assert!(html.contains("name=\"movie_title\""));
        assert!(!html.contains("id=\"movie-info\""));
        assert!(!html.contains("id=\"not-found\""));
    }

    #[test]
    fn test_render_results() {
        let page = SearchOutcome {
            query: "heat".to_string(),
            movie: Some(movie("Heat")),
            recommendations: Some(vec![movie("Ronin")]),
            suggestions: vec![],
        };
        let html = Templates::new().unwrap().render_index(&page).unwrap();

        assert!(html.contains("id=\"movie-info\""));
        assert!(html.contains("Ronin"));
    }

    #[test]
    fn test_render_escapes_query() {
        let page = SearchOutcome {
            query: "<script>".to_string(),
            suggestions: vec!["Scream".to_string()],
            ..Default::default()
        };
        let html = Templates::new().unwrap().render_index(&page).unwrap();

        assert!(html.contains("id=\"not-found\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Scream"));
    }
}
