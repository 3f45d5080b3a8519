use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{error::PipelineResult, models::Movie};

/// Reads a JSON array of movie records
pub fn read_movies(path: impl AsRef<Path>) -> PipelineResult<Vec<Movie>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let movies: Vec<Movie> = serde_json::from_reader(BufReader::new(file))?;
    tracing::info!(path = %path.display(), rows = movies.len(), "Movies table loaded");
    Ok(movies)
}

/// Immutable, load-once movies table shared by the query handlers
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    movies: Vec<Movie>,
}

impl Dataset {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        Ok(Self::new(read_movies(path)?))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// First movie whose title matches, ignoring case and surrounding spaces
    pub fn find_title(&self, title: &str) -> Option<&Movie> {
        let wanted = title.trim().to_lowercase();
        self.movies
            .iter()
            .find(|m| m.title.trim().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_find_title_first_match_wins() {
        let mut first = Movie::new("Hamlet");
        first.release_year = Some(1948);
        let mut second = Movie::new("Hamlet");
        second.release_year = Some(1996);
        let dataset = Dataset::new(vec![first, second]);

        let found = dataset.find_title("  hamlet ").unwrap();
        assert_eq!(found.release_year, Some(1948));
        assert!(dataset.find_title("Macbeth").is_none());
    }

    #[test]
    fn test_read_movies_from_file() {
        let path = std::env::temp_dir().join(format!("cinefilo-{}.json", uuid::Uuid::new_v4()));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"[{{"title": "Alien"}}, {{"title": "Aliens", "genres": ["Action"]}}]"#)
            .unwrap();
        drop(file);

        let dataset = Dataset::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.movies()[1].genres, vec!["Action".to_string()]);
    }

    #[test]
    fn test_read_movies_missing_file() {
        let result = read_movies("/nonexistent/cinefilo/movies.json");
        assert!(matches!(result, Err(crate::error::PipelineError::Io(_))));
    }
}
