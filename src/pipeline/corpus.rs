use std::path::Path;

use sha2::{Digest, Sha256};

use crate::{dataset::read_movies, error::PipelineResult, models::Movie};

/// Ordered, immutable sequence of items
///
/// Row `i` of every matrix derived from a corpus describes `items()[i]`.
/// A corpus cannot be reordered or filtered once built.
#[derive(Debug, Clone)]
pub struct Corpus {
    items: Vec<Movie>,
    hash: [u8; 32],
}

impl Corpus {
    pub fn new(items: Vec<Movie>) -> Self {
        let hash = content_hash(&items);
        Self { items, hash }
    }

    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        Ok(Self::new(read_movies(path)?))
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// SHA-256 over the fields the pipeline reads, in corpus order
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    pub fn hash_hex(&self) -> String {
        to_hex(&self.hash)
    }
}

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn content_hash(items: &[Movie]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((items.len() as u64).to_le_bytes());

    // Length-prefixed fields so that ["ab"] and ["a", "b"] hash differently
    let mut field = |bytes: &[u8]| {
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    };

    for item in items {
        field(item.title.as_bytes());
        match &item.overview {
            Some(text) => {
                field(&[1u8][..]);
                field(text.as_bytes());
            }
            None => field(&[0u8][..]),
        }
        for list in [&item.genres, &item.cast] {
            field(&(list.len() as u64).to_le_bytes()[..]);
            for value in list {
                field(value.as_bytes());
            }
        }
    }

    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, genres: &[&str]) -> Movie {
        let mut m = Movie::new(title);
        m.genres = genres.iter().map(|g| g.to_string()).collect();
        m
    }

    #[test]
    fn test_hash_is_stable() {
        let a = Corpus::new(vec![movie("Alien", &["Horror"]), movie("Up", &["Family"])]);
        let b = Corpus::new(vec![movie("Alien", &["Horror"]), movie("Up", &["Family"])]);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash_hex().len(), 64);
    }

    #[test]
    fn test_hash_depends_on_order() {
        let a = Corpus::new(vec![movie("Alien", &[]), movie("Up", &[])]);
        let b = Corpus::new(vec![movie("Up", &[]), movie("Alien", &[])]);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_distinguishes_list_boundaries() {
        let a = Corpus::new(vec![movie("X", &["ab"])]);
        let b = Corpus::new(vec![movie("X", &["a", "b"])]);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_distinguishes_missing_and_empty_overview() {
        let mut with_empty = Movie::new("X");
        with_empty.overview = Some(String::new());
        let a = Corpus::new(vec![with_empty]);
        let b = Corpus::new(vec![Movie::new("X")]);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_ignores_query_only_columns() {
        let mut rated = movie("Alien", &["Horror"]);
        rated.vote_count = Some(10);
        let a = Corpus::new(vec![rated]);
        let b = Corpus::new(vec![movie("Alien", &["Horror"])]);
        assert_eq!(a.hash(), b.hash());
    }
}
