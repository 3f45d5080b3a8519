use crate::models::Movie;

/// Builds the text blob the vectorizer sees for one movie
///
/// The genre block is repeated `genre_repeat` times so that genre terms
/// outweigh overview and cast terms after TF-IDF weighting. A missing
/// overview contributes nothing. The overview is followed by a space so its
/// last word never fuses with the first cast name.
pub fn combine_features(movie: &Movie, genre_repeat: usize) -> String {
    let genres = format!("{} ", movie.genres.join(" "));
    let overview = movie.overview.as_deref().unwrap_or("");
    let cast = format!("{} ", movie.cast.join(" "));

    let mut text =
        String::with_capacity(genres.len() * genre_repeat + overview.len() + cast.len() + 1);
    for _ in 0..genre_repeat {
        text.push_str(&genres);
    }
    text.push_str(overview);
    text.push(' ');
    text.push_str(&cast);
    text
}

/// Combined text for every movie, in order
pub fn combine_all(movies: &[Movie], genre_repeat: usize) -> Vec<String> {
    movies
        .iter()
        .map(|m| combine_features(m, genre_repeat))
        .collect()
}
