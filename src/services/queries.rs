use crate::{
    dataset::Dataset,
    error::{AppError, AppResult},
    models::{DirectorFilm, Movie, QueryAnswer},
    services::calendar::{capitalize, parse_month, parse_weekday},
};

/// Minimum number of votes before a title's rating is reported
pub const MIN_VOTES: u64 = 2000;

/// Number of films released in a month given by its Spanish name
pub fn films_per_month(dataset: &Dataset, mes: &str) -> AppResult<QueryAnswer> {
    let month = parse_month(mes).ok_or_else(|| {
        AppError::InvalidInput("Mes no válido. Usa el nombre del mes en español.".to_string())
    })?;

    let count = dataset
        .movies()
        .iter()
        .filter(|m| m.release_month() == Some(month))
        .count();

    Ok(QueryAnswer::message(format!(
        "{} cantidad de películas fueron estrenadas en el mes de {}",
        count,
        capitalize(mes)
    )))
}

/// Number of films released on a weekday given by its Spanish name
pub fn films_per_weekday(dataset: &Dataset, dia: &str) -> AppResult<QueryAnswer> {
    let weekday = parse_weekday(dia).ok_or_else(|| {
        AppError::InvalidInput("Día no válido. Usa el nombre del día en español.".to_string())
    })?;

    let count = dataset
        .movies()
        .iter()
        .filter(|m| m.release_weekday() == Some(weekday))
        .count();

    Ok(QueryAnswer::message(format!(
        "{} cantidad de películas fueron estrenadas en los días {}",
        count,
        capitalize(dia)
    )))
}

pub fn title_score(dataset: &Dataset, titulo: &str) -> AppResult<QueryAnswer> {
    let movie = find_title(dataset, titulo)?;

    Ok(QueryAnswer::message(format!(
        "La película {} fue estrenada en el año {} con un score/popularidad de {:.2}",
        movie.title,
        display_year(movie),
        movie.popularity.unwrap_or(0.0)
    )))
}

/// Vote count and average, only for titles with at least `MIN_VOTES` votes
pub fn title_votes(dataset: &Dataset, titulo: &str) -> AppResult<QueryAnswer> {
    let movie = find_title(dataset, titulo)?;
    let votes = movie.vote_count.unwrap_or(0);

    if votes < MIN_VOTES {
        return Ok(QueryAnswer::message(format!(
            "La película {} no cumple con la condición de tener al menos {} valoraciones",
            movie.title, MIN_VOTES
        )));
    }

    Ok(QueryAnswer::message(format!(
        "La película {} fue estrenada en el año {}. La misma cuenta con un total de {} valoraciones, con un promedio de {:.2}",
        movie.title,
        display_year(movie),
        votes,
        movie.vote_average.unwrap_or(0.0)
    )))
}

/// Film count and return earned by an actor
pub fn actor_stats(dataset: &Dataset, nombre: &str) -> AppResult<QueryAnswer> {
    let name = full_name(nombre)?;
    let films: Vec<&Movie> = dataset
        .movies()
        .iter()
        .filter(|m| m.has_actor(&name))
        .collect();

    if films.is_empty() {
        return Err(AppError::NotFound(format!(
            "No se encontraron filmaciones para el actor {}",
            name
        )));
    }

    let total: f64 = films.iter().map(|m| m.return_ratio.unwrap_or(0.0)).sum();
    let average = total / films.len() as f64;
    tracing::debug!(actor = %name, films = films.len(), "Actor stats computed");

    Ok(QueryAnswer::message(format!(
        "El actor {} ha participado de {} cantidad de filmaciones, el mismo ha conseguido un retorno de {:.2} con un promedio de {:.2} por filmación",
        name,
        films.len(),
        total,
        average
    )))
}

/// Total return of a director plus a per-film breakdown
pub fn director_stats(dataset: &Dataset, nombre: &str) -> AppResult<QueryAnswer> {
    let name = full_name(nombre)?;
    let films: Vec<DirectorFilm> = dataset
        .movies()
        .iter()
        .filter(|m| m.has_director(&name))
        .map(|m| {
            let costo = m.budget.unwrap_or(0.0);
            let ingresos = m.revenue.unwrap_or(0.0);
            DirectorFilm {
                titulo: m.title.clone(),
                fecha_estreno: m.release_date.map(|d| d.format("%Y-%m-%d").to_string()),
                retorno: m.return_ratio.unwrap_or(0.0),
                costo,
                ganancia: ingresos - costo,
            }
        })
        .collect();

    if films.is_empty() {
        return Err(AppError::NotFound(format!(
            "No se encontraron filmaciones para el director {}",
            name
        )));
    }

    let total: f64 = films.iter().map(|f| f.retorno).sum();

    Ok(QueryAnswer {
        mensaje: format!(
            "El director {} ha conseguido un retorno total de {:.2} en {} filmaciones",
            name,
            total,
            films.len()
        ),
        peliculas: Some(films),
    })
}

fn find_title<'a>(dataset: &'a Dataset, titulo: &str) -> AppResult<&'a Movie> {
    dataset
        .find_title(titulo)
        .ok_or_else(|| AppError::NotFound(format!("No se encontró la película {}", titulo.trim())))
}

fn display_year(movie: &Movie) -> String {
    movie
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "desconocido".to_string())
}

/// Requires at least a first and a last name; collapses inner whitespace
fn full_name(raw: &str) -> AppResult<String> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(AppError::InvalidInput(
            "Ingresa el nombre y el apellido".to_string(),
        ));
    }
    Ok(tokens.join(" "))
}
