use serde::Serialize;

mod movie;

pub use movie::Movie;

/// Successful query answer returned to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryAnswer {
    pub mensaje: String,
    /// Per-film breakdown, only present for director queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peliculas: Option<Vec<DirectorFilm>>,
}

impl QueryAnswer {
    pub fn message(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
            peliculas: None,
        }
    }
}

/// One film in a director's filmography
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectorFilm {
    pub titulo: String,
    pub fecha_estreno: Option<String>,
    pub retorno: f64,
    pub costo: f64,
    pub ganancia: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_answer_omits_films() {
        let answer = QueryAnswer::message("hola");
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json, serde_json::json!({ "mensaje": "hola" }));
    }

    #[test]
    fn test_director_film_serialization() {
        let film = DirectorFilm {
            titulo: "Heat".to_string(),
            fecha_estreno: Some("1995-12-15".to_string()),
            retorno: 3.3,
            costo: 60_000_000.0,
            ganancia: 127_436_818.0,
        };

        let json = serde_json::to_value(&film).unwrap();
        assert_eq!(json["titulo"], "Heat");
        assert_eq!(json["fecha_estreno"], "1995-12-15");
    }
}
