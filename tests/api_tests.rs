use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::Value;

use cinefilo::{
    api::{create_router, AppState, WELCOME},
    dataset::Dataset,
    middleware::REQUEST_ID_HEADER,
    models::Movie,
};

fn movie(title: &str, date: &str) -> Movie {
    let mut m = Movie::new(title);
    m.release_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
    m
}

fn sample_dataset() -> Dataset {
    // 1995-10-30 Monday, 1995-12-15 Friday, 1995-12-22 Friday
    let mut toy_story = movie("Toy Story", "1995-10-30");
    toy_story.popularity = Some(21.946943);
    toy_story.vote_count = Some(5415);
    toy_story.vote_average = Some(7.7);
    toy_story.cast = vec!["Tom Hanks".to_string(), "Tim Allen".to_string()];
    toy_story.directors = vec!["John Lasseter".to_string()];
    toy_story.budget = Some(30_000_000.0);
    toy_story.revenue = Some(373_554_033.0);
    toy_story.return_ratio = Some(12.45);

    let mut heat = movie("Heat", "1995-12-15");
    heat.vote_count = Some(1886);
    heat.vote_average = Some(7.7);
    heat.cast = vec!["Al Pacino".to_string(), "Robert De Niro".to_string()];
    heat.directors = vec!["Michael Mann".to_string()];
    heat.budget = Some(60_000_000.0);
    heat.revenue = Some(187_436_818.0);
    heat.return_ratio = Some(3.12);

    let mut nixon = movie("Nixon", "1995-12-22");
    nixon.cast = vec!["Anthony Hopkins".to_string()];

    Dataset::new(vec![toy_story, heat, nixon])
}

fn create_test_server() -> TestServer {
    let app = create_router(AppState::new(sample_dataset()));
    TestServer::new(app).unwrap()
}

fn mensaje(response: &axum_test::TestResponse) -> String {
    let body: Value = response.json();
    body["mensaje"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_index() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), WELCOME);
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 3);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("trace-123"),
        )
        .await;
    assert_eq!(
        response.header(HeaderName::from_static(REQUEST_ID_HEADER)),
        "trace-123"
    );

    let response = server.get("/health").await;
    let generated = response.header(HeaderName::from_static(REQUEST_ID_HEADER));
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_films_per_month() {
    let server = create_test_server();
    let response = server.get("/cantidad_filmaciones_mes/Diciembre").await;
    response.assert_status_ok();
    assert_eq!(
        mensaje(&response),
        "2 cantidad de películas fueron estrenadas en el mes de Diciembre"
    );
}

#[tokio::test]
async fn test_films_per_month_invalid() {
    let server = create_test_server();
    let response = server.get("/cantidad_filmaciones_mes/brumario").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_films_per_weekday() {
    let server = create_test_server();
    let response = server.get("/cantidad_filmaciones_dia/viernes").await;
    response.assert_status_ok();
    assert_eq!(
        mensaje(&response),
        "2 cantidad de películas fueron estrenadas en los días Viernes"
    );

    let response = server.get("/cantidad_filmaciones_dia/lunes").await;
    assert!(mensaje(&response).starts_with("1 cantidad"));
}

#[tokio::test]
async fn test_score_titulo() {
    let server = create_test_server();
    let response = server.get("/score_titulo/Toy%20Story").await;
    response.assert_status_ok();
    assert_eq!(
        mensaje(&response),
        "La película Toy Story fue estrenada en el año 1995 con un score/popularidad de 21.95"
    );
}

#[tokio::test]
async fn test_score_titulo_not_found() {
    let server = create_test_server();
    let response = server.get("/score_titulo/Casablanca").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_votos_titulo() {
    let server = create_test_server();

    let response = server.get("/votos_titulo/toy%20story").await;
    response.assert_status_ok();
    assert_eq!(
        mensaje(&response),
        "La película Toy Story fue estrenada en el año 1995. La misma cuenta con un total de 5415 valoraciones, con un promedio de 7.70"
    );

    let response = server.get("/votos_titulo/Heat").await;
    response.assert_status_ok();
    assert!(mensaje(&response).contains("no cumple con la condición"));
}

#[tokio::test]
async fn test_get_actor() {
    let server = create_test_server();
    let response = server.get("/get_actor/Tom%20Hanks").await;
    response.assert_status_ok();
    assert_eq!(
        mensaje(&response),
        "El actor Tom Hanks ha participado de 1 cantidad de filmaciones, el mismo ha conseguido un retorno de 12.45 con un promedio de 12.45 por filmación"
    );
}

#[tokio::test]
async fn test_get_actor_errors() {
    let server = create_test_server();

    let response = server.get("/get_actor/Hanks").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/get_actor/Meryl%20Streep").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_director() {
    let server = create_test_server();
    let response = server.get("/get_director/michael%20mann").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let peliculas = body["peliculas"].as_array().unwrap();
    assert_eq!(peliculas.len(), 1);
    assert_eq!(peliculas[0]["titulo"], "Heat");
    assert_eq!(peliculas[0]["fecha_estreno"], "1995-12-15");
    assert_eq!(peliculas[0]["costo"], 60_000_000.0);
    assert_eq!(peliculas[0]["ganancia"], 127_436_818.0);
    assert!(body["mensaje"]
        .as_str()
        .unwrap()
        .contains("retorno total de 3.12 en 1 filmaciones"));
}

#[tokio::test]
async fn test_get_director_errors() {
    let server = create_test_server();

    let response = server.get("/get_director/Mann").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/get_director/Sofia%20Coppola").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
