use axum::response::Html;

const HOME_PAGE: &str = include_str!("../../templates/index.html");
const RESULTS_PAGE: &str = include_str!("../../templates/results.html");

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

pub async fn results() -> Html<&'static str> {
    Html(RESULTS_PAGE)
}
