use popcorn_models::{MovieDetails, SearchResultItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::CatalogError;

/// Placeholder the catalog uses for missing values
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailsResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

/// Parse a runtime such as "148 min" into minutes
pub fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    let first = raw.split_whitespace().next()?;
    if first == NOT_AVAILABLE {
        return None;
    }
    first.parse().ok()
}

/// Parse a decimal rating such as "8.8"
pub fn parse_imdb_rating(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_AVAILABLE {
        return None;
    }
    raw.parse::<f64>().ok().filter(|r| r.is_finite())
}

fn is_false(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
    let data: OmdbSearchResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Malformed(format!("search body: {}", e)))?;

    if is_false(&data.response) {
        return Err(CatalogError::NotFound(
            data.error.unwrap_or_else(|| "Movie not found!".to_string()),
        ));
    }

    let items = data
        .search
        .ok_or_else(|| CatalogError::Malformed("search body has no Search field".to_string()))?;

    Ok(items
        .into_iter()
        .map(|item| SearchResultItem {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
        })
        .collect())
}

/// Parse a details body. `requested_id` fills in the identifier when the
/// body omits it.
pub fn parse_details_response(body: &str, requested_id: &str) -> Result<MovieDetails, CatalogError> {
    let data: OmdbDetailsResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Malformed(format!("details body: {}", e)))?;

    if is_false(&data.response) {
        return Err(CatalogError::NotFound(
            data.error.unwrap_or_else(|| "Incorrect IMDb ID.".to_string()),
        ));
    }

    let title = data
        .title
        .ok_or_else(|| CatalogError::Malformed("details body has no Title field".to_string()))?;

    Ok(MovieDetails {
        imdb_id: data.imdb_id.unwrap_or_else(|| requested_id.to_string()),
        title,
        year: data.year,
        poster_url: data.poster,
        runtime_minutes: parse_runtime_minutes(&data.runtime),
        imdb_rating: parse_imdb_rating(&data.imdb_rating),
        plot: data.plot,
        release_date: data.released,
        actors: data.actors,
        director: data.director,
        genre: data.genre,
    })
}

fn endpoint(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

async fn get_body(
    client: &Client,
    base_url: &str,
    params: &[(&str, &str)],
    what: &str,
) -> Result<String, CatalogError> {
    let response = client
        .get(endpoint(base_url))
        .header("Accept", "application/json")
        .query(params)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!(status = %status, "Catalog {} request failed", what);
        return Err(CatalogError::Transport(format!("{} - {}", status, error_text)));
    }

    Ok(response.text().await?)
}

/// Search the catalog by title fragment
pub async fn search_by_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResultItem>, CatalogError> {
    debug!(query = %query, "Searching catalog");
    let body = get_body(client, base_url, &[("apikey", api_key), ("s", query)], "search").await?;
    let items = parse_search_response(&body)?;
    debug!(query = %query, count = items.len(), "Catalog search finished");
    Ok(items)
}

/// Fetch full details for one identifier
pub async fn fetch_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetails, CatalogError> {
    debug!(imdb_id = %imdb_id, "Fetching catalog details");
    let body = get_body(client, base_url, &[("apikey", api_key), ("i", imdb_id)], "details").await?;
    parse_details_response(&body, imdb_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCEPTION_SEARCH: &str = r#"{
        "Search": [
            {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "https://m.media-amazon.com/images/inception.jpg"},
            {"Title": "Inception: The Cobol Job", "Year": "2010", "imdbID": "tt5295894", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "2",
        "Response": "True"
    }"#;

    const INCEPTION_DETAILS: &str = r#"{
        "Title": "Inception", "Year": "2010", "Rated": "PG-13", "Released": "16 Jul 2010",
        "Runtime": "148 min", "Genre": "Action, Adventure, Sci-Fi", "Director": "Christopher Nolan",
        "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        "Plot": "A thief who steals corporate secrets through dream-sharing technology.",
        "Poster": "https://m.media-amazon.com/images/inception.jpg",
        "imdbRating": "8.8", "imdbID": "tt1375666", "Type": "movie", "Response": "True"
    }"#;

    #[test]
    fn test_parse_search_response() {
        let items = parse_search_response(INCEPTION_SEARCH).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].imdb_id, "tt1375666");
        assert_eq!(items[0].title, "Inception");
        assert_eq!(items[0].year, "2010");
        assert_eq!(items[1].poster_url, "N/A");
    }

    #[test]
    fn test_parse_search_not_found() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_search_response(body).unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Movie not found!".to_string()));
    }

    #[test]
    fn test_parse_search_true_without_results_is_malformed() {
        let err = parse_search_response(r#"{"Response":"True"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn test_parse_search_garbage_is_malformed() {
        let err = parse_search_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn test_parse_details_response() {
        let details = parse_details_response(INCEPTION_DETAILS, "tt1375666").unwrap();
        assert_eq!(details.title, "Inception");
        assert_eq!(details.runtime_minutes, Some(148));
        assert_eq!(details.imdb_rating, Some(8.8));
        assert_eq!(details.director, "Christopher Nolan");
        assert_eq!(details.release_date, "16 Jul 2010");
    }

    #[test]
    fn test_parse_details_missing_values() {
        let body = r#"{"Title":"Obscure","Year":"1999","Runtime":"N/A","imdbRating":"N/A","Response":"True"}"#;
        let details = parse_details_response(body, "tt0000001").unwrap();
        assert_eq!(details.imdb_id, "tt0000001");
        assert_eq!(details.runtime_minutes, None);
        assert_eq!(details.imdb_rating, None);
        assert_eq!(details.plot, "");
    }

    #[test]
    fn test_parse_details_incorrect_id() {
        let body = r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        let err = parse_details_response(body, "bogus").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_parse_runtime_minutes() {
        assert_eq!(parse_runtime_minutes("148 min"), Some(148));
        assert_eq!(parse_runtime_minutes("90"), Some(90));
        assert_eq!(parse_runtime_minutes("N/A"), None);
        assert_eq!(parse_runtime_minutes(""), None);
        assert_eq!(parse_runtime_minutes("about 2 hours"), None);
    }

    #[test]
    fn test_parse_imdb_rating() {
        assert_eq!(parse_imdb_rating("7.5"), Some(7.5));
        assert_eq!(parse_imdb_rating(" 9 "), Some(9.0));
        assert_eq!(parse_imdb_rating("N/A"), None);
        assert_eq!(parse_imdb_rating("NaN"), None);
    }

    /// Answer one request with `status` and `body`; yields the request head
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).into_owned()
        });
        (base_url, handle)
    }

    #[tokio::test]
    async fn test_search_server_error_is_transport() {
        let (base_url, server) = serve_once("500 Internal Server Error", "oops").await;
        let client = Client::new();

        let err = search_by_title(&client, &base_url, "secret", "inception")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Transport(ref msg) if msg.contains("500")));

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /?"));
        assert!(request_line.contains("apikey=secret"));
        assert!(request_line.contains("s=inception"));
    }

    #[tokio::test]
    async fn test_details_request_sends_identifier() {
        let (base_url, server) = serve_once("200 OK", INCEPTION_DETAILS).await;
        let client = Client::new();

        let details = fetch_details(&client, &base_url, "secret", "tt1375666")
            .await
            .unwrap();
        assert_eq!(details.title, "Inception");
        assert_eq!(details.runtime_minutes, Some(148));

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap_or_default();
        assert!(request_line.contains("apikey=secret"));
        assert!(request_line.contains("i=tt1375666"));
    }

    #[tokio::test]
    async fn test_search_not_found_over_http() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"Response":"False","Error":"Movie not found!"}"#).await;
        let client = Client::new();

        let err = search_by_title(&client, &base_url, "secret", "qqqqzzzz")
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Movie not found!".to_string()));
        server.await.unwrap();
    }

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        assert_eq!(endpoint("https://www.omdbapi.com"), "https://www.omdbapi.com/");
        assert_eq!(endpoint("https://www.omdbapi.com/"), "https://www.omdbapi.com/");
    }
}
