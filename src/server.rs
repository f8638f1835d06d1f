use crate::{
    config::ServerConfig,
    log::{log_event, LogLevel},
};
use axum::{routing::get, Router};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

/// Serves the built page bundle, falling back to `index.html` for unknown paths.
pub fn router(config: &ServerConfig) -> Router {
    let index = config.dist_dir.join("index.html");
    let static_service = ServeDir::new(&config.dist_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .fallback_service(static_service)
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        config.log_level,
        LogLevel::Info,
        "server_listening",
        json!({
            "url": format!("http://127.0.0.1:{}", config.port),
            "dist_dir": config.dist_dir.display().to_string(),
        }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    fn temp_dist(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portfolio-page-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create dist dir");
        fs::write(dir.join("index.html"), "<div id=\"app\"></div>").expect("write index");
        fs::write(dir.join("styles.css"), "body{}").expect("write css");
        dir
    }

    async fn spawn_server(dist_dir: PathBuf) -> String {
        let config = ServerConfig {
            port: 0,
            dist_dir,
            log_level: LogLevel::Info,
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback");
        let address = listener.local_addr().expect("local addr");
        let app = router(&config);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{address}")
    }

    #[tokio::test]
    async fn serves_bundle_files() {
        let base = spawn_server(temp_dist("files")).await;

        let response = reqwest::get(format!("{base}/styles.css")).await.expect("request");
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.expect("body"), "body{}");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let base = spawn_server(temp_dist("fallback")).await;

        let response = reqwest::get(format!("{base}/no/such/page")).await.expect("request");
        assert!(response.text().await.expect("body").contains("id=\"app\""));
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let base = spawn_server(temp_dist("health")).await;

        let response = reqwest::get(format!("{base}/healthz")).await.expect("request");
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.expect("body"), "ok");
    }
}
