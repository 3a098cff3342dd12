use actix_web::*;
use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_workers() -> usize {
    1
}

impl HttpServerConfig {
    pub async fn run_server<F>(&self, scopes: F) -> anyhow::Result<()>
    where
        F: Fn() -> Vec<Scope> + Send + Clone + 'static,
    {
        let http_server = HttpServer::new(move || {
            let mut app = App::new().wrap(tracing_actix_web::TracingLogger::default());

            for scope in scopes() {
                app = app.service(scope);
            }

            app
        })
        .workers(self.workers)
        .bind((self.host.as_str(), self.port))?;

        tracing::info!("HTTP server listening on {}:{}", self.host, self.port);

        http_server
            .run()
            .await
            .with_context(|| format!("Error starting HTTP server on port {}", self.port))
    }
}
