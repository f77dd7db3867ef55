//! main.rs — Tablero OTASS: credenciales -> carga de v1/v2 -> API + pagina estatica

use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tablero_otass::models::types::AppCfg;
use tablero_otass::server::{api, auth, fetch};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs (RUST_LOG pisa el nivel por defecto)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_cfg = AppCfg::desde_env();

    // HTTP client con compresión
    let client = Client::builder().brotli(true).gzip(true).deflate(true).build()?;

    // Carga única; sin datos no se sirve nada
    info!("Leyendo credenciales: {}", app_cfg.credenciales);
    let cred = auth::Credenciales::desde_archivo(&app_cfg.credenciales)?;
    let token = auth::obtener_token(&client, &cred, auth::SCOPES)
        .await
        .context("autenticación con Google")?;
    let fuente = fetch::GoogleSheets::new(client, token, app_cfg.spreadsheet_id.clone());
    let tablero = tablero_otass::cargar(&fuente, &app_cfg.hoja_v1, &app_cfg.hoja_v2).await?;

    // API
    let app = api::router(api::ApiState { tablero: Arc::new(tablero) }, &app_cfg.web_dir);
    info!("Escuchando en http://{}", app_cfg.bind);
    let listener = tokio::net::TcpListener::bind(&app_cfg.bind).await?;
    let serve = axum::serve(listener, app);
    tokio::select! {
        r = serve => { r?; },
        _ = signal::ctrl_c() => { info!("Señal de salida recibida"); }
    }

    Ok(())
}
