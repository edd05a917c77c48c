#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use school_holidays::{
        Configuration, Coordinator, HolidayTable, http_api, load_config_from_json,
        load_table_from_json, scheduler,
    };
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("SCHOOL_HOLIDAYS_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = match std::env::var("SCHOOL_HOLIDAYS_CONFIG") {
        Ok(path) => load_config_from_json(&path).unwrap_or_else(|err| {
            tracing::error!(%path, error = %err, "failed to load configuration, using defaults");
            Configuration::default()
        }),
        Err(_) => Configuration::default(),
    };
    let table = match std::env::var("SCHOOL_HOLIDAYS_TABLE") {
        Ok(path) => load_table_from_json(&path).unwrap_or_else(|err| {
            tracing::error!(%path, error = %err, "failed to load holiday table, using bundled data");
            HolidayTable::bundled()
        }),
        Err(_) => HolidayTable::bundled(),
    };

    let table = Arc::new(table);
    let coordinator = Coordinator::with_config(table.clone(), config);
    let _daily = scheduler::spawn_daily_refresh(coordinator.clone());

    tracing::info!(%addr, "school-holidays HTTP API listening");
    let state = http_api::AppState::with_shared(coordinator, table);
    http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
