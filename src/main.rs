use chrono::Local;
use std::env;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use wellfit_client::forms::FormFields;
use wellfit_client::ui::render_dashboard;
use wellfit_client::{App, ClientConfig, Route, UiState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ClientConfig::from_env()?;
    info!("using backend at {}", config.base_url);
    let mut app = App::from_config(&config).await?;

    if let (Ok(email), Ok(password)) = (env::var("WELLFIT_EMAIL"), env::var("WELLFIT_PASSWORD")) {
        let mut login_page = UiState::with_form(
            FormFields::new()
                .with("email", email)
                .with("password", password),
        );
        app.login(&mut login_page).await;
        if let Some(banner) = &login_page.banner {
            info!("{}", banner.text);
        }

        let Some(navigation) = login_page.navigation else {
            warn!("login did not reach the dashboard");
            return Ok(());
        };
        sleep(app.delays().logged_in).await;
        if login_page.advance(Local::now().max(navigation.due_at)) != Some(Route::Dashboard) {
            warn!("login redirected to {}", navigation.route.path());
            return Ok(());
        }
    }

    let mut dashboard = UiState::new();
    app.init_dashboard(&mut dashboard).await;
    if let Some(route) = dashboard.location {
        warn!("dashboard redirected to {}", route.path());
    }
    println!("{}", render_dashboard(&dashboard));

    Ok(())
}
