use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use lifesync::features::intake::{GeminiBackend, IntakeAdapter};
use lifesync::features::reminders::{
    AlarmScanner, Category, Priority, ReminderInput, ReminderStore,
};
use lifesync::features::session::SessionManager;
use lifesync::features::settings::{SettingsStore, ThemeGallery};
use lifesync::features::sounds::{LogPlayback, SoundPlayer};
use lifesync::features::Dashboard;
use lifesync::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting LifeSync...");

    let settings = Arc::new(SettingsStore::init(config.settings_path()));
    let sessions = SessionManager::new(settings.clone());

    match sessions.restore().await {
        Some(user) => info!("Welcome back, {}!", user.username),
        None => info!("No saved session, starting logged out"),
    }
    info!(
        "Theme: {:?}, background: {}",
        settings.effective_theme(false).await,
        settings.background().await.as_deref().unwrap_or("default gradient")
    );

    let gallery = match ThemeGallery::load(&config.themes_path.to_string_lossy()) {
        Ok(gallery) => gallery,
        Err(e) => {
            if config.themes_path.exists() {
                error!(
                    "Failed to load theme gallery from {}: {e}. Using built-in presets.",
                    config.themes_path.display()
                );
            } else {
                info!(
                    "No theme gallery at {} - using built-in presets",
                    config.themes_path.display()
                );
            }
            ThemeGallery::builtin()
        }
    };
    info!("{} theme presets available", gallery.presets.len());

    let store = Arc::new(ReminderStore::new());
    seed_demo_reminders(&store).await?;

    let backend = Arc::new(GeminiBackend::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));
    let intake = IntakeAdapter::new(backend);
    let sounds = SoundPlayer::new(LogPlayback);

    let dashboard = Dashboard::new(store.clone(), intake, sounds.clone());
    let stats = dashboard.stats().await;
    info!(
        "Dashboard ready: {} task(s), {} pending, {} completed",
        stats.total, stats.pending, stats.completed
    );

    // Start the recurring alarm sweep for the lifetime of the dashboard.
    let scanner = AlarmScanner::new(store, sounds);
    let handle = scanner.spawn(config.scan_interval);

    info!("Alarm scanning every {:?}. Press Ctrl-C to exit.", config.scan_interval);
    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    handle.stop().await;

    Ok(())
}

/// A couple of starter tasks so a fresh dashboard is not empty.
async fn seed_demo_reminders(store: &Arc<ReminderStore>) -> Result<()> {
    store
        .create(ReminderInput {
            title: "Leg Day Workout".to_string(),
            category: Some(Category::Gym),
            priority: Some(Priority::Medium),
            due_at: Some(Utc::now() + ChronoDuration::days(1)),
            ..Default::default()
        })
        .await?;
    store
        .create(ReminderInput {
            title: "Meal Prep: Chicken & Rice".to_string(),
            category: Some(Category::Food),
            priority: Some(Priority::High),
            ..Default::default()
        })
        .await?;
    Ok(())
}
