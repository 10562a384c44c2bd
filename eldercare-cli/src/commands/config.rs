use anyhow::Result;
use eldercare_core::config::EldercareConfig;
use owo_colors::OwoColorize;

pub fn run(config: &EldercareConfig) -> Result<()> {
    let config_path = EldercareConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Schedule:  {}", config.schedule_path().display());
    println!();
    println!("{}", "Conflict check".bold());
    println!("  Strategy:  {}", config.strategy);
    println!("  Window:    ±{} days", config.window_days);

    Ok(())
}
