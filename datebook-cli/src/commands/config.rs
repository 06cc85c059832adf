use anyhow::Result;
use datebook_core::config::DatebookConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = DatebookConfig::config_path()?;
    let config = DatebookConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Bookings:  {}", config.store_path().display());

    Ok(())
}
