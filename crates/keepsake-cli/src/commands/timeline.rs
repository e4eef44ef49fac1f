use keepsake_core::storage::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    if config.timeline.is_empty() {
        println!("timeline is empty");
        return Ok(());
    }
    for item in &config.timeline {
        println!("{}  {}", item.date, item.title);
        if !item.text.is_empty() {
            println!("    {}", item.text);
        }
    }
    Ok(())
}
