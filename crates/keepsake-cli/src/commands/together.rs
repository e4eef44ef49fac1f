use chrono::Local;
use keepsake_core::duration::{
    calendar_duration, format_together, next_hundred_day_milestone, until_next_anniversary,
};
use keepsake_core::storage::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let Some(start) = config.unlock.start_instant() else {
        return Err("unlock date in config is not a valid calendar date".into());
    };

    let now = Local::now().naive_local();
    let parts = calendar_duration(start, now);
    let (anniversary_days, anniversary_hours) = until_next_anniversary(start, now);
    let (milestone_target, milestone_days_left) = next_hundred_day_milestone(start, now);

    let snapshot = serde_json::json!({
        "since": config.unlock.display_date(),
        "together": format_together(&parts),
        "parts": parts,
        "next_anniversary": {
            "days": anniversary_days,
            "hours": anniversary_hours,
        },
        "next_milestone": {
            "target_days": milestone_target,
            "days_left": milestone_days_left,
        },
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
