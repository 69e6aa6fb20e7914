pub mod daily_override;
pub mod schedule_template;
