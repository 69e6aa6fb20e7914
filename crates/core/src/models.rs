pub mod availability;
pub mod daily_override;
pub mod template;
