mod availability_test;
mod daily_override_test;
mod health_test;
mod middleware_test;
mod schedule_template_test;
