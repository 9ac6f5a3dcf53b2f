pub mod credentials;
pub mod load_form;
pub mod weekly_stats;
