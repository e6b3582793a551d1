pub mod list;
pub mod rank;
pub mod setup;
pub mod show;
pub mod ui;
