pub mod check;
pub mod config;
pub mod info;
pub mod render;
pub mod run;
