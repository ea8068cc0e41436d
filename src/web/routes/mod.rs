// Route handler modules

pub mod health;
pub mod predict;
pub mod static_files;
