pub mod config;
pub mod gallery;
pub mod gate;
pub mod letter;
pub mod music;
pub mod timeline;
pub mod together;
