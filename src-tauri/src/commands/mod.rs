pub mod audit;
pub mod config;
pub mod health;
pub mod keychain;
pub mod worksheet;
