pub mod audit;
pub mod health;
pub mod settings;
