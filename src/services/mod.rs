// Service module exports

pub mod board;
pub mod database;
pub mod event;
pub mod layout;
pub mod persistence;
pub mod settings;
