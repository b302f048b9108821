// Database service module
// SQLite database connection and schema management

mod connection;
mod schema;

pub use connection::Database;
