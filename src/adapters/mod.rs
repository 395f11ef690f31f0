pub mod console;
pub mod mysql;
