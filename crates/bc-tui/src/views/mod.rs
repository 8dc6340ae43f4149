pub mod debug_console;
pub mod help;
pub mod list;
