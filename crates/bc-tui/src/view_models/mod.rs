pub mod header;
pub mod list_table;
