pub mod role_table;
