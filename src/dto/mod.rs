pub mod result_table;
