pub mod file_deleter;
