// Record serialization and file handling

pub mod file_ops;
pub mod records;
