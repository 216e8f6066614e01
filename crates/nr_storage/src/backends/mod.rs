pub mod csv_file;
pub mod memory;

pub use csv_file::CsvHistory;
pub use memory::InMemoryHistory;
