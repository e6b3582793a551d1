pub mod factsheet;
pub mod util;

pub use factsheet::HttpPageSource;
