pub mod club;
pub mod financial;
pub mod metric;

pub use club::*;
pub use financial::*;
pub use metric::*;
