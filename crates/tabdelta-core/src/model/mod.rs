pub mod dataset;
pub mod key;
pub mod value;

pub use dataset::{Dataset, Row, Side};
pub use key::{KeyPart, KeySpec, KeyTuple};
pub use value::CellValue;
