pub mod bar;
pub mod barcode;
pub mod matrix;
pub mod region;

pub use bar::{Bar, BarType};
pub use barcode::{BarcodeString, NUM_BARS, ParseBarcodeError, UNRESOLVED};
pub use matrix::BitMatrix;
pub use region::Region;
