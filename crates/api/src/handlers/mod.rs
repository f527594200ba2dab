pub mod imports;
pub mod tutorials;
