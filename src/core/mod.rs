pub mod assessment;
pub mod lifecycle;
pub mod traits;
