pub mod domain;
pub mod infrastructure;
pub mod keying_driver;
