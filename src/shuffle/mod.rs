pub mod algo;
pub mod alphabet;
pub mod compare;
pub mod core;
pub mod error;


pub use self::algo::*;
pub use self::alphabet::*;
pub use self::compare::*;
pub use self::core::*;
pub use self::error::*;
