pub mod adb_startup;
pub mod device_list;
pub mod types;

pub use adb_startup::use_adb_startup;
pub use device_list::use_device_list;
pub use types::*;
