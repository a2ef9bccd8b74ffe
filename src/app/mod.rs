// Author: Dustin Pilgrim
// License: MIT

pub mod command;
pub mod console;
pub mod monitor_mode;
pub mod platform;
