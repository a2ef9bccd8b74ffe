// Author: Dustin Pilgrim
// License: MIT

pub mod activity;
pub mod validity;
