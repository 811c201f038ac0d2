// ゲーム会の卓分けと席決め
mod arrange;
mod table;

pub use arrange::*;
pub use table::*;
