// UIとの境界で使用するデータモデル
mod define;
mod payload;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use payload::*;
