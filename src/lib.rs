// 構造的な意味合いや一貫性を保つために以下のclippy警告は無効化
#![allow(clippy::collapsible_else_if)]

mod util;

pub mod app;
pub mod model;
pub mod score;
pub mod seating;
