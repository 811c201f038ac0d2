// mainから直接呼び出すアプリケーションの動作モード(C, S, G)のモジュール

mod calculator;
mod game;
mod seating;

pub use calculator::CalculatorApp;
pub use game::GameApp;
pub use seating::SeatingApp;
