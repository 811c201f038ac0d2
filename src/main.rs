#![warn(rust_2018_idioms)]

use mahjong_club::app;
use mahjong_club::error;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "C" => {
            // Calculator (点数計算モード)
            app::CalculatorApp::new(args2).run();
        }
        "S" => {
            // Seating (席決めモード)
            app::SeatingApp::new(args2).run();
        }
        "G" => {
            // Game (ゲーム結果集計モード)
            app::GameApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
