// 型エイリアス
pub type Point = i32; // 点数

// 座席の風 5人卓は5番目のマーカーを使用
pub const SEAT_WINDS: [char; 5] = ['東', '南', '西', '北', '５'];

// ゲーム開始時の持ち点
pub const STARTING_POINTS: Point = 25000;

// 順位ウマ (4人卓, 5人卓)
pub const UMA_4P: [f64; 4] = [15.0, 5.0, -5.0, -15.0];
pub const UMA_5P: [f64; 5] = [15.0, 5.0, 0.0, -5.0, -15.0];

// チョンボ1回あたりの減点
pub const CHOMBO_PENALTY: f64 = 8.0;

// 清算されなかった点数を記録するための特殊プレイヤー名
pub const UNUSED_POINTS_PLAYER: &str = "!#*UnusedPointsPlayer*#!";
