use std::fmt;

use serde::Serialize;

use crate::model::*;

// 100点単位への切り上げ
fn ceil_100(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// d等分した1人あたりの支払いを100点単位に切り上げ
fn ceil_100_div(n: Point, d: Point) -> Point {
    (n + d * 100 - 1) / (d * 100) * 100
}

// 支払い者の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Payer {
    Discarder, // 放銃者
    Dealer,    // 親
    NonDealer, // 子
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Payer::Discarder => "discarder",
            Payer::Dealer => "dealer",
            Payer::NonDealer => "non-dealer",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub payer: Payer,
    pub point: Point,
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.payer, self.point)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HandScore {
    pub total: Point,           // 移動する点数の合計
    pub payments: Vec<Payment>, // 支払いの内訳 (支払い者順)
    pub title: String,          // 満貫, 跳満, ... 満貫未満は空文字列
}

// 基本点(符 * 2^(飜+2))から計算する範囲か
fn is_below_mangan(fu: usize, han: usize) -> bool {
    han < 3 || (han == 3 && fu < 70) || (han == 4 && fu < 40)
}

// 満貫以上の(親の合計, 子の合計, タイトル)
fn fixed_tier(han: usize) -> (Point, Point, &'static str) {
    match han {
        0..=5 => (12000, 8000, "満貫"), // 3飜70符以上と4飜40符以上を含む
        6 | 7 => (18000, 12000, "跳満"),
        8..=10 => (24000, 16000, "倍満"),
        11 | 12 => (36000, 24000, "三倍満"),
        _ => (48000, 32000, "数え役満"),
    }
}

// 得点のタイトルを返却
pub fn get_score_title(fu: usize, han: usize) -> &'static str {
    if is_below_mangan(fu, han) {
        ""
    } else {
        fixed_tier(han).2
    }
}

// 分配前の合計点 役が成立しない符・飜の組み合わせはNone
fn calc_total(fu: usize, han: usize, is_dealer: bool, is_tsumo: bool) -> Option<Point> {
    // 20符1飜は存在しない 25符はロンで2飜, ツモで3飜に満たなければ手にならない
    let min_han_25 = if is_tsumo { 3 } else { 2 };
    if (fu == 20 && han == 1) || (fu == 25 && han < min_han_25) {
        return None;
    }

    let total = if is_below_mangan(fu, han) {
        let basic = (fu * 2usize.pow(han as u32 + 2)) as Point;
        ceil_100((if is_dealer { 6 } else { 4 }) * basic)
    } else {
        let (dealer, non_dealer, _) = fixed_tier(han);
        if is_dealer {
            dealer
        } else {
            non_dealer
        }
    };
    Some(total)
}

// 符と飜から和了得点と支払いの内訳を計算
// 本場は1本場につき300点を分配前に加算
// ツモの支払いは1人分を100点単位に切り上げるため合計が合計点の切り上げと一致しないことがある
pub fn calc_score(
    fu: usize,
    han: usize,
    is_dealer: bool,
    is_tsumo: bool,
    honba: usize,
) -> Option<HandScore> {
    let mut total = calc_total(fu, han, is_dealer, is_tsumo)?;
    total += honba as Point * 300;

    let (total, payments) = if is_dealer {
        if is_tsumo {
            let each = ceil_100_div(total, 3);
            let payment = Payment {
                payer: Payer::NonDealer,
                point: each,
            };
            (each * 3, vec![payment; 3])
        } else {
            let payment = Payment {
                payer: Payer::Discarder,
                point: total,
            };
            (total, vec![payment])
        }
    } else {
        if is_tsumo {
            let dealer_pay = ceil_100_div(total, 2);
            let child_pay = ceil_100_div(dealer_pay, 2);
            let payments = vec![
                Payment {
                    payer: Payer::Dealer,
                    point: dealer_pay,
                },
                Payment {
                    payer: Payer::NonDealer,
                    point: child_pay,
                },
                Payment {
                    payer: Payer::NonDealer,
                    point: child_pay,
                },
            ];
            (dealer_pay + child_pay * 2, payments)
        } else {
            let payment = Payment {
                payer: Payer::Discarder,
                point: total,
            };
            (total, vec![payment])
        }
    };

    Some(HandScore {
        total,
        payments,
        title: get_score_title(fu, han).to_string(),
    })
}

#[test]
fn test_no_score() {
    assert!(calc_score(20, 1, false, false, 0).is_none());
    assert!(calc_score(20, 1, true, true, 0).is_none());
    assert!(calc_score(25, 1, false, false, 0).is_none());
    assert!(calc_score(25, 2, false, true, 0).is_none());

    assert!(calc_score(20, 2, false, false, 0).is_some());
    assert!(calc_score(25, 2, false, false, 0).is_some());
    assert!(calc_score(25, 3, false, true, 0).is_some());
}

#[test]
fn test_basic_points() {
    // 30符4飜 親ロン: 30 * 2^6 * 6 = 11520 -> 11600
    let s = calc_score(30, 4, true, false, 0).unwrap();
    assert_eq!(11600, s.total);
    assert_eq!(
        vec![Payment {
            payer: Payer::Discarder,
            point: 11600,
        }],
        s.payments
    );
    assert_eq!("", s.title);

    // 子ロン
    assert_eq!(1000, calc_score(30, 1, false, false, 0).unwrap().total);
    assert_eq!(7700, calc_score(30, 4, false, false, 0).unwrap().total);
    assert_eq!(7700, calc_score(60, 3, false, false, 0).unwrap().total);
}

#[test]
fn test_fixed_tiers() {
    // 切り上げ満貫は採用しない 40符4飜と70符3飜から満貫
    assert_eq!(12000, calc_score(40, 4, true, false, 0).unwrap().total);
    assert_eq!(8000, calc_score(40, 4, false, false, 0).unwrap().total);
    assert_eq!(12000, calc_score(70, 3, true, false, 0).unwrap().total);
    assert_eq!(8000, calc_score(20, 5, false, false, 0).unwrap().total);

    assert_eq!("満貫", calc_score(40, 4, false, false, 0).unwrap().title);
    assert_eq!(12000, calc_score(30, 6, false, false, 0).unwrap().total);
    assert_eq!(16000, calc_score(30, 8, false, false, 0).unwrap().total);
    assert_eq!(24000, calc_score(30, 11, false, false, 0).unwrap().total);
}

#[test]
fn test_kazoe_yakuman() {
    assert_eq!(48000, calc_score(30, 13, true, false, 0).unwrap().total);
    assert_eq!(32000, calc_score(30, 13, false, false, 0).unwrap().total);
    assert_eq!(32000, calc_score(20, 15, false, true, 0).unwrap().total);
    assert_eq!("数え役満", calc_score(30, 13, false, false, 0).unwrap().title);
}

#[test]
fn test_dealer_tsumo_rounding() {
    // 1人分を切り上げてから3倍するため合計は11600ではなく11700になる
    let s = calc_score(30, 4, true, true, 0).unwrap();
    assert_eq!(11700, s.total);
    assert_eq!(3, s.payments.len());
    for p in &s.payments {
        assert_eq!(Payer::NonDealer, p.payer);
        assert_eq!(3900, p.point);
    }
}

#[test]
fn test_non_dealer_tsumo() {
    // 30符4飜 子ツモ: 親3900 + 子2000 * 2
    let s = calc_score(30, 4, false, true, 0).unwrap();
    assert_eq!(7900, s.total);
    assert_eq!(
        vec![
            Payment {
                payer: Payer::Dealer,
                point: 3900,
            },
            Payment {
                payer: Payer::NonDealer,
                point: 2000,
            },
            Payment {
                payer: Payer::NonDealer,
                point: 2000,
            },
        ],
        s.payments
    );
}

#[test]
fn test_honba() {
    // 2本場のロンは600点加算
    assert_eq!(8300, calc_score(30, 4, false, false, 2).unwrap().total);
    assert_eq!(12200, calc_score(30, 4, true, false, 2).unwrap().total);

    // ツモは加算後に分配するので切り上げに本場分が含まれる
    let s = calc_score(30, 4, true, true, 2).unwrap();
    assert_eq!(12300, s.total);
    assert_eq!(4100, s.payments[0].point);
}

// cargo test --release print_score_table -- --nocapture
#[test]
fn print_score_table() {
    let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    println!("点数計算表 (子のロン) ======================================");
    for &fu in fu_list.iter() {
        print!("[{:3}符] ", fu);
        for han in 1..=4 {
            match calc_score(fu, han, false, false, 0) {
                Some(s) => print!("{}飜:{:5} ", han, s.total),
                None => print!("{}飜:    - ", han),
            }
        }
        println!();
    }
    for han in 5..=13 {
        let s = calc_score(30, han, false, false, 0).unwrap();
        println!("{:2}飜:{:5} {}", han, s.total, s.title);
    }
}
