use std::collections::{HashMap, HashSet};

use rand::prelude::*;

use super::table::{calc_table_sizes, InvalidCount};

// プレイヤー名のペア -> 今期の対戦回数
pub type PairGames = HashMap<(String, String), usize>;

// 探索する並び順の集団サイズ
const POPULATION: usize = 256;

// 5人卓を避けたいプレイヤーが5人卓に入った場合のコスト
const PRIORITY_COST: usize = 100;

fn games_between(games: &PairGames, a: &str, b: &str) -> usize {
    // ペアの登録順は不定なので両方向を確認
    let key = (a.to_string(), b.to_string());
    if let Some(&n) = games.get(&key) {
        return n;
    }
    let key = (b.to_string(), a.to_string());
    *games.get(&key).unwrap_or(&0)
}

// 1卓分のコスト 同卓経験の回数の合計 + 5人卓回避のペナルティ
fn table_cost(table: &[String], games: &PairGames, prioritized: &HashSet<String>) -> usize {
    let mut cost = 0;
    for i in 0..table.len() {
        for j in (i + 1)..table.len() {
            cost += games_between(games, &table[i], &table[j]);
        }
        if table.len() == 5 && prioritized.contains(&table[i]) {
            cost += PRIORITY_COST;
        }
    }
    cost
}

// 並び順全体のコスト 卓割りはcalc_table_sizesに従う
pub fn arrangement_cost(
    players: &[String],
    games: &PairGames,
    prioritized: &HashSet<String>,
) -> Result<usize, InvalidCount> {
    let sizes = calc_table_sizes(players.len())?;
    let mut cost = 0;
    let mut i = 0;
    for size in sizes {
        cost += table_cost(&players[i..i + size], games, prioritized);
        i += size;
    }
    Ok(cost)
}

// 同卓の重複が最小になる並び順を探索
// ランダムな並び順の集団から開始し, 2点交換の変異で改善を繰り返す
// コストが0になるか人数分の世代を回したら打ち切り
pub fn best_arrangement(
    players: &[String],
    games: &PairGames,
    prioritized: &HashSet<String>,
    seed: u64,
) -> Result<Vec<String>, InvalidCount> {
    let sizes = calc_table_sizes(players.len())?;

    let cost_of = |order: &[String]| {
        let mut cost = 0;
        let mut i = 0;
        for &size in sizes.iter() {
            cost += table_cost(&order[i..i + size], games, prioritized);
            i += size;
        }
        cost
    };

    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    let mut population: Vec<(usize, Vec<String>)> = (0..POPULATION)
        .map(|_| {
            let mut order = players.to_vec();
            order.shuffle(&mut rng);
            (cost_of(&order), order)
        })
        .collect();
    population.sort_by(|a, b| a.0.cmp(&b.0));

    let mut iteration = 0;
    while iteration < players.len() && population[0].0 > 0 {
        for i in 0..POPULATION {
            let mut order = population[i].1.clone();
            let a = rng.gen_range(0..order.len());
            let b = rng.gen_range(0..order.len());
            order.swap(a, b);
            population.push((cost_of(&order), order));
        }
        population.sort_by(|a, b| a.0.cmp(&b.0));
        population.truncate(POPULATION);
        iteration += 1;
    }

    Ok(population.remove(0).1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("P{}", i)).collect()
    }

    fn pair(a: &str, b: &str, n: usize) -> ((String, String), usize) {
        ((a.to_string(), b.to_string()), n)
    }

    #[test]
    fn test_arrangement_cost() {
        let players = names(9);
        let games: PairGames = vec![
            pair("P1", "P2", 3),  // 1卓目
            pair("P6", "P5", 2),  // 2卓目 逆順の登録も数える
            pair("P4", "P5", 10), // 別の卓なので数えない
        ]
        .into_iter()
        .collect();

        let none = HashSet::new();
        assert_eq!(Ok(5), arrangement_cost(&players, &games, &none));

        // 5人卓(P5..P9)に入った回避希望者はペナルティ
        let prioritized: HashSet<String> =
            vec!["P3".to_string(), "P5".to_string(), "P9".to_string()]
                .into_iter()
                .collect();
        assert_eq!(Ok(205), arrangement_cost(&players, &games, &prioritized));

        assert_eq!(
            Err(InvalidCount(6)),
            arrangement_cost(&names(6), &games, &none)
        );
    }

    #[test]
    fn test_best_arrangement() {
        let players = names(8);
        let games: PairGames = vec![pair("P1", "P2", 10)].into_iter().collect();
        let none = HashSet::new();

        let result = best_arrangement(&players, &games, &none, 0).unwrap();

        // 並び順は元のプレイヤーの置換
        let mut sorted = result.clone();
        sorted.sort();
        assert_eq!(names(8), sorted);

        // P1とP2は別の卓に分かれる
        assert_eq!(Ok(0), arrangement_cost(&result, &games, &none));
    }

    #[test]
    fn test_best_arrangement_invalid() {
        let games = PairGames::new();
        let none = HashSet::new();
        assert_eq!(
            Err(InvalidCount(7)),
            best_arrangement(&names(7), &games, &none, 0)
        );
    }
}
