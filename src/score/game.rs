use std::collections::HashSet;
use std::fmt;

use crate::model::*;

// レーティング変動の調整係数
const ADJ_EVENT: f64 = 0.5;
const RATING_SCALE: f64 = 40.0;
const ADJ_PLAYER_STEP: f64 = 0.008;
const ADJ_PLAYER_FLOOR: f64 = 0.2;

// ゲーム1件分の検証エラー そのままUIに表示される
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NoScores,
    WrongPlayerCount(usize),
    MissingName,
    DuplicatePlayer(String),
    BadTotal { total: Point, expected: Point },
    UnusedPointsNotMultiple(Point),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoScores => write!(f, "Please enter some scores"),
            GameError::WrongPlayerCount(_) => write!(f, "Please enter 4 or 5 scores"),
            GameError::MissingName => write!(f, "Please enter all player names"),
            GameError::DuplicatePlayer(_) => write!(f, "All players must be distinct"),
            GameError::BadTotal { expected, .. } => {
                write!(f, "Scores do not add up to {}", expected)
            }
            GameError::UnusedPointsNotMultiple(inc) => {
                write!(f, "Unused points must be a multiple of {}", inc)
            }
        }
    }
}

impl std::error::Error for GameError {}

// プレイヤー数と順位(0始まり)に応じたウマ
pub fn uma(player_count: usize, rank: usize) -> f64 {
    if player_count == 5 {
        UMA_5P[rank]
    } else {
        UMA_4P[rank]
    }
}

// 素点から確定スコアを計算 (1000点=1ポイント, 25000点返し + ウマ)
pub fn adjusted_score(raw: Point, player_count: usize, rank: usize) -> f64 {
    raw as f64 / 1000.0 - 25.0 + uma(player_count, rank)
}

// チョンボを適用した1人分の確定スコア
pub fn final_score(entry: &ScoreEntry, player_count: usize, rank: usize) -> f64 {
    adjusted_score(entry.score, player_count, rank) - entry.chombos as f64 * CHOMBO_PENALTY
}

// ゲーム1件分のスコアの整合性チェック
// unused_incrementは清算されなかった点数に要求される単位 (0で無効)
pub fn validate_game(entries: &[ScoreEntry], unused_increment: Point) -> Result<(), GameError> {
    if entries.is_empty() {
        return Err(GameError::NoScores);
    }

    let mut names = HashSet::new();
    let mut total = 0;
    let mut real_players = 0;
    for e in entries {
        if e.player.is_empty() {
            return Err(GameError::MissingName);
        }
        if !names.insert(e.player.as_str()) {
            return Err(GameError::DuplicatePlayer(e.player.clone()));
        }
        total += e.score;
        if e.player == UNUSED_POINTS_PLAYER {
            if unused_increment > 0 && e.score % unused_increment != 0 {
                return Err(GameError::UnusedPointsNotMultiple(unused_increment));
            }
        } else {
            real_players += 1;
        }
    }

    if real_players < 4 || real_players > 5 {
        return Err(GameError::WrongPlayerCount(real_players));
    }

    let expected = real_players as Point * STARTING_POINTS;
    if total != expected {
        return Err(GameError::BadTotal { total, expected });
    }

    Ok(())
}

// 順位決定のためのソート 素点の降順で清算されなかった点数は常に最下位
pub fn rank_entries(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| {
        let ka = (a.player != UNUSED_POINTS_PLAYER, a.score);
        let kb = (b.player != UNUSED_POINTS_PLAYER, b.score);
        kb.cmp(&ka)
    });
}

// 検証済みのスコアから順位と確定スコアを計算
pub fn score_game(
    entries: &[ScoreEntry],
    unused_increment: Point,
) -> Result<Vec<RankedScore>, GameError> {
    validate_game(entries, unused_increment)?;

    let mut entries = entries.to_vec();
    rank_entries(&mut entries);

    let real_players = entries
        .iter()
        .filter(|e| e.player != UNUSED_POINTS_PLAYER)
        .count();
    let results = entries
        .iter()
        .enumerate()
        .map(|(rank, e)| RankedScore {
            player: e.player.clone(),
            rank: rank + 1,
            raw_score: e.score,
            score: if e.player == UNUSED_POINTS_PLAYER {
                0.0
            } else {
                final_score(e, real_players, rank)
            },
        })
        .collect();
    Ok(results)
}

// 対戦相手との実力差を考慮したレーティング変動
// ratingsは順位順の現在レーティング, games_playedは対象者の過去のゲーム数
pub fn delta_rating(ratings: &[f64], rank: usize, games_played: usize) -> f64 {
    let n = ratings.len();
    let total_opp: f64 = ratings
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != rank)
        .map(|(_, &r)| r)
        .sum();
    let avg_opp = total_opp / (n - 1) as f64;
    let adj = (1.0 - games_played as f64 * ADJ_PLAYER_STEP).max(ADJ_PLAYER_FLOOR);
    (uma(n, rank) + ADJ_EVENT * (avg_opp - ratings[rank]) / RATING_SCALE) * adj
}

#[cfg(test)]
fn entry(player: &str, score: Point) -> ScoreEntry {
    ScoreEntry {
        player: player.to_string(),
        score,
        chombos: 0,
    }
}

#[test]
fn test_adjusted_score() {
    // 25000点持ち25000点返しなのでウマのみが残る
    assert_eq!(15.0, adjusted_score(25000, 4, 0));
    assert_eq!(-15.0, adjusted_score(25000, 4, 3));
    assert_eq!(0.0, adjusted_score(25000, 5, 2));
    assert_eq!(22.0, adjusted_score(32000, 4, 0));

    let e = ScoreEntry {
        player: "Akagi".to_string(),
        score: 32000,
        chombos: 2,
    };
    assert_eq!(6.0, final_score(&e, 4, 0));
}

#[test]
fn test_validate_game() {
    let ok = vec![
        entry("a", 32000),
        entry("b", 28000),
        entry("c", 22000),
        entry("d", 18000),
    ];
    assert_eq!(Ok(()), validate_game(&ok, 0));

    assert_eq!(Err(GameError::NoScores), validate_game(&[], 0));
    assert_eq!(
        Err(GameError::WrongPlayerCount(3)),
        validate_game(&ok[..3], 0)
    );

    let mut dup = ok.clone();
    dup[1].player = "a".to_string();
    assert_eq!(
        Err(GameError::DuplicatePlayer("a".to_string())),
        validate_game(&dup, 0)
    );

    let mut unnamed = ok.clone();
    unnamed[2].player = "".to_string();
    assert_eq!(Err(GameError::MissingName), validate_game(&unnamed, 0));

    let mut short = ok.clone();
    short[0].score = 31000;
    assert_eq!(
        Err(GameError::BadTotal {
            total: 99000,
            expected: 100000,
        }),
        validate_game(&short, 0)
    );

    // 清算されなかった点数は頭数に入らない
    let mut unused = ok.clone();
    unused[0].score = 30500;
    unused.push(entry(UNUSED_POINTS_PLAYER, 1500));
    assert_eq!(Ok(()), validate_game(&unused, 500));
    assert_eq!(
        Err(GameError::UnusedPointsNotMultiple(1000)),
        validate_game(&unused, 1000)
    );
}

#[test]
fn test_score_game() {
    let entries = vec![
        entry("c", 22000),
        entry(UNUSED_POINTS_PLAYER, 1500),
        entry("a", 30500),
        entry("b", 28000),
        entry("d", 18000),
    ];
    let results = score_game(&entries, 500).unwrap();

    let players: Vec<&str> = results.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(vec!["a", "b", "c", "d", UNUSED_POINTS_PLAYER], players);
    assert_eq!(vec![1, 2, 3, 4, 5], results.iter().map(|r| r.rank).collect::<Vec<_>>());

    // 4人分のウマで計算され, 清算されなかった点数のスコアは常に0
    assert_eq!(30.5 - 25.0 + 15.0, results[0].score);
    assert_eq!(18.0 - 25.0 - 15.0, results[3].score);
    assert_eq!(0.0, results[4].score);
}

#[test]
fn test_delta_rating() {
    // 全員同レートなら実力差の項が消えてウマ * 補正係数のみ
    let ratings = [1200.0; 4];
    assert_eq!(15.0, delta_rating(&ratings, 0, 0));
    assert!((delta_rating(&ratings, 0, 50) - 15.0 * 0.6).abs() < 1e-9);

    // 補正係数は0.2を下回らない
    assert_eq!(15.0 * 0.2, delta_rating(&ratings, 0, 1000));

    // 自分より強い相手に勝つと変動は大きくなる
    let ratings = [1000.0, 1400.0, 1400.0, 1400.0];
    assert!(delta_rating(&ratings, 0, 0) > 15.0);
}
