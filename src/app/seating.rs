use std::collections::{HashMap, HashSet};

use crate::error;
use crate::seating::{assign_tables, best_arrangement, Table};
use crate::util::misc::*;

// 席決めモード
#[derive(Debug)]
pub struct SeatingApp {
    args: Vec<String>,
    json: bool,
    seed: Option<u64>,
}

impl SeatingApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            json: false,
            seed: None,
        }
    }

    pub fn run(&mut self) {
        let mut input = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-j" => self.json = true,
                "-s" => self.seed = Some(next_value(&mut it, s)),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !input.is_empty() {
                        error!("multiple player lists are not allowed");
                        return;
                    }
                    input = s.clone();
                }
            }
        }

        if input.is_empty() {
            print_usage();
            return;
        }

        // 数値のみの場合は人数としてプレースホルダ名を生成
        let players: Vec<String> = match input.parse::<usize>() {
            Ok(n) => (1..=n).map(|i| format!("Player{}", i)).collect(),
            Err(_) => input.split(',').map(|s| s.trim().to_string()).collect(),
        };

        // シード指定時は対戦履歴なしで並び順をシャッフル
        let players = if let Some(seed) = self.seed {
            match best_arrangement(&players, &HashMap::new(), &HashSet::new(), seed) {
                Ok(players) => players,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            }
        } else {
            players
        };

        match assign_tables(&players) {
            Ok(tables) => self.print_tables(&tables),
            Err(e) => error!("{}", e),
        }
    }

    fn print_tables(&self, tables: &[Table]) {
        if self.json {
            println!("{}", serde_json::to_string(tables).unwrap());
            return;
        }

        for (i, table) in tables.iter().enumerate() {
            println!("TABLE {}", i + 1);
            for seat in &table.seats {
                println!("  {} {}", seat.wind, seat.player);
            }
        }
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run S PLAYERS [-s SEED] [-j]
Players
    a comma-separated list of names, or a bare player count
Options
    -s: shuffle the seating order with the given random seed
    -j: print the result as json
"
    );
}
