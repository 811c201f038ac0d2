use crate::error;
use crate::model::*;
use crate::score::score_game;
use crate::util::misc::*;

// ゲーム結果の集計モード
#[derive(Debug)]
pub struct GameApp {
    args: Vec<String>,
    json: bool,
    increment: Point,
}

impl GameApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            json: false,
            increment: 0,
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-j" => self.json = true,
                "-i" => self.increment = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !file_path.is_empty() {
                        error!("multiple files are not allowed");
                        return;
                    }
                    file_path = s.clone();
                }
            }
        }

        if file_path.is_empty() {
            print_usage();
            return;
        }

        if let Err(e) = self.process_file(&file_path) {
            error!("{}", e);
        }
    }

    fn process_file(&self, file_path: &str) -> Res {
        let data = std::fs::read_to_string(file_path)?;
        let entries: Vec<ScoreEntry> = serde_json::from_str(&data)?;

        match score_game(&entries, self.increment) {
            Ok(results) => {
                if self.json {
                    println!("{}", serde_json::to_string(&results).unwrap());
                } else {
                    for r in &results {
                        println!("{}. {} {} ({:+.1})", r.rank, r.player, r.raw_score, r.score);
                    }
                }
            }
            Err(e) => {
                // 検証エラーはUIにそのまま表示される想定
                if self.json {
                    println!("{}", serde_json::to_string(&Status::error(&e.to_string())).unwrap());
                } else {
                    error!("{}", e);
                }
            }
        }
        Ok(())
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run G FILE [-i INCREMENT] [-j]
File
    a json array of score entries ({{player, score, chombos}} objects)
Options
    -i: required increment for unused points (0 to disable)
    -j: print the result (or the validation error) as json
"
    );
}
