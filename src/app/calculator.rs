use std::fs::File;
use std::io::{self, BufRead};

use crate::error;
use crate::model::*;
use crate::score::{calc_score, HandScore};
use crate::util::misc::*;

// 点数計算モード
#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
    json: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
            json: false,
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-j" => self.json = true,
                "-f" => file_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if (file_path.is_empty() && exp.is_empty()) || (!file_path.is_empty() && !exp.is_empty()) {
            print_usage();
            return;
        }

        if !exp.is_empty() {
            if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
                return;
            }
        }

        if !file_path.is_empty() {
            if let Err(e) = self.run_from_file(&file_path) {
                error!("{}", e);
            }
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.flatten() {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail, self.json);
        calculator.parse(exp)?;
        calculator.run();
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    json: bool,
    // calc_score params
    fu: usize,
    han: usize,
    is_dealer: bool,
    is_tsumo: bool,
    honba: usize,
    // score verify
    verify: bool,
    expected: Point,
}

impl Calculator {
    fn new(detail: bool, json: bool) -> Self {
        Self {
            detail,
            json,
            fu: 0,
            han: 0,
            is_dealer: false,
            is_tsumo: false,
            honba: 0,
            verify: false,
            expected: 0,
        }
    }

    // 式の形式: FU,HAN[,d][,t][,bN][=TOTAL]
    // d: 親, t: ツモ, bN: N本場, =TOTAL: 検証用の期待合計点
    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').collect::<Vec<&str>>()[0]; // コメント削除
        let exps: Vec<&str> = input.split('=').collect();
        if exps.len() > 2 {
            Err(format!("multiple expected scores: {}", input))?;
        }
        if exps.len() == 2 {
            self.expected = exps[1].parse()?;
            self.verify = true;
        }

        let fields: Vec<&str> = exps[0].split(',').collect();
        if fields.len() < 2 {
            Err(format!("fu and han required: {}", input))?;
        }
        self.fu = fields[0].parse()?;
        self.han = fields[1].parse()?;
        for f in &fields[2..] {
            match *f {
                "d" => self.is_dealer = true,
                "t" => self.is_tsumo = true,
                "" => {}
                _ if f.starts_with('b') => self.honba = f[1..].parse()?,
                _ => Err(format!("invalid flag: {}", f))?,
            }
        }

        if self.detail {
            println!("{:?}", self);
        }

        Ok(())
    }

    fn run(&self) -> Verify {
        let score = calc_score(self.fu, self.han, self.is_dealer, self.is_tsumo, self.honba);
        let verify = match score {
            Some(score) => {
                self.print_score(&score);
                if self.verify {
                    if score.total == self.expected {
                        Verify::Ok
                    } else {
                        Verify::Error
                    }
                } else {
                    Verify::Skip
                }
            }
            None => {
                println!("no score");
                if self.verify {
                    // 成立しない手は期待値0で検証
                    if self.expected == 0 {
                        Verify::Ok
                    } else {
                        Verify::Error
                    }
                } else {
                    Verify::Skip
                }
            }
        };
        println!("verify: {:?}", verify);
        verify
    }

    fn print_score(&self, score: &HandScore) {
        if self.json {
            println!("{}", serde_json::to_string(score).unwrap());
            return;
        }

        if score.title.is_empty() {
            println!("fu: {}, han: {}, total: {}", self.fu, self.han, score.total);
        } else {
            println!(
                "fu: {}, han: {}, total: {}, {}",
                self.fu, self.han, score.total, score.title
            );
        }
        for p in &score.payments {
            println!("  {}", p);
        }
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d] [-j]
    $ cargo run C -f FILE [-d] [-j]
Expression
    FU,HAN[,d][,t][,bN][=TOTAL] (d: dealer, t: tsumo, bN: N repeat counters)
Options
    -d: print debug info
    -j: print the result as json
    -f: read expressions from file instead of a commandline expression
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/score_table.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.flatten() {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false, false);
            calculator.parse(&e).unwrap();
            assert_ne!(Verify::Error, calculator.run());
        }
    }
}
