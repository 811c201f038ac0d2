use super::*;

// /addgameに投稿されるスコア1件分
// UI側でゆれていたフィールド名(score/RawScore, player/Name)はこの形に正規化する
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String, // プレイヤー名またはID
    pub score: Point,   // 素点
    #[serde(default)]
    pub chombos: usize, // チョンボ回数
}

// 順位確定後の1人分の集計結果
#[derive(Debug, Clone, Serialize)]
pub struct RankedScore {
    pub player: String,
    pub rank: usize,      // 1始まり
    pub raw_score: Point, // 素点
    pub score: f64,       // ウマ・チョンボ適用後の確定スコア
}

// サーバ応答の共通形式 {"status":0} / {"status":1,"error":"..."}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            status: 0,
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            status: 1,
            error: Some(msg.to_string()),
        }
    }
}

#[test]
fn test_payload_format() {
    let entry = ScoreEntry {
        player: "Akagi".to_string(),
        score: 32000,
        chombos: 1,
    };
    assert_eq!(
        r#"{"player":"Akagi","score":32000,"chombos":1}"#,
        serde_json::to_string(&entry).unwrap()
    );

    // chombos省略時は0
    let entry: ScoreEntry = serde_json::from_str(r#"{"player":"Washizu","score":18000}"#).unwrap();
    assert_eq!(0, entry.chombos);

    assert_eq!(r#"{"status":0}"#, serde_json::to_string(&Status::ok()).unwrap());
    assert_eq!(
        r#"{"status":1,"error":"Please enter some scores"}"#,
        serde_json::to_string(&Status::error("Please enter some scores")).unwrap()
    );
}
