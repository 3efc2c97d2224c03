//! # Core API 端到端测试
//!
//! 用脚本化的测试替身 Provider 在随机端口拉起完整服务
//! (与生产共用 `build_app`)，覆盖两个接口的成功路径与
//! 400 / 404 / 500 / 502 各类错误映射。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tokio::net::TcpListener;

use kassou_api::server::{AppState, build_app};
use kassou_core::market::entity::Candle;
use kassou_core::market::error::MarketError;
use kassou_core::market::port::TimeSeriesProvider;

// ============================================================
//  测试替身
// ============================================================

/// 按 ticker 分流固定场景的行情提供者
struct ScriptedProvider;

/// 一根月度 K 线，日期取该月一号零点
fn monthly_candle(year: i32, month: u32, close: Decimal) -> Candle {
    Candle {
        date_time: Utc
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .unwrap(),
        open: close - dec!(1),
        high: close + dec!(2),
        low: close - dec!(2),
        close,
        volume: dec!(1_000_000),
        adjusted_close: close,
        output: None,
    }
}

/// 十二个月的确定性序列，首尾收盘价为 100 / 130
fn aapl_series() -> Vec<Candle> {
    let closes = [
        dec!(100),
        dec!(102),
        dec!(105),
        dec!(107),
        dec!(110),
        dec!(113),
        dec!(116),
        dec!(119),
        dec!(122),
        dec!(125),
        dec!(128),
        dec!(130),
    ];
    (1u32..).zip(closes).map(|(month, close)| monthly_candle(2025, month, close)).collect()
}

#[async_trait]
impl TimeSeriesProvider for ScriptedProvider {
    async fn fetch_trailing_year(&self, ticker: &str) -> Result<Vec<Candle>, MarketError> {
        match ticker {
            "AAPL" => Ok(aapl_series()),
            "EMPTY" => Ok(Vec::new()),
            "SHORT" => Ok(vec![monthly_candle(2025, 8, dec!(100))]),
            "DOWN" => Err(MarketError::Network("connection refused".to_string())),
            _ => Err(MarketError::NotFound),
        }
    }
}

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server() -> String {
    let state = AppState {
        provider: Arc::new(ScriptedProvider),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let addr = format!("http://127.0.0.1:{}", port);

    let app = build_app(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // 稍微等待服务器启动
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    addr
}

#[tokio::test]
async fn test_core_api_workflow() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").try_init().ok();

    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    // ============================================
    // Case 1: GetYahoo 成功 (裸数组 + camelCase 字段)
    // ============================================
    let res = client
        .get(format!("{}/api/Core/GetYahoo", base_url))
        .query(&[("ticker", "AAPL")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert!(rows[0].get("dateTime").is_some(), "线上格式必须是 camelCase");
    assert!(rows[0].get("adjustedClose").is_some());
    assert!(rows[0]["output"].is_null(), "服务端抓取结果的 output 恒为 null");
    assert_eq!(rows[0]["close"].as_f64().unwrap(), 100.0);
    assert_eq!(rows[11]["close"].as_f64().unwrap(), 130.0);

    // ============================================
    // Case 2: GetYahoo 缺少 / 空白 ticker (400)
    // ============================================
    let res = client.get(format!("{}/api/Core/GetYahoo", base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("ticker is required"));

    let res = client
        .get(format!("{}/api/Core/GetYahoo", base_url))
        .query(&[("ticker", "   ")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // ============================================
    // Case 3: GetYahoo 查无此代码 (404)
    // ============================================
    let res = client
        .get(format!("{}/api/Core/GetYahoo", base_url))
        .query(&[("ticker", "NOPE")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("No data found for the requested ticker"));

    // ============================================
    // Case 4: GetYahoo 上游返回空序列 (同样映射为 404)
    // ============================================
    let res = client
        .get(format!("{}/api/Core/GetYahoo", base_url))
        .query(&[("ticker", "EMPTY")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // ============================================
    // Case 5: GetYahoo 上游失败 (502, 不与 404 混淆)
    // ============================================
    let res = client
        .get(format!("{}/api/Core/GetYahoo", base_url))
        .query(&[("ticker", "DOWN")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["error"], json!("Network error: connection refused"));

    // ============================================
    // Case 6: PostYahoo 成功 (输出与输入等长, 首尾命中锚点)
    // ============================================
    let res = client
        .post(format!("{}/api/Core/PostYahoo", base_url))
        .json(&json!({
            "ticker": "AAPL",
            "leftPoint": 100.0,
            "rightPoint": 130.0
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 12);
    assert!(points[0].get("timeLine").is_some(), "线上格式必须是 camelCase");
    assert_eq!(points[0]["value"].as_f64().unwrap(), 100.0);
    assert_eq!(points[11]["value"].as_f64().unwrap(), 130.0);

    // ============================================
    // Case 7: PostYahoo 空白 ticker (400)
    // ============================================
    let res = client
        .post(format!("{}/api/Core/PostYahoo", base_url))
        .json(&json!({
            "ticker": "  ",
            "leftPoint": 100.0,
            "rightPoint": 130.0
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // ============================================
    // Case 8: PostYahoo 锚点过低 (400, 字段级文案)
    // ============================================
    let res = client
        .post(format!("{}/api/Core/PostYahoo", base_url))
        .json(&json!({
            "ticker": "AAPL",
            "leftPoint": 50.0,
            "rightPoint": 60.0
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Boundary validation failed"));
    assert_eq!(
        body["fields"]["leftPoint"],
        json!("Left point should be bigger than first graph amount")
    );
    assert_eq!(
        body["fields"]["rightPoint"],
        json!("Right point should be bigger than last graph amount")
    );

    // ============================================
    // Case 9: PostYahoo 序列过短 (500, 细节不透传)
    // ============================================
    let res = client
        .post(format!("{}/api/Core/PostYahoo", base_url))
        .json(&json!({
            "ticker": "SHORT",
            "leftPoint": 100.0,
            "rightPoint": 130.0
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["error"], json!("Internal server error"));

    Ok(())
}
