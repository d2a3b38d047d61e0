//! HTTP client tests against local mock servers

use data_retrieval::{
    normalize_dex_response, CoinGeckoClient, DataRetrievalError, DexScreenerClient,
    SolanaRpcClient,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pepe_pairs() -> serde_json::Value {
    json!({
        "schemaVersion": "1.0.0",
        "pairs": [{
            "chainId": "ethereum",
            "dexId": "uniswap",
            "url": "https://dexscreener.com/ethereum/0xa43f",
            "pairAddress": "0xa43f",
            "baseToken": { "address": "0x6982", "name": "Pepe", "symbol": "PEPE" },
            "priceUsd": "0.000008123",
            "liquidity": { "usd": 12500000.5, "base": 1, "quote": 2 },
            "volume": { "h24": 3400000, "h6": 10 },
            "fdv": 3400000000u64
        }]
    })
}

#[tokio::test]
async fn test_search_route_for_symbols() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest/dex/search"))
        .and(query_param("q", "pepe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pepe_pairs()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DexScreenerClient::with_base_url(&server.uri()).unwrap();
    let response = client.fetch_pairs("pepe").await.unwrap();
    let snapshot = normalize_dex_response(&response).unwrap();

    assert_eq!(snapshot.symbol, "PEPE");
    assert_eq!(snapshot.dex, "uniswap");
    assert_eq!(snapshot.liquidity_usd, 12_500_000.5);
    assert!(client.health().is_healthy);
}

#[tokio::test]
async fn test_token_route_for_addresses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest/dex/tokens/0x6982508145454ce325ddbe47a25d4ec3d2311933"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pepe_pairs()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DexScreenerClient::with_base_url(&server.uri()).unwrap();
    let response = client
        .fetch_pairs("0x6982508145454ce325ddbe47a25d4ec3d2311933")
        .await
        .unwrap();

    assert_eq!(response.pairs.map(|p| p.len()), Some(1));
}

#[tokio::test]
async fn test_no_pairs_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest/dex/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "schemaVersion": "1.0.0", "pairs": null })),
        )
        .mount(&server)
        .await;

    let client = DexScreenerClient::with_base_url(&server.uri()).unwrap();
    let response = client.fetch_pairs("nosuchtoken").await.unwrap();

    assert!(normalize_dex_response(&response).is_none());
}

#[tokio::test]
async fn test_upstream_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest/dex/search"))
        .and(query_param("q", "busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest/dex/search"))
        .and(query_param("q", "down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DexScreenerClient::with_base_url(&server.uri()).unwrap();

    match client.fetch_pairs("busy").await {
        Err(DataRetrievalError::RateLimit { retry_after, .. }) => assert_eq!(retry_after, Some(30)),
        other => panic!("expected rate limit, got {:?}", other),
    }

    let err = client.fetch_pairs("down").await.unwrap_err();
    assert_eq!(err.to_string(), "API request failed: Dexscreener 503");

    let health = client.health();
    assert!(!health.is_healthy);
    assert_eq!(health.success_rate, 0.0);
}

#[tokio::test]
async fn test_solana_balance_in_sol() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "jsonrpc": "2.0", "method": "getBalance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "context": { "slot": 1 }, "value": 2_500_000_000u64 }
        })))
        .mount(&server)
        .await;

    let client = SolanaRpcClient::new(&server.uri()).unwrap();
    let balance = client
        .get_balance("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM")
        .await
        .unwrap();

    assert_eq!(balance.lamports, 2_500_000_000);
    assert_eq!(balance.sol, Decimal::new(25, 1));
}

#[tokio::test]
async fn test_solana_signatures_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getSignaturesForAddress",
            "params": ["9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", { "limit": 2 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [
                { "signature": "5h6x", "slot": 10, "err": null },
                { "signature": "3k9q", "slot": 9, "err": null }
            ]
        })))
        .mount(&server)
        .await;

    let client = SolanaRpcClient::new(&server.uri()).unwrap();
    let sigs = client
        .get_signatures("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", 2)
        .await
        .unwrap();

    assert_eq!(sigs.len(), 2);
    assert_eq!(sigs[0]["signature"], "5h6x");
}

#[tokio::test]
async fn test_solana_rpc_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getBalance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid param: WrongSize" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getSignaturesForAddress" })))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = SolanaRpcClient::new(&server.uri()).unwrap();

    let err = client.get_balance("short").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid param: WrongSize");

    let err = client.get_signatures("short", 10).await.unwrap_err();
    assert_eq!(err.to_string(), "RPC 502: bad gateway");
}

#[tokio::test]
async fn test_coingecko_simple_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin,ethereum,solana"))
        .and(query_param("vs_currencies", "usd"))
        .and(query_param("include_24hr_change", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bitcoin": { "usd": 67000.0, "usd_24h_change": 1.2 },
            "ethereum": { "usd": 3500.0, "usd_24h_change": -0.4 },
            "solana": { "usd": 150.0, "usd_24h_change": 3.1 }
        })))
        .mount(&server)
        .await;

    let client = CoinGeckoClient::with_base_url(&server.uri(), None).unwrap();
    let prices = client
        .get_simple_prices(&["bitcoin", "ethereum", "solana"], "USD")
        .await
        .unwrap();

    assert_eq!(prices["solana"]["usd"], 150.0);
    assert!(client.health().is_healthy);
}
