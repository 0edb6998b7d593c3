//! Integration tests for UNIVERSE GAME

use serde_json::{json, Value};
use universe_game::grid::Grid;
use universe_game::protocol::{handle_line, serve, AppState};
use universe_game::{Config, GameSession, PatternMatch};

fn session_with(cells: &[(usize, usize)]) -> GameSession {
    GameSession::with_grid(Config::default(), Grid::from_cells(cells))
}

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
    .to_string()
}

fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_full_simulation_cycle() {
    let mut session = GameSession::new_with_seed(Config::default(), 12345);
    let initial = session.initial_population();

    let turns = session.run();
    assert_eq!(turns, 20);
    assert_eq!(session.turn, 20);

    // Conservation over an unedited run
    let stats = session.statistics();
    assert_eq!(
        stats.net_change(),
        session.population() as i64 - initial as i64
    );
    assert!(stats.max_alive >= stats.min_alive);
}

#[test]
fn test_reproducibility() {
    let mut a = GameSession::new_with_seed(Config::default(), 99999);
    let mut b = GameSession::new_with_seed(Config::default(), 99999);
    assert_eq!(a.grid, b.grid);

    a.run();
    b.run();

    assert_eq!(a.grid, b.grid);
    assert_eq!(a.pattern_log, b.pattern_log);

    a.reset();
    b.reset();
    assert_eq!(a.grid, b.grid);
}

#[test]
fn test_step_after_limit_is_idempotent() {
    let mut session = GameSession::new_with_seed(Config::default(), 4);
    session.run();
    let grid = session.grid;
    let births = session.statistics().total_births;

    for _ in 0..3 {
        let outcome = serde_json::to_value(session.step()).unwrap();
        assert_eq!(
            outcome,
            json!({"status": "game_finished", "message": "Game has reached maximum turns"})
        );
    }
    assert_eq!(session.turn, 20);
    assert_eq!(session.grid, grid);
    assert_eq!(session.statistics().total_births, births);
}

#[test]
fn test_blinker_session() {
    let mut session = session_with(&[(5, 4), (5, 5), (5, 6)]);

    session.step();
    assert!(session.grid.get(4, 5) && session.grid.get(6, 5));
    session.step();
    assert!(session.grid.get(5, 4) && session.grid.get(5, 6));
    assert!(session.pattern_log.is_empty());

    // Oscillators need three recorded turns
    session.step();
    let last = session.pattern_log.last().unwrap();
    assert_eq!(last.turn, 3);
    assert_eq!(last.patterns, vec![PatternMatch::Oscillator { period: 2 }]);
}

#[test]
fn test_flip_is_its_own_inverse() {
    let mut session = GameSession::new_with_seed(Config::default(), 8);
    let before = session.grid;

    session.flip_cell(3, 17).unwrap();
    assert_ne!(session.grid, before);
    session.flip_cell(3, 17).unwrap();
    assert_eq!(session.grid, before);

    assert!(session.flip_cell(-1, 0).is_err());
    assert!(session.flip_cell(0, 20).is_err());
    assert_eq!(session.grid, before);
}

#[test]
fn test_add_block_replaces_board() {
    let mut session = GameSession::new_with_seed(Config::default(), 5);
    session.add_pattern("block", 5, 5).unwrap();

    assert_eq!(session.grid, Grid::from_cells(&[(5, 5), (5, 6), (6, 5), (6, 6)]));
}

#[test]
fn test_reset_then_analytics() {
    let mut session = session_with(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
    session.step();
    session.step();
    assert!(!session.pattern_log.is_empty());

    session.reset();
    let analytics = serde_json::to_value(session.analytics()).unwrap();
    assert_eq!(analytics["total_turns"], 0);
    assert_eq!(analytics["all_patterns"], json!([]));
    assert_eq!(analytics["population_history"], json!([]));
}

#[tokio::test]
async fn test_protocol_session() {
    let state = AppState::with_session(session_with(&[]));
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}).to_string(),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}).to_string(),
        tool_call(3, "add_pattern", json!({"pattern": "blinker", "x": 5, "y": 4})),
        tool_call(4, "step_universe", json!({})),
        tool_call(5, "step_universe", json!({})),
        tool_call(6, "step_universe", json!({})),
        tool_call(7, "get_universe_state", json!({})),
        json!({"jsonrpc": "2.0", "id": 8, "method": "shutdown"}).to_string(),
    ]
    .join("\n");

    let mut output = Vec::new();
    serve(&state, input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 8);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "universe_game_visual");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 6);

    let added = tool_payload(&responses[2]);
    assert_eq!(added["message"], "Added blinker pattern at (5, 4)");
    assert_eq!(added["summary"]["alive_cells"], 3);

    let third = tool_payload(&responses[5]);
    assert_eq!(third["turn"], 3);
    assert_eq!(
        third["recent_patterns"],
        json!([{"turn": 3, "patterns": [{"type": "2-period_oscillator", "period": 2}]}])
    );

    let state_view = tool_payload(&responses[6]);
    assert_eq!(state_view["turn"], 3);
    assert_eq!(state_view["grid_size"], 20);
    assert_eq!(state_view["universe"][4][5], 1);
    assert_eq!(state_view["universe"][6][5], 1);
    assert_eq!(state_view["universe"][5][4], 0);

    assert_eq!(responses[7]["error"]["code"], -32601);
    assert_eq!(responses[7]["id"], 8);
}

#[tokio::test]
async fn test_protocol_reports_tool_mistakes_as_results() {
    let state = AppState::with_session(session_with(&[(0, 0)]));

    let line = tool_call(1, "flip_cell", json!({"x": 20, "y": 0}));
    let response = handle_line(&state, &line).await.unwrap();
    assert!(!response.is_error());
    let response = serde_json::to_value(response).unwrap();
    assert_eq!(tool_payload(&response)["message"], "Invalid coordinates: (20, 0)");

    let line = tool_call(2, "nonexistent", json!({}));
    let response = serde_json::to_value(handle_line(&state, &line).await.unwrap()).unwrap();
    assert_eq!(tool_payload(&response), json!({"error": "Unknown tool: nonexistent"}));

    let response = handle_line(&state, r#"{"method": "tools/list"}"#).await.unwrap();
    assert_eq!(response.id, json!("unknown"));

    assert_eq!(state.session.lock().await.population(), 1);
}
