#![allow(dead_code)]

use agentfast_api::{build_router, ApiState, Registry, ServerConfig, SettingsStore};
use axum_test::TestServer;

/// Server over the fixture data
pub fn server() -> TestServer {
    server_with(Registry::seeded())
}

/// Server over a caller-built registry
pub fn server_with(registry: Registry) -> TestServer {
    let state = ApiState::new(registry, SettingsStore::default());
    TestServer::new(build_router(state, &ServerConfig::default())).unwrap()
}

/// `prefix-digits`
pub fn is_generated_id(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .map_or(false, |digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Minimal RFC 4180 reader: splits records and honours quoted cells.
pub fn parse_csv(body: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                cell.push('"');
            }
            ('"', true) => quoted = false,
            ('"', false) if cell.is_empty() => quoted = true,
            (',', false) => row.push(std::mem::take(&mut cell)),
            ('\n', false) => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            ('\r', false) => {}
            (c, _) => cell.push(c),
        }
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }
    rows
}
