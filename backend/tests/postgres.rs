//! Runs the results query against a real PostgreSQL server.
//!
//! `DATABASE_URL=postgres://... cargo test -p tally-server -- --ignored`
//!
//! Fixtures live in temporary tables on a single pooled connection, so the
//! target database is left untouched.

use sqlx::postgres::PgPoolOptions;
use tally_server::store::{PgStore, ResultsStore};
use tally_shared::models::{OptionTally, RoundId};
use tally_shared::tally::is_ranked;

const ROUND_1: &str = "11111111-1111-1111-1111-111111111111";
const ROUND_2: &str = "22222222-2222-2222-2222-222222222222";
const ROUND_3: &str = "33333333-3333-3333-3333-333333333333";

const FIXTURES: &[&str] = &[
    "CREATE TEMP TABLE options (id uuid PRIMARY KEY, round_id uuid NOT NULL, label text NOT NULL)",
    "CREATE TEMP TABLE votes (id bigserial PRIMARY KEY, option_id uuid NOT NULL REFERENCES options(id))",
    "INSERT INTO options (id, round_id, label) VALUES
        ('aaaaaaaa-0000-0000-0000-000000000001', '11111111-1111-1111-1111-111111111111', 'A'),
        ('aaaaaaaa-0000-0000-0000-000000000002', '11111111-1111-1111-1111-111111111111', 'B'),
        ('aaaaaaaa-0000-0000-0000-000000000003', '11111111-1111-1111-1111-111111111111', 'C'),
        ('bbbbbbbb-0000-0000-0000-000000000001', '33333333-3333-3333-3333-333333333333', 'X'),
        ('bbbbbbbb-0000-0000-0000-000000000002', '33333333-3333-3333-3333-333333333333', 'Y')",
    "INSERT INTO votes (option_id) VALUES
        ('aaaaaaaa-0000-0000-0000-000000000001'),
        ('aaaaaaaa-0000-0000-0000-000000000003'),
        ('aaaaaaaa-0000-0000-0000-000000000001')",
];

async fn store_with_fixtures() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    for statement in FIXTURES {
        sqlx::query(statement).execute(&pool).await.expect("load fixtures");
    }
    PgStore::from_pool(pool)
}

fn round(id: &str) -> RoundId {
    RoundId::parse(id).unwrap()
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn tallies_round_with_votes() {
    let store = store_with_fixtures().await;
    let rows = store.round_results(&round(ROUND_1)).await.unwrap();
    assert_eq!(
        rows,
        vec![
            OptionTally::new("aaaaaaaa-0000-0000-0000-000000000001", "A", 2),
            OptionTally::new("aaaaaaaa-0000-0000-0000-000000000003", "C", 1),
            OptionTally::new("aaaaaaaa-0000-0000-0000-000000000002", "B", 0),
        ]
    );
    assert!(is_ranked(&rows));
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn zero_vote_options_are_listed() {
    let store = store_with_fixtures().await;
    let rows = store.round_results(&round(ROUND_3)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.votes == 0));
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn unknown_rounds_are_empty() {
    let store = store_with_fixtures().await;
    assert!(store.round_results(&round(ROUND_2)).await.unwrap().is_empty());
    // Not a uuid at all: still just no matching options.
    assert!(store.round_results(&round("r2")).await.unwrap().is_empty());
    assert!(store.round_results(&round("r1'OR'1'='1")).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn sql_in_round_id_is_bound_as_text() {
    let store = store_with_fixtures().await;
    for id in [
        "r1'OR'1'='1",
        "' OR '1'='1",
        "11111111-1111-1111-1111-111111111111' OR 1=1 --",
        "r1'; DROP TABLE votes; --",
    ] {
        assert!(store.round_results(&round(id)).await.unwrap().is_empty(), "{id}");
    }
    // The votes table is still there and intact.
    let rows = store.round_results(&round(ROUND_1)).await.unwrap();
    assert_eq!(rows.iter().map(|r| r.votes).sum::<i64>(), 3);
}
