use sqlx::PgPool;
use tally_shared::models::{OptionTally, RoundId};

/// Identifiers are compared and returned as text so the service does not
/// care which key type the schema uses.
pub const ROUND_RESULTS_SQL: &str = "
    SELECT o.id::text AS option_id, o.label, COUNT(v.id)::bigint AS votes
    FROM options o
    LEFT JOIN votes v ON v.option_id = o.id
    WHERE o.round_id::text = $1
    GROUP BY o.id, o.label
    ORDER BY votes DESC";

pub struct Queries;

impl Queries {
    pub async fn round_results(pool: &PgPool, round: &RoundId) -> Result<Vec<OptionTally>, sqlx::Error> {
        sqlx::query_as::<_, OptionTally>(ROUND_RESULTS_SQL)
            .bind(round.as_str())
            .fetch_all(pool)
            .await
    }
}
