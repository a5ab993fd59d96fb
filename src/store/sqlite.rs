//! SQLite-backed proposal store.
//!
//! Layout:
//! - `proposals`: one row per proposal, tallies inline.
//! - `votes`: one row per `(proposal_id, voter)` with a composite primary
//!   key, the durable form of the per-proposal voter set.
//!
//! `record_vote` writes both tables in a single transaction so the tally
//! invariant (`votes_for + votes_against == total voter rows`) holds in the
//! database at every commit point.

use crate::registry::types::{Proposal, ProposalId, VoterId};
use crate::store::traits::{ProposalStore, StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::HashSet;
use std::path::Path;

/// Durable store over a single SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options).await
    }

    /// Open a fresh in-memory database (tests).
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::new().filename(":memory:");
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> StoreResult<Self> {
        // Single connection: an in-memory database exists per connection,
        // and the registry serializes writes anyway.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS proposals (
                id            INTEGER PRIMARY KEY,
                title         TEXT    NOT NULL,
                description   TEXT    NOT NULL,
                proposer      TEXT    NOT NULL,
                created_at    INTEGER NOT NULL,
                end_date      INTEGER NOT NULL,
                votes_for     INTEGER NOT NULL DEFAULT 0,
                votes_against INTEGER NOT NULL DEFAULT 0,
                executed      INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS votes (
                proposal_id INTEGER NOT NULL REFERENCES proposals(id),
                voter       TEXT    NOT NULL,
                support     INTEGER NOT NULL,
                cast_at     INTEGER NOT NULL,
                PRIMARY KEY (proposal_id, voter)
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProposalStore for SqliteStore {
    async fn insert_proposal(&self, proposal: &Proposal) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO proposals
                (id, title, description, proposer, created_at, end_date,
                 votes_for, votes_against, executed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(proposal.id as i64)
        .bind(&proposal.title)
        .bind(&proposal.description)
        .bind(proposal.proposer.as_str())
        .bind(proposal.created_at as i64)
        .bind(proposal.end_date as i64)
        .bind(proposal.votes_for as i64)
        .bind(proposal.votes_against as i64)
        .bind(proposal.is_executed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_vote(
        &self,
        id: ProposalId,
        voter: &VoterId,
        support: bool,
        cast_at: u64,
    ) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO votes (proposal_id, voter, support, cast_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(id as i64)
        .bind(voter.as_str())
        .bind(support)
        .bind(cast_at as i64)
        .execute(&mut *tx)
        .await?;

        let bump = if support {
            "UPDATE proposals SET votes_for = votes_for + 1 WHERE id = ?1"
        } else {
            "UPDATE proposals SET votes_against = votes_against + 1 WHERE id = ?1"
        };
        let updated = sqlx::query(bump).bind(id as i64).execute(&mut *tx).await?;
        if updated.rows_affected() != 1 {
            return Err(StoreError::Corrupt(format!(
                "vote for unknown proposal {}",
                id
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn load_all(&self) -> StoreResult<Vec<Proposal>> {
        let rows = sqlx::query(
            "SELECT id, title, description, proposer, created_at, end_date,
                    votes_for, votes_against, executed
             FROM proposals ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut proposals = Vec::with_capacity(rows.len());
        for row in rows {
            let votes_for: i64 = row.try_get("votes_for")?;
            let votes_against: i64 = row.try_get("votes_against")?;
            proposals.push(Proposal {
                id: row.try_get::<i64, _>("id")? as ProposalId,
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                proposer: VoterId(row.try_get("proposer")?),
                created_at: row.try_get::<i64, _>("created_at")? as u64,
                end_date: row.try_get::<i64, _>("end_date")? as u64,
                votes_for: votes_for as u32,
                votes_against: votes_against as u32,
                total_voters: (votes_for + votes_against) as u32,
                is_executed: row.try_get("executed")?,
                voters: HashSet::new(),
            });
        }

        let vote_rows = sqlx::query("SELECT proposal_id, voter FROM votes")
            .fetch_all(&self.pool)
            .await?;
        for row in vote_rows {
            let id = row.try_get::<i64, _>("proposal_id")? as usize;
            let voter = VoterId(row.try_get("voter")?);
            let proposal = proposals.get_mut(id).ok_or_else(|| {
                StoreError::Corrupt(format!("vote row for unknown proposal {}", id))
            })?;
            proposal.voters.insert(voter);
        }

        Ok(proposals)
    }
}
