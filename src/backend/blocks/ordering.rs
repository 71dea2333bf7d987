//! Block Ordering Engine
//!
//! Siblings (blocks sharing a page and a parent block) are ordered by integer
//! `rank`, ties broken by creation order. Ranks need not be contiguous.
//!
//! # Placement
//!
//! Inserting at index `i` only touches what has to move:
//!
//! 1. If there is a free integer between the neighbours at `i - 1` and `i`,
//!    the new block takes it and nothing else changes.
//! 2. Otherwise the new block takes `prev + 1` (or `0` at the head) and the
//!    following siblings are bumped one by one, stopping at the first one
//!    whose rank is already above the previous.
//!
//! # Reorder
//!
//! A batch reorder assigns `rank = index` to every listed id inside one
//! transaction. Afterwards the listed blocks have contiguous ranks `0..n`.
//!
//! The planner is pure; the functions at the bottom of this module load and
//! write sibling ranks and are always called with a transaction.

use chrono::Utc;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

/// A sibling as seen by the planner, in list order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingRank {
    pub id: Uuid,
    pub rank: i64,
}

/// Rank change for an existing sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankShift {
    pub id: Uuid,
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Rank for the block being placed
    pub rank: i64,
    /// Siblings that must move to make room
    pub shifts: Vec<RankShift>,
    /// Index the block ends up at
    pub index: usize,
}

/// Clamp a requested position to `0..=len`; `None` appends.
pub fn target_index(len: usize, position: Option<i64>) -> usize {
    match position {
        Some(p) if p <= 0 => 0,
        Some(p) => usize::try_from(p).map_or(len, |p| p.min(len)),
        None => len,
    }
}

/// Plan the placement of one block among `siblings`, which must be in list
/// order and must not contain the block being placed.
pub fn plan_insert(siblings: &[SiblingRank], position: Option<i64>) -> Placement {
    let index = target_index(siblings.len(), position);
    let prev = index.checked_sub(1).and_then(|i| siblings.get(i));
    let next = siblings.get(index);

    let rank = match (prev, next) {
        (None, None) => 0,
        (None, Some(n)) => (n.rank - 1).max(0),
        (Some(p), _) => p.rank + 1,
    };

    let mut shifts = Vec::new();
    let mut floor = rank;
    for sibling in &siblings[index..] {
        if sibling.rank > floor {
            break;
        }
        floor += 1;
        shifts.push(RankShift {
            id: sibling.id,
            from: sibling.rank,
            to: floor,
        });
    }

    Placement { rank, shifts, index }
}

/// Sibling ranks in list order, optionally leaving one block out
pub async fn load_siblings(
    conn: &mut SqliteConnection,
    page_id: Uuid,
    parent_block_id: Option<Uuid>,
    exclude: Option<Uuid>,
) -> Result<Vec<SiblingRank>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, rank FROM live_blocks
        WHERE page_id = ?1 AND parent_block_id IS ?2 AND (?3 IS NULL OR id != ?3)
        ORDER BY rank ASC, created_at ASC, seq ASC
        "#,
    )
    .bind(page_id)
    .bind(parent_block_id)
    .bind(exclude)
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(SiblingRank {
                id: row.try_get("id")?,
                rank: row.try_get("rank")?,
            })
        })
        .collect()
}

pub async fn apply_shifts(conn: &mut SqliteConnection, shifts: &[RankShift]) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    for shift in shifts {
        sqlx::query("UPDATE blocks SET rank = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(shift.id)
            .bind(shift.to)
            .bind(now)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Load siblings, plan, and shift the ones in the way. The caller writes the
/// placed block's own rank.
pub async fn make_room(
    conn: &mut SqliteConnection,
    page_id: Uuid,
    parent_block_id: Option<Uuid>,
    moving: Option<Uuid>,
    position: Option<i64>,
) -> Result<Placement, sqlx::Error> {
    let siblings = load_siblings(conn, page_id, parent_block_id, moving).await?;
    let placement = plan_insert(&siblings, position);
    apply_shifts(conn, &placement.shifts).await?;
    if !placement.shifts.is_empty() {
        tracing::debug!(
            page_id = %page_id,
            parent_block_id = ?parent_block_id,
            shifted = placement.shifts.len(),
            "Shifted siblings to make room"
        );
    }
    Ok(placement)
}

/// Assign `rank = index` to each id
pub async fn assign_sequential_ranks(conn: &mut SqliteConnection, ordered: &[Uuid]) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    for (index, id) in ordered.iter().enumerate() {
        sqlx::query("UPDATE blocks SET rank = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(index as i64)
            .bind(now)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
