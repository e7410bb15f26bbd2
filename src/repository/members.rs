//! Member row access on a store session

use super::{like_pattern, Session};
use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
};

pub(crate) const DUPLICATE_EMAIL: &str = "Email already exists";

impl Session {
    /// List all members
    pub async fn members_list(&mut self) -> AppResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, Member>("SELECT id, name, email FROM members ORDER BY id")
            .fetch_all(self.conn())
            .await?;
        Ok(rows)
    }

    /// Get member by email (exact match)
    pub async fn members_get_by_email(&mut self, email: &str) -> AppResult<Option<Member>> {
        let member =
            sqlx::query_as::<_, Member>("SELECT id, name, email FROM members WHERE email = ?")
                .bind(email)
                .fetch_optional(self.conn())
                .await?;
        Ok(member)
    }

    /// Insert a member
    pub async fn members_create(&mut self, data: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            "INSERT INTO members (name, email) VALUES (?, ?) RETURNING id, name, email",
        )
        .bind(&data.name)
        .bind(&data.email)
        .fetch_one(self.conn())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_EMAIL))
    }

    /// Rename the member owning `email`
    pub async fn members_update_name(&mut self, email: &str, name: &str) -> AppResult<()> {
        sqlx::query("UPDATE members SET name = ? WHERE email = ?")
            .bind(name)
            .bind(email)
            .execute(self.conn())
            .await?;
        Ok(())
    }

    /// Delete the member owning `email`, returning whether a row went away
    pub async fn members_delete_by_email(&mut self, email: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE email = ?")
            .bind(email)
            .execute(self.conn())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search on name or email
    pub async fn members_search(&mut self, query: &str) -> AppResult<Vec<Member>> {
        let pattern = like_pattern(query);
        let rows = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email FROM members
            WHERE LOWER(name) LIKE LOWER(?) ESCAPE '\' OR LOWER(email) LIKE LOWER(?) ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.conn())
        .await?;
        Ok(rows)
    }
}
