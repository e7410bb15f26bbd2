//! Member records service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberEmail, MemberSearchResponse, UpdateMember},
    repository::{members::DUPLICATE_EMAIL, Repository},
};

use super::EMPTY_QUERY;

const MEMBER_NOT_FOUND: &str = "Member not found";

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a member unless the email is already registered
    pub async fn add(&self, data: &CreateMember) -> AppResult<Member> {
        data.validate()?;

        let mut session = self.repository.open().await?;
        if session.members_get_by_email(&data.email).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        let member = session.members_create(data).await?;
        session.close(true).await?;

        tracing::info!("Member {} added", member.id);
        Ok(member)
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let mut session = self.repository.open().await?;
        let members = session.members_list().await?;
        session.close(false).await?;
        Ok(members)
    }

    /// Members are addressed by email; the name is kept when not provided
    pub async fn update(&self, data: &UpdateMember) -> AppResult<Member> {
        data.validate()?;

        let mut session = self.repository.open().await?;
        let mut member = session
            .members_get_by_email(&data.email)
            .await?
            .ok_or_else(|| AppError::NotFound(MEMBER_NOT_FOUND.to_string()))?;
        if let Some(ref name) = data.name {
            member.name = name.clone();
        }
        session.members_update_name(&member.email, &member.name).await?;
        session.close(true).await?;

        tracing::info!("Member {} updated", member.id);
        Ok(member)
    }

    pub async fn delete(&self, data: &MemberEmail) -> AppResult<()> {
        data.validate()?;

        let mut session = self.repository.open().await?;
        if !session.members_delete_by_email(&data.email).await? {
            return Err(AppError::NotFound(MEMBER_NOT_FOUND.to_string()));
        }
        session.close(true).await?;

        tracing::info!("Member {:?} deleted", data.email);
        Ok(())
    }

    pub async fn search(&self, query: &str) -> AppResult<MemberSearchResponse> {
        if query.is_empty() {
            return Err(AppError::Validation(EMPTY_QUERY.to_string()));
        }

        let mut session = self.repository.open().await?;
        let members = session.members_search(query).await?;
        session.close(false).await?;

        tracing::debug!("Member search {:?}: {} match(es)", query, members.len());
        Ok(if members.is_empty() {
            MemberSearchResponse::NoMatches {
                message: "No members found matching the query".to_string(),
            }
        } else {
            MemberSearchResponse::Matches { members }
        })
    }
}
