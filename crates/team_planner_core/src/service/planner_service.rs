//! Planner use-case service.
//!
//! # Responsibility
//! - Rehydrate the store from the key-value repository at startup.
//! - Run one store mutation per call and flush the whole document after it.
//! - Drive import/export and hand out view projections.
//!
//! # Invariants
//! - A call that fails (validation, document or storage) leaves both the
//!   in-memory store and the persisted blob unchanged.
//! - Unreadable persisted state never blocks startup; the store starts empty.
//! - Log events carry ids and counts only, never user-entered text.

use crate::document::{self, DocumentError, ExportFile};
use crate::model::interaction::{Interaction, InteractionType};
use crate::model::team::{Member, MemberId, Team, TeamDraft, TeamId};
use crate::model::value_stream::{ValueStreamDraft, ValueStreamId};
use crate::repo::state_repo::{RepoError, StateRepository, PLANNER_STATE_KEY};
use crate::store::{Planner, PlannerError, PlannerResult, ValueStreamRemoval};
use crate::view::{self, DiagramView, GridView, ValueStreamItem};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from planner use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Store rejected the mutation.
    Planner(PlannerError),
    /// Import text could not be decoded, or export could not be encoded.
    Document(DocumentError),
    /// Key-value persistence failed.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planner(err) => write!(f, "{err}"),
            Self::Document(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Planner(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<PlannerError> for ServiceError {
    fn from(value: PlannerError) -> Self {
        Self::Planner(value)
    }
}

impl From<DocumentError> for ServiceError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Where the in-memory store came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was persisted yet.
    Fresh,
    /// Persisted document decoded successfully.
    Restored,
    /// Persisted document was unreadable; started empty.
    Discarded,
}

/// Sizes shown to the user before an import replaces the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportPlan {
    pub current_teams: usize,
    pub incoming_teams: usize,
    pub incoming_interactions: usize,
    pub incoming_value_streams: usize,
}

impl ImportPlan {
    /// Confirmation is only needed when existing teams would be overwritten.
    pub fn requires_confirmation(&self) -> bool {
        self.current_teams > 0
    }

    pub fn confirmation_message(&self) -> String {
        format!(
            "This will replace your current {} team(s) with {} imported team(s). Continue?",
            self.current_teams, self.incoming_teams
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImportPlan),
    Declined(ImportPlan),
}

/// Use-case facade over the store and a state repository.
pub struct PlannerService<R: StateRepository> {
    repo: R,
    planner: Planner,
    load_status: LoadStatus,
}

impl<R: StateRepository> PlannerService<R> {
    /// Loads persisted state through `repo`.
    ///
    /// # Errors
    /// - Returns `ServiceError::Repo` when the repository cannot be read.
    ///   Undecodable content is not an error; see `LoadStatus::Discarded`.
    pub fn load(repo: R) -> ServiceResult<Self> {
        let (planner, load_status) = match repo.load_blob(PLANNER_STATE_KEY)? {
            None => (Planner::new(), LoadStatus::Fresh),
            Some(blob) => match document::decode(&blob) {
                Ok(planner) => (planner, LoadStatus::Restored),
                Err(err) => {
                    error!(
                        "event=state_load module=service status=error error_code=invalid_state error={err}"
                    );
                    (Planner::new(), LoadStatus::Discarded)
                }
            },
        };

        info!(
            "event=state_load module=service status=ok source={:?} teams={} interactions={} value_streams={}",
            load_status,
            planner.teams().len(),
            planner.interactions().len(),
            planner.value_streams().len()
        );

        Ok(Self {
            repo,
            planner,
            load_status,
        })
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    // Teams

    pub fn create_team(&mut self, draft: &TeamDraft) -> ServiceResult<TeamId> {
        self.mutate("team_create", |planner| planner.create_team(draft))
    }

    pub fn update_team(&mut self, team_id: &str, draft: &TeamDraft) -> ServiceResult<()> {
        self.mutate("team_update", |planner| planner.update_team(team_id, draft))
    }

    pub fn delete_team(&mut self, team_id: &str) -> ServiceResult<Team> {
        self.mutate("team_delete", |planner| planner.delete_team(team_id))
    }

    /// Persists a dragged node position.
    pub fn move_team(&mut self, team_id: &str, x: f64, y: f64) -> ServiceResult<()> {
        self.mutate("team_move", |planner| planner.move_team(team_id, x, y))
    }

    // Members

    pub fn add_member(&mut self, team_id: &str, name: &str, role: &str) -> ServiceResult<MemberId> {
        self.mutate("member_add", |planner| planner.add_member(team_id, name, role))
    }

    pub fn remove_member(&mut self, team_id: &str, member_id: &str) -> ServiceResult<Member> {
        self.mutate("member_remove", |planner| {
            planner.remove_member(team_id, member_id)
        })
    }

    // Interactions

    pub fn create_interaction(
        &mut self,
        from: &str,
        to: &str,
        kind: InteractionType,
    ) -> ServiceResult<usize> {
        self.mutate("interaction_create", |planner| {
            planner.create_interaction(from, to, kind)
        })
    }

    pub fn update_interaction(
        &mut self,
        index: usize,
        from: &str,
        to: &str,
        kind: InteractionType,
    ) -> ServiceResult<()> {
        self.mutate("interaction_update", |planner| {
            planner.update_interaction(index, from, to, kind)
        })
    }

    pub fn swap_interaction(&mut self, index: usize) -> ServiceResult<()> {
        self.mutate("interaction_swap", |planner| planner.swap_interaction(index))
    }

    pub fn delete_interaction(&mut self, index: usize) -> ServiceResult<Interaction> {
        self.mutate("interaction_delete", |planner| {
            planner.delete_interaction(index)
        })
    }

    // Value streams

    pub fn create_value_stream(&mut self, draft: &ValueStreamDraft) -> ServiceResult<ValueStreamId> {
        self.mutate("value_stream_create", |planner| {
            planner.create_value_stream(draft)
        })
    }

    pub fn update_value_stream(
        &mut self,
        stream_id: &str,
        draft: &ValueStreamDraft,
    ) -> ServiceResult<()> {
        self.mutate("value_stream_update", |planner| {
            planner.update_value_stream(stream_id, draft)
        })
    }

    pub fn delete_value_stream(&mut self, stream_id: &str) -> ServiceResult<ValueStreamRemoval> {
        self.mutate("value_stream_delete", |planner| {
            planner.delete_value_stream(stream_id)
        })
    }

    // Layout

    pub fn auto_layout(&mut self) -> ServiceResult<()> {
        self.mutate("auto_layout", |planner| {
            planner.auto_layout();
            Ok(())
        })
    }

    // Import / export

    /// Packages the current store as a downloadable document.
    pub fn export_file(&self) -> ServiceResult<ExportFile> {
        let file = ExportFile::from_planner(&self.planner)?;
        info!(
            "event=export module=service status=ok teams={} interactions={} value_streams={}",
            self.planner.teams().len(),
            self.planner.interactions().len(),
            self.planner.value_streams().len()
        );
        Ok(file)
    }

    /// Decodes `text` and replaces the whole store with it.
    ///
    /// `confirm` is consulted only when current teams would be overwritten;
    /// returning `false` leaves everything untouched.
    ///
    /// # Errors
    /// - `ServiceError::Document` for malformed input; the store is unchanged.
    /// - `ServiceError::Repo` when persisting the imported store fails.
    pub fn import_document(
        &mut self,
        text: &str,
        confirm: impl FnOnce(&ImportPlan) -> bool,
    ) -> ServiceResult<ImportOutcome> {
        let incoming = document::decode(text).map_err(|err| {
            error!("event=import module=service status=error error_code=invalid_document error={err}");
            err
        })?;

        let plan = ImportPlan {
            current_teams: self.planner.teams().len(),
            incoming_teams: incoming.teams().len(),
            incoming_interactions: incoming.interactions().len(),
            incoming_value_streams: incoming.value_streams().len(),
        };

        if plan.requires_confirmation() && !confirm(&plan) {
            info!(
                "event=import module=service status=declined current_teams={} incoming_teams={}",
                plan.current_teams, plan.incoming_teams
            );
            return Ok(ImportOutcome::Declined(plan));
        }

        self.persist(&incoming)?;
        self.planner = incoming;
        info!(
            "event=import module=service status=ok teams={} interactions={} value_streams={}",
            plan.incoming_teams, plan.incoming_interactions, plan.incoming_value_streams
        );
        Ok(ImportOutcome::Imported(plan))
    }

    // Views

    pub fn grid_view(&self) -> GridView {
        view::grid_view(&self.planner)
    }

    /// Builds the diagram, first persisting slots for unplaced teams.
    pub fn diagram_view(&mut self) -> ServiceResult<DiagramView> {
        let unplaced = self
            .planner
            .teams()
            .iter()
            .any(|team| team.position().is_none());
        if unplaced {
            self.mutate("layout_init", |planner| Ok(planner.ensure_positions()))?;
        }
        Ok(view::diagram_view(&self.planner))
    }

    pub fn value_stream_view(&self) -> Vec<ValueStreamItem> {
        view::value_stream_view(&self.planner)
    }

    /// Applies `op` to a copy of the store, persists it, then commits.
    fn mutate<T>(
        &mut self,
        event: &'static str,
        op: impl FnOnce(&mut Planner) -> PlannerResult<T>,
    ) -> ServiceResult<T> {
        let mut next = self.planner.clone();
        let value = op(&mut next).map_err(|err| {
            warn!("event={event} module=service status=rejected error={err}");
            err
        })?;

        self.persist(&next)?;
        self.planner = next;
        info!(
            "event={event} module=service status=ok teams={} interactions={} value_streams={}",
            self.planner.teams().len(),
            self.planner.interactions().len(),
            self.planner.value_streams().len()
        );
        Ok(value)
    }

    fn persist(&self, planner: &Planner) -> ServiceResult<()> {
        let blob = document::encode_compact(planner)?;
        self.repo
            .save_blob(PLANNER_STATE_KEY, &blob)
            .map_err(|err| {
                error!(
                    "event=state_save module=service status=error error_code=save_failed error={err}"
                );
                ServiceError::from(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::ImportPlan;

    #[test]
    fn confirmation_only_needed_when_teams_exist() {
        let plan = ImportPlan {
            current_teams: 0,
            incoming_teams: 3,
            incoming_interactions: 0,
            incoming_value_streams: 0,
        };
        assert!(!plan.requires_confirmation());

        let overwrite = ImportPlan {
            current_teams: 2,
            ..plan
        };
        assert!(overwrite.requires_confirmation());
        assert_eq!(
            overwrite.confirmation_message(),
            "This will replace your current 2 team(s) with 3 imported team(s). Continue?"
        );
    }
}
