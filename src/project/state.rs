use tracing::{debug, info};

use super::{PortfolioSummary, Project, ProjectId};

/// The fixed project list plus whichever project the user is currently
/// looking at.
#[derive(Clone, Debug)]
pub struct ProjectState {
    projects: Vec<Project>,
    current: Option<ProjectId>,
}

impl ProjectState {
    pub fn new(projects: Vec<Project>) -> ProjectState {
        ProjectState {
            projects,
            current: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project by the id as it appears in a route. Anything that
    /// does not name a known project, including text that is not an id at
    /// all, is a miss.
    pub fn get_project_by_id(&self, id: &str) -> Option<&Project> {
        let project_id: ProjectId = id.parse().ok()?;
        self.projects
            .iter()
            .find(|project| project.id == project_id)
    }

    /// Replaces the selection without checking it. A stale id simply makes
    /// [`current_project`](Self::current_project) come back empty.
    pub fn set_current_project(&mut self, project_id: Option<ProjectId>) {
        debug!(?project_id, "set current project");
        self.current = project_id;
    }

    pub fn current_project(&self) -> Option<&Project> {
        let project_id = self.current?;
        self.projects
            .iter()
            .find(|project| project.id == project_id)
    }

    /// Resolves a route id and selects the project. On a miss the selection
    /// is cleared so no view keeps showing the previous project.
    #[tracing::instrument(skip(self))]
    pub fn enter(&mut self, id: &str) -> Option<&Project> {
        let project_id = self.get_project_by_id(id).map(|project| project.id);
        self.set_current_project(project_id);

        match project_id {
            Some(project_id) => {
                info!(%project_id, "entered project");
                self.current_project()
            }
            None => {
                info!("project not found");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.set_current_project(None);
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::of(&self.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn lookup_by_route_id() {
        let state = ProjectState::new(seed::projects());
        let first = state.projects()[0].clone();

        let found = state.get_project_by_id(&first.id.to_string());

        assert_eq!(found, Some(&first));
    }

    #[test]
    fn unknown_or_malformed_ids_are_misses() {
        let state = ProjectState::new(seed::projects());

        assert_eq!(state.get_project_by_id("nonexistent"), None);
        assert_eq!(
            state.get_project_by_id(&ProjectId::new().to_string()),
            None
        );
        assert_eq!(state.get_project_by_id(""), None);
    }

    #[test]
    fn enter_selects_and_miss_clears() {
        let mut state = ProjectState::new(seed::projects());
        let id = state.projects()[2].id;

        let entered = state.enter(&id.to_string()).map(|project| project.id);
        assert_eq!(entered, Some(id));
        assert_eq!(state.current_project().map(|project| project.id), Some(id));

        assert!(state.enter("nonexistent").is_none());
        assert!(state.current_project().is_none());
    }

    #[test]
    fn stale_selection_reads_as_none() {
        let mut state = ProjectState::new(seed::projects());

        state.set_current_project(Some(ProjectId::new()));

        assert!(state.current_project().is_none());
    }

    #[test]
    fn clear_drops_selection() {
        let mut state = ProjectState::new(seed::projects());
        let id = state.projects()[0].id;
        state.set_current_project(Some(id));

        state.clear();

        assert!(state.current_project().is_none());
    }
}
