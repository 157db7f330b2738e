//! Project command and query handlers.

mod create_project;
mod delete_project;
mod get_project;
mod get_project_overview;
mod list_projects;

pub use create_project::{CreateProjectCommand, CreateProjectHandler};
pub use delete_project::{DeleteProjectCommand, DeleteProjectHandler};
pub use get_project::{GetProjectHandler, GetProjectQuery};
pub use get_project_overview::{GetProjectOverviewHandler, ProjectOverview};
pub use list_projects::ListProjectsHandler;
