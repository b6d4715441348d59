use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::{
    Application, ApplicationId, ApplicationStatus, ProfileId, Project,
    ProjectId, ProjectStore, ProjectStoreError, Role, RoleId,
};

#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<ProjectId, Project>,
    roles: HashMap<RoleId, Role>,
    applications: HashMap<ApplicationId, Application>,
}

impl HashmapProjectStore {
    fn check_unchanged(&self, previous: &Role) -> Result<(), ProjectStoreError> {
        match self.roles.get(&previous.id) {
            Some(stored)
                if stored.status() == previous.status()
                    && stored.assigned_profile_id()
                        == previous.assigned_profile_id() =>
            {
                Ok(())
            }
            _ => Err(ProjectStoreError::NoRowsAffected),
        }
    }
}

fn sorted_by_creation<T>(
    mut items: Vec<T>,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    items.sort_by_key(|item| created_at(item));
    items
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        if self.projects.contains_key(&project.id) {
            return Err(ProjectStoreError::ProjectIDExists);
        }
        self.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        self.projects
            .get(project_id)
            .cloned()
            .ok_or(ProjectStoreError::ProjectIDNotFound)
    }

    async fn get_project_list(
        &self,
        owner_id: &ProfileId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let owned = self
            .projects
            .values()
            .filter(|project| project.is_owned_by(owner_id))
            .cloned()
            .collect();
        Ok(sorted_by_creation(owned, |p: &Project| p.created_at))
    }

    async fn add_role(&mut self, role: &Role) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(&role.project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        if self.roles.contains_key(&role.id) {
            return Err(ProjectStoreError::RoleIDExists);
        }
        self.roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn get_role(&self, role_id: &RoleId) -> Result<Role, ProjectStoreError> {
        self.roles
            .get(role_id)
            .cloned()
            .ok_or(ProjectStoreError::RoleIDNotFound)
    }

    async fn get_roles(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Role>, ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        let roles = self
            .roles
            .values()
            .filter(|role| &role.project_id == project_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(roles, |r: &Role| r.created_at))
    }

    async fn update_role(
        &mut self,
        previous: &Role,
        updated: &Role,
    ) -> Result<(), ProjectStoreError> {
        self.check_unchanged(previous)?;
        self.roles.insert(updated.id, updated.clone());
        Ok(())
    }

    async fn delete_role(&mut self, role_id: &RoleId) -> Result<(), ProjectStoreError> {
        self.roles
            .remove(role_id)
            .ok_or(ProjectStoreError::RoleIDNotFound)?;
        self.applications
            .retain(|_, application| &application.role_id != role_id);
        Ok(())
    }

    async fn release_role(
        &mut self,
        previous: &Role,
        updated: &Role,
    ) -> Result<(), ProjectStoreError> {
        self.check_unchanged(previous)?;
        self.roles.insert(updated.id, updated.clone());
        self.applications.retain(|_, application| {
            application.role_id != updated.id
                || application.status != ApplicationStatus::Accepted
        });
        Ok(())
    }

    async fn add_application(
        &mut self,
        application: &Application,
    ) -> Result<(), ProjectStoreError> {
        if !self.roles.contains_key(&application.role_id) {
            return Err(ProjectStoreError::RoleIDNotFound);
        }
        let duplicate = self.applications.values().any(|existing| {
            existing.role_id == application.role_id
                && existing.candidate_id == application.candidate_id
        });
        if duplicate || self.applications.contains_key(&application.id) {
            return Err(ProjectStoreError::DuplicateApplication);
        }
        self.applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Application, ProjectStoreError> {
        self.applications
            .get(application_id)
            .cloned()
            .ok_or(ProjectStoreError::ApplicationIDNotFound)
    }

    async fn find_application(
        &self,
        role_id: &RoleId,
        candidate_id: &ProfileId,
    ) -> Result<Application, ProjectStoreError> {
        self.applications
            .values()
            .find(|a| &a.role_id == role_id && &a.candidate_id == candidate_id)
            .cloned()
            .ok_or(ProjectStoreError::ApplicationIDNotFound)
    }

    async fn get_applications_for_role(
        &self,
        role_id: &RoleId,
    ) -> Result<Vec<Application>, ProjectStoreError> {
        let applications = self
            .applications
            .values()
            .filter(|a| &a.role_id == role_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(applications, |a: &Application| a.created_at))
    }

    async fn get_applications_for_candidate(
        &self,
        candidate_id: &ProfileId,
    ) -> Result<Vec<Application>, ProjectStoreError> {
        let applications = self
            .applications
            .values()
            .filter(|a| &a.candidate_id == candidate_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(applications, |a: &Application| a.created_at))
    }

    async fn set_application_status(
        &mut self,
        application_id: &ApplicationId,
        previous: ApplicationStatus,
        status: ApplicationStatus,
    ) -> Result<(), ProjectStoreError> {
        let application = self
            .applications
            .get_mut(application_id)
            .ok_or(ProjectStoreError::ApplicationIDNotFound)?;
        if application.status != previous {
            return Err(ProjectStoreError::NoRowsAffected);
        }
        application.status = status;
        Ok(())
    }

    async fn delete_application(
        &mut self,
        application_id: &ApplicationId,
    ) -> Result<(), ProjectStoreError> {
        self.applications
            .remove(application_id)
            .map(|_| ())
            .ok_or(ProjectStoreError::ApplicationIDNotFound)
    }

    async fn accept_application(
        &mut self,
        application: &Application,
        previous_role: &Role,
        updated_role: &Role,
    ) -> Result<(), ProjectStoreError> {
        // Every check happens before the first write so a failure leaves
        // the store untouched.
        self.check_unchanged(previous_role)?;
        match self.applications.get(&application.id) {
            Some(stored) if stored.status == ApplicationStatus::Pending => (),
            Some(_) => return Err(ProjectStoreError::NoRowsAffected),
            None => return Err(ProjectStoreError::ApplicationIDNotFound),
        }

        for other in self.applications.values_mut() {
            if other.id == application.id {
                other.status = ApplicationStatus::Accepted;
            } else if other.role_id == application.role_id
                && other.status == ApplicationStatus::Pending
            {
                other.status = ApplicationStatus::Rejected;
            }
        }
        self.roles.insert(updated_role.id, updated_role.clone());
        Ok(())
    }
}
