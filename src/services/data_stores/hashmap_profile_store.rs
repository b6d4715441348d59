use std::collections::{HashMap, HashSet};

use crate::domain::{
    Connection, ConnectionStatus, Profile, ProfileId, ProfileStore,
    ProfileStoreError, RoleCategory,
};

#[derive(Default)]
pub struct HashmapProfileStore {
    profiles: HashMap<ProfileId, Profile>,
    connections: Vec<Connection>,
}

impl HashmapProfileStore {
    fn pool<'a>(
        &'a self,
        within: &'a [ProfileId],
    ) -> impl Iterator<Item = &'a Profile> + 'a {
        let within: HashSet<&ProfileId> = within.iter().collect();
        self.profiles
            .values()
            .filter(move |p| within.contains(&p.id))
    }
}

fn contains_ignore_case(field: &Option<String>, token: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|value| value.to_lowercase().contains(token))
}

#[async_trait::async_trait]
impl ProfileStore for HashmapProfileStore {
    async fn add_profile(&mut self, profile: &Profile) -> Result<(), ProfileStoreError> {
        if self.profiles.contains_key(&profile.id) {
            return Err(ProfileStoreError::ProfileAlreadyExists);
        }
        self.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn get_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Profile, ProfileStoreError> {
        self.profiles
            .get(profile_id)
            .cloned()
            .ok_or(ProfileStoreError::ProfileNotFound)
    }

    async fn get_profiles(
        &self,
        profile_ids: &[ProfileId],
    ) -> Result<Vec<Profile>, ProfileStoreError> {
        Ok(profile_ids
            .iter()
            .filter_map(|id| self.profiles.get(id))
            .cloned()
            .collect())
    }

    async fn search_profiles(
        &self,
        token: &str,
        within: &[ProfileId],
        limit: usize,
    ) -> Result<Vec<Profile>, ProfileStoreError> {
        let token = token.to_lowercase();
        let mut matches: Vec<Profile> = self
            .pool(within)
            .filter(|p| {
                contains_ignore_case(&p.full_name, &token)
                    || contains_ignore_case(&p.username, &token)
                    || contains_ignore_case(&p.city, &token)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|p| p.id);
        matches.truncate(limit);
        Ok(matches)
    }

    async fn get_profiles_in_category(
        &self,
        within: &[ProfileId],
        category: RoleCategory,
    ) -> Result<Vec<Profile>, ProfileStoreError> {
        Ok(self
            .pool(within)
            .filter(|p| p.works_in(category))
            .cloned()
            .collect())
    }

    async fn add_connection(
        &mut self,
        connection: &Connection,
    ) -> Result<(), ProfileStoreError> {
        for id in [&connection.requester_id, &connection.addressee_id] {
            if !self.profiles.contains_key(id) {
                return Err(ProfileStoreError::ProfileNotFound);
            }
        }
        self.connections.retain(|existing| {
            existing.other_side(&connection.requester_id)
                != Some(connection.addressee_id)
        });
        self.connections.push(connection.clone());
        Ok(())
    }

    async fn get_connections(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<ProfileId>, ProfileStoreError> {
        Ok(self
            .connections
            .iter()
            .filter(|c| c.status == ConnectionStatus::Accepted)
            .filter_map(|c| c.other_side(profile_id))
            .collect())
    }
}
