use crate::{
    app_state::AppState,
    domain::{
        search::{prefilter_token, rank_candidates, RankedCandidate, PREFILTER_LIMIT},
        ProfileId, ProjectAPIError, RoleId,
    },
    utils::auth::Session,
};

use super::{load_role, profile_store_error, require_manager};

/// Candidates for a role, drawn from the caller's accepted connections.
#[tracing::instrument(name = "Searching candidates", skip_all)]
pub async fn search_candidates(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
    query: &str,
) -> Result<Vec<RankedCandidate>, ProjectAPIError> {
    let role = load_role(state, role_id).await?;
    require_manager(state, session, &role).await?;

    let profile_store = state.profile_store.read().await;
    let network: Vec<ProfileId> = profile_store
        .get_connections(&session.user_id)
        .await
        .map_err(|e| profile_store_error(e, *session.user_id.as_ref()))?
        .into_iter()
        .filter(|id| id != &session.user_id)
        .collect();

    let profiles = match prefilter_token(query) {
        Some(token) => {
            profile_store
                .search_profiles(&token, &network, PREFILTER_LIMIT)
                .await
        }
        None => {
            profile_store
                .get_profiles_in_category(&network, role.category)
                .await
        }
    }
    .map_err(|e| profile_store_error(e, *session.user_id.as_ref()))?;

    Ok(rank_candidates(query, role.category, profiles))
}
