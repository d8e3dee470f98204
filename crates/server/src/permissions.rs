//! Permissions API endpoints
//!
//! The active role always travels in the request body; the server keeps no
//! session state for it.

use api_types::permission::{
    CategoryToggle, PermissionCategory as ApiCategory, PermissionCheck, PermissionCheckResponse,
    PermissionFlag as ApiFlag, Role as ApiRole,
};
use axum::Json;

use crate::ServerError;
use engine::{PermissionCategory, PermissionFlag, Role};

fn map_role(role: ApiRole) -> Role {
    Role {
        id: role.id,
        name: role.name,
        categories: role
            .categories
            .into_iter()
            .map(|category| PermissionCategory {
                id: category.id,
                name: category.name,
                permissions: category
                    .permissions
                    .into_iter()
                    .map(|flag| PermissionFlag {
                        id: flag.id,
                        enabled: flag.enabled,
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn map_role_view(role: Role) -> ApiRole {
    ApiRole {
        id: role.id,
        name: role.name,
        categories: role
            .categories
            .into_iter()
            .map(|category| ApiCategory {
                id: category.id,
                name: category.name,
                permissions: category
                    .permissions
                    .into_iter()
                    .map(|flag| ApiFlag {
                        id: flag.id,
                        enabled: flag.enabled,
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub async fn check(Json(payload): Json<PermissionCheck>) -> Json<PermissionCheckResponse> {
    let role = map_role(payload.role);

    Json(PermissionCheckResponse {
        allowed: role.is_allowed(&payload.permission_id),
    })
}

pub async fn toggle(Json(payload): Json<CategoryToggle>) -> Result<Json<ApiRole>, ServerError> {
    let role = map_role(payload.role);
    let updated = role.toggle_category(&payload.category_id)?;

    Ok(Json(map_role_view(updated)))
}
