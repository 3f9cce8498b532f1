use schoolhub_core::{ErrorKind, ErrorResponse};
use schoolhub_models::{
    AccountSummary, AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse,
    MessageResponse, NewAdminProfile, NewParentProfile, NewProfile, NewStudentProfile,
    NewTeacherProfile, ParentProfile, PendingAccount, Profile, ProfileUpdate, RegisterRequest,
    Role, StudentProfile, TeacherProfile, UpdateStudentProfile,
};
use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::approvals::controller::list_pending,
        crate::modules::approvals::controller::approve_account,
        crate::modules::approvals::controller::reject_account,
        crate::modules::accounts::controller::create_account,
        crate::modules::profile::controller::get_me,
        crate::modules::profile::controller::update_profile,
        crate::modules::profile::controller::change_password,
    ),
    components(
        schemas(
            ErrorKind,
            ErrorResponse,
            Role,
            RegisterRequest,
            NewProfile,
            NewAdminProfile,
            NewTeacherProfile,
            NewStudentProfile,
            NewParentProfile,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            AccountSummary,
            PendingAccount,
            MeResponse,
            Profile,
            AdminProfile,
            TeacherProfile,
            StudentProfile,
            ParentProfile,
            ProfileUpdate,
            UpdateStudentProfile,
            ChangePasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and logout"),
        (name = "Administration", description = "Approval queue and admin-created accounts"),
        (name = "Profile", description = "The caller's own account and profile")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "User provisioning and approval for a school: self-registration by role, administrator approval, and cookie-based login.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/admin/approvals",
            "/api/admin/approvals/{id}/approve",
            "/api/admin/approvals/{id}/reject",
            "/api/admin/accounts",
            "/api/me",
            "/api/me/profile",
            "/api/me/password",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }

    #[test]
    fn test_security_schemes_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("cookie_auth"));
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
