use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

pub struct HtmlTemplate<T>(pub T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("❌ Failed to render page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

pub struct PageLink {
    pub href: String,
    pub label: String,
}

impl PageLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: String,
    pub heading: String,
    pub message: String,
    pub identity: Option<String>,
    pub links: Vec<PageLink>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: &'static str,
    pub audience: &'static str,
    pub return_to: Option<String>,
}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub message: &'static str,
}

impl LoadingTemplate {
    pub fn session() -> Self {
        Self {
            message: "Checking your session…",
        }
    }

    pub fn partner_workspace() -> Self {
        Self {
            message: "Opening your partner workspace…",
        }
    }
}

#[derive(Template)]
#[template(path = "interstitial.html")]
pub struct InterstitialTemplate {
    pub title: &'static str,
    pub message: &'static str,
}

impl InterstitialTemplate {
    pub fn account_inactive() -> Self {
        Self {
            title: "Account Inactive",
            message: "Your account has been deactivated. Please contact your administrator to restore access.",
        }
    }

    pub fn configuration_error() -> Self {
        Self {
            title: "Configuration Error",
            message: "Your partner account is not linked to a partner organization. Please contact support so an administrator can complete the setup.",
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            title: "Access Denied",
            message: "You do not have permission to view this page.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_escapes_return_to() {
        let html = LoginTemplate {
            title: "Partner Login",
            audience: "partner",
            return_to: Some("/dashboard\"><script>".into()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Partner Login"));
        assert!(!html.contains("\"><script>"));
    }

    #[test]
    fn loading_page_refreshes_itself() {
        let html = LoadingTemplate::session().render().unwrap();
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn interstitials_carry_their_titles() {
        let html = InterstitialTemplate::configuration_error().render().unwrap();
        assert!(html.contains("Configuration Error"));

        let html = InterstitialTemplate::account_inactive().render().unwrap();
        assert!(html.contains("Account Inactive"));
    }
}
