//! Headless entry point: restores the persisted session and reports what
//! the current user may open.

use assetology_desktop::{ClientContext, DesktopConfig};

fn main() -> anyhow::Result<()> {
    let config = DesktopConfig::from_env()?;
    assetology_observability::init(config.log_format);

    let context = ClientContext::from_config(&config)?;
    let branding = context.settings.load();

    match context.sessions.current_session() {
        Some(session) => {
            let routes = context.guard.policy().accessible_routes(session.role());
            tracing::info!(
                app = %branding.app_name,
                user = session.username(),
                role = %session.role(),
                ?routes,
                "session restored"
            );
        }
        None => {
            tracing::info!(
                app = %branding.app_name,
                login = %context.guard.routes().login,
                "no stored session; login required"
            );
        }
    }

    Ok(())
}
