//! Helpers for constructing URLs to static assets that respect the deployment base path.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/hazmente` for GitHub Pages),
/// generated URLs are prefixed accordingly. Local builds without `PUBLIC_URL`
/// fall back to root-anchored paths.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL of a data document such as `data/exercises.json` or `lecturas/3.json`.
#[must_use]
pub fn data_url(resource: &str) -> String {
    asset_path(&format!("static/assets/{}", resource.trim_start_matches('/')))
}

/// Base path for the router (e.g., `/hazmente` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_root_prefixed_path_when_base_missing() {
        assert_eq!(asset_path("static/css/app.css"), "/static/css/app.css");
        assert_eq!(asset_path("/static/css/app.css"), "/static/css/app.css");
    }

    #[test]
    fn builds_paths_with_public_base() {
        assert_eq!(
            asset_path_with_base("static/assets/data/users.json", "/hazmente/"),
            "/hazmente/static/assets/data/users.json"
        );
    }

    #[test]
    fn data_urls_live_under_static_assets() {
        assert_eq!(
            data_url("data/exercises.json"),
            "/static/assets/data/exercises.json"
        );
        assert_eq!(data_url("/lecturas/10.json"), "/static/assets/lecturas/10.json");
    }

    #[test]
    fn router_base_is_none_by_default() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("/app/"), Some(String::from("/app")));
    }
}
