use axum::{
    body::Body as AxumBody,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

pub const DEFAULT_LOCALE: &str = "en";

/// Locale resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

/// Picks a supported locale from an `Accept-Language` value. Only the first
/// language tag is considered.
pub fn resolve_locale(accept_language: Option<&str>) -> String {
    let tag = accept_language
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.split(';').next())
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if tag.starts_with("zh") {
        "zh-CN".to_string()
    } else {
        DEFAULT_LOCALE.to_string()
    }
}

pub async fn i18n_middleware(mut req: Request<AxumBody>, next: Next) -> Response {
    let locale = resolve_locale(
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );
    req.extensions_mut().insert(Locale(locale));

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale(None), "en");
        assert_eq!(resolve_locale(Some("zh-CN,zh;q=0.9,en;q=0.8")), "zh-CN");
        assert_eq!(resolve_locale(Some("zh;q=0.9")), "zh-CN");
        assert_eq!(resolve_locale(Some("en-US,en;q=0.9")), "en");
        assert_eq!(resolve_locale(Some("fr-FR")), "en");
    }
}
