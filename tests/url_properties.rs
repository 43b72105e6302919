//! Property-based tests for URL building

use proptest::prelude::*;

use docscan::egui_app::DocumentQuery;
use docscan::shared::config::{build_api_url, endpoints, AppConfig};
use reqwest::Url;

fn host() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9-]{0,12}(\\.[a-z]{2,5}){0,2}", proptest::option::of(1u16..65535)).prop_map(
        |(name, port)| match port {
            Some(port) => format!("{}:{}", name, port),
            None => name,
        },
    )
}

fn config(base: &str) -> AppConfig {
    AppConfig::builder().api_base_url(base).build().unwrap()
}

proptest! {
    #[test]
    fn test_bare_host_gets_http_scheme(host in host(), slash in any::<bool>()) {
        let base = if slash { format!("{}/", host) } else { host.clone() };
        let url = build_api_url(&base, endpoints::CATEGORIES);
        prop_assert_eq!(url, format!("http://{}/api/v1/categories", host));
    }

    #[test]
    fn test_explicit_scheme_is_kept(host in host(), https in any::<bool>()) {
        let scheme = if https { "https" } else { "http" };
        let base = format!("{}://{}", scheme, host);
        let url = build_api_url(&base, "api/v1/documents");
        prop_assert_eq!(url, format!("{}://{}/api/v1/documents", scheme, host));
    }

    #[test]
    fn test_search_text_round_trips_through_query(text in "[ -~]{1,40}") {
        prop_assume!(!text.trim().is_empty());
        let query = DocumentQuery::new(text.clone(), Some("12".to_string()));
        let url = Url::parse(&query.url(&config("192.168.1.52:3000")).unwrap()).unwrap();

        prop_assert_eq!(url.path(), "/api/v1/documents/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        prop_assert_eq!(
            pairs,
            vec![
                ("q".to_string(), text.trim().to_string()),
                ("category_id".to_string(), "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_text_never_searches(spaces in "[ \\t]{0,8}") {
        let query = DocumentQuery::new(spaces, None);
        let url = query.url(&config("10.0.0.2:3000")).unwrap();
        prop_assert_eq!(url, "http://10.0.0.2:3000/api/v1/documents");
    }
}
