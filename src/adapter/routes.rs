// src/adapter/routes.rs
// Client-side routes

use std::collections::HashMap;
use std::fmt;

use url::Url;

use crate::domain::models::{CategoryId, ExploreQuery, SortKey};

// Only used to resolve relative paths
const ROUTE_BASE: &str = "app://marketplace/";

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Explore {
        /// Raw `category` parameter; unknown values match nothing
        category: Option<String>,
        search: String,
        sort: SortKey,
    },
    ListingDetail {
        id: String,
    },
    Dashboard,
    Profile,
    NotFound {
        path: String,
    },
}

impl Route {
    /// Parse a path such as `/explore?category=image-generation&q=art`
    pub fn parse(path: &str) -> Route {
        let url = match Url::parse(ROUTE_BASE).and_then(|base| base.join(path)) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Unparseable route {}: {}", path, e);
                return Route::NotFound {
                    path: path.to_string(),
                };
            }
        };

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Route::Home,
            ["explore"] => Route::Explore {
                category: params.get("category").filter(|c| !c.is_empty()).cloned(),
                search: params.get("q").cloned().unwrap_or_default(),
                sort: params
                    .get("sort")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            ["model", id] => Route::ListingDetail { id: id.to_string() },
            ["dashboard"] => Route::Dashboard,
            ["profile"] => Route::Profile,
            _ => Route::NotFound {
                path: url.path().to_string(),
            },
        }
    }

    /// Explore filter for this route, or `None` for other routes.
    ///
    /// The second value is false when the category parameter is not a
    /// known category, in which case nothing matches.
    pub fn explore_query(&self) -> Option<(ExploreQuery, bool)> {
        match self {
            Route::Explore {
                category,
                search,
                sort,
            } => {
                let parsed = category.as_deref().map(str::parse::<CategoryId>);
                let known = !matches!(parsed, Some(Err(_)));
                Some((
                    ExploreQuery {
                        category: parsed.and_then(Result::ok),
                        search: search.clone(),
                        sort: *sort,
                    },
                    known,
                ))
            }
            _ => None,
        }
    }

    pub fn requires_wallet(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Profile)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Explore { category, .. } => match category {
                Some(c) => write!(f, "/explore?category={}", c),
                None => write!(f, "/explore"),
            },
            Route::ListingDetail { id } => write!(f, "/model/{}", id),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Profile => write!(f, "/profile"),
            Route::NotFound { path } => write!(f, "{}", path),
        }
    }
}
