// src/domain/service/mod.rs
// Pure derivations over a catalog snapshot

use std::cmp::Ordering;

use crate::domain::models::{Category, CategoryId, ExploreQuery, Listing, SortKey};

/// Number of listings shown in the featured strip
pub const FEATURED_LIMIT: usize = 4;

pub fn find_by_id<'a>(listings: &'a [Listing], id: &str) -> Option<&'a Listing> {
    listings.iter().find(|l| l.id == id)
}

pub fn filter_by_category(listings: &[Listing], category: CategoryId) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| l.category == category)
        .cloned()
        .collect()
}

/// Case-insensitive substring match on name, description and creator.
/// An empty query matches everything.
pub fn matches_query(listing: &Listing, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    listing.name.to_lowercase().contains(&needle)
        || listing.description.to_lowercase().contains(&needle)
        || listing.creator.to_lowercase().contains(&needle)
}

pub fn search(listings: &[Listing], query: &str) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| matches_query(l, query))
        .cloned()
        .collect()
}

fn by_rating_desc(a: &Listing, b: &Listing) -> Ordering {
    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
}

/// Top rated listings. `sort_by` is stable, so equal ratings keep store order.
pub fn featured(listings: &[Listing]) -> Vec<Listing> {
    let mut sorted = listings.to_vec();
    sorted.sort_by(by_rating_desc);
    sorted.truncate(FEATURED_LIMIT);
    sorted
}

pub fn categories(listings: &[Listing]) -> Vec<Category> {
    CategoryId::all()
        .iter()
        .map(|&id| Category {
            id,
            name: id.display_name(),
            count: listings.iter().filter(|l| l.category == id).count(),
        })
        .collect()
}

pub fn sort_listings(listings: &mut [Listing], key: SortKey) {
    match key {
        SortKey::Popularity => listings.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
        SortKey::Newest => listings.sort_by(|a, b| b.created.cmp(&a.created)),
        SortKey::PriceLow => listings.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => listings.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => listings.sort_by(by_rating_desc),
    }
}

pub fn explore(listings: &[Listing], query: &ExploreQuery) -> Vec<Listing> {
    let mut results: Vec<Listing> = listings
        .iter()
        .filter(|l| query.category.map_or(true, |c| l.category == c))
        .filter(|l| matches_query(l, &query.search))
        .cloned()
        .collect();

    sort_listings(&mut results, query.sort);
    results
}

pub fn owned(listings: &[Listing]) -> Vec<Listing> {
    listings.iter().filter(|l| l.owned).cloned().collect()
}

/// Copy of the collection with one listing marked as owned
pub fn mark_owned(listings: &[Listing], id: &str) -> Vec<Listing> {
    listings
        .iter()
        .map(|l| {
            if l.id == id {
                Listing {
                    owned: true,
                    ..l.clone()
                }
            } else {
                l.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn listing(id: &str, name: &str, category: CategoryId, rating: f64) -> Listing {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            creator: "Tester".to_string(),
            creator_wallet: "0x0".to_string(),
            price: dec!(0.1),
            currency: "ETH".to_string(),
            image_url: String::new(),
            rating,
            reviews: 0,
            category,
            tags: Vec::new(),
            created: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            owned: false,
            featured: false,
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", "Alpha", CategoryId::ImageGeneration, 4.0),
            listing("b", "Beta", CategoryId::TextGeneration, 4.5),
            listing("c", "Gamma", CategoryId::ImageGeneration, 4.0),
            listing("d", "Delta", CategoryId::DataAnalysis, 3.0),
            listing("e", "Epsilon", CategoryId::ComputerVision, 4.0),
        ]
    }

    #[test]
    fn test_featured_is_stable_on_ties() {
        let ids: Vec<String> = featured(&sample()).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["b", "a", "c", "e"]);
    }

    #[test]
    fn test_featured_with_small_catalog() {
        let small = &sample()[..2];
        assert_eq!(featured(small).len(), 2);
        assert!(featured(&[]).is_empty());
    }

    #[test]
    fn test_category_counts_match_filter() {
        let listings = sample();
        for category in categories(&listings) {
            assert_eq!(category.count, filter_by_category(&listings, category.id).len());
        }
        assert_eq!(categories(&listings).len(), CategoryId::all().len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let listings = sample();
        assert_eq!(search(&listings, "GAMMA").len(), 1);
        assert_eq!(search(&listings, "tester").len(), listings.len());
        assert_eq!(search(&listings, ""), listings);
        assert!(search(&listings, "nothing here").is_empty());
    }

    #[test]
    fn test_explore_combines_category_and_search() {
        let listings = sample();
        let query = ExploreQuery {
            category: Some(CategoryId::ImageGeneration),
            search: "gam".to_string(),
            sort: SortKey::Popularity,
        };
        let results = explore(&listings, &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "c");
    }

    #[test]
    fn test_sort_by_price() {
        let mut listings = sample();
        listings[3].price = dec!(0.05);
        listings[1].price = dec!(0.9);

        sort_listings(&mut listings, SortKey::PriceLow);
        assert_eq!(listings.first().map(|l| l.id.as_str()), Some("d"));

        sort_listings(&mut listings, SortKey::PriceHigh);
        assert_eq!(listings.first().map(|l| l.id.as_str()), Some("b"));
    }

    #[test]
    fn test_mark_owned_touches_one_listing() {
        let listings = sample();
        let updated = mark_owned(&listings, "c");
        assert!(updated[2].owned);
        assert_eq!(owned(&updated).len(), 1);
        assert_eq!(&updated[..2], &listings[..2]);
        assert_eq!(&updated[3..], &listings[3..]);
    }
}
