//! Static directory and event data bundled with the client.
//!
//! Businesses and events are not fetched; the backend only knows businesses
//! by name, through their reviews.

use chrono::NaiveDate;

use crate::types::{Business, Category, Coordinates, Event};

pub static BUSINESSES: &[Business] = &[
    Business {
        name: "Cora RTW Store",
        image: "assets/images/store.jpg",
        address: "Brgy. 10 Public Market, Nasugbu, Batangas",
        category: Some(Category::Clothes),
        rating: 5.0,
        location: Coordinates {
            latitude: 14.0687,
            longitude: 120.6309,
        },
        phone: "0912-111-1234",
        hours: "9:00 AM – 8:00 PM, Mon to Sat",
    },
    Business {
        name: "BernaBeach Resort",
        image: "assets/images/berna.png",
        address: "Brgy. Bucana, Nasugbu, Batangas",
        category: Some(Category::Resorts),
        rating: 4.9,
        location: Coordinates {
            latitude: 14.0686,
            longitude: 120.6256,
        },
        phone: "0912-222-2345",
        hours: "Open 24 hours",
    },
    Business {
        name: "Bulalohan sa Kanto",
        image: "assets/images/bulalo.jpg",
        address: "Brgy. 10, Nasugbu, Batangas",
        category: Some(Category::Restaurants),
        rating: 4.8,
        location: Coordinates {
            latitude: 14.0687,
            longitude: 120.6309,
        },
        phone: "0912-333-3456",
        hours: "10:00 AM – 9:00 PM",
    },
    Business {
        name: "RRJ Boutique",
        image: "assets/images/rrj.jpg",
        address: "J P Laurel St, Nasugbu, Batangas",
        category: Some(Category::Clothes),
        rating: 4.7,
        location: Coordinates {
            latitude: 14.0687,
            longitude: 120.6309,
        },
        phone: "0912-444-4567",
        hours: "10:00 AM – 7:00 PM",
    },
    Business {
        name: "Golden View Resort",
        image: "assets/images/gold.jpg",
        address: "Brgy. Bucana, Nasugbu, Batangas",
        category: Some(Category::Resorts),
        rating: 4.6,
        location: Coordinates {
            latitude: 14.0732,
            longitude: 120.6252,
        },
        phone: "0912-555-5678",
        hours: "Open 24 hours",
    },
    Business {
        name: "Len Wings",
        image: "assets/images/unli.jpg",
        address: "Brgy. Wawa, Nasugbu, Batangas",
        category: Some(Category::Restaurants),
        rating: 4.5,
        location: Coordinates {
            latitude: 14.067,
            longitude: 120.632,
        },
        phone: "0912-666-6789",
        hours: "11:00 AM – 11:00 PM",
    },
    Business {
        name: "Pendong By Rance",
        image: "assets/images/pendong.jpg",
        address: "Concepcion St, Nasugbu, Batangas",
        category: None,
        rating: 4.6,
        location: Coordinates {
            latitude: 14.071693,
            longitude: 120.633633,
        },
        phone: "0912-777-7890",
        hours: "10:00 AM – 10:00 PM",
    },
];

/// (ISO date, name, location, time)
const EVENT_TABLE: &[(&str, &str, &str, &str)] = &[
    (
        "2025-06-22",
        "Fun Run",
        "Town Convention Center",
        "10:00 AM – 3:00 PM",
    ),
    (
        "2025-06-30",
        "Coastal Cleanup: Nasugbu Beach",
        "Eco Park Pavilion",
        "9:00 AM – 12:00 PM",
    ),
    (
        "2025-07-01",
        "Coastal Cleanup",
        "Co-Working Space",
        "2:00 PM – 5:00 PM",
    ),
    (
        "2025-07-05",
        "Mamaraka",
        "Municipal Hall of Nasugbu",
        "3:00 PM – 5:00 PM",
    ),
];

pub fn businesses() -> &'static [Business] {
    BUSINESSES
}

/// Exact, case-sensitive lookup by business name.
pub fn find_business(name: &str) -> Option<&'static Business> {
    BUSINESSES.iter().find(|b| b.name == name)
}

pub fn businesses_in(category: Category) -> Vec<&'static Business> {
    BUSINESSES
        .iter()
        .filter(|b| b.category == Some(category))
        .collect()
}

/// Categories present in the directory, in first-seen order.
pub fn categories() -> Vec<Category> {
    let mut seen = Vec::new();
    for category in BUSINESSES.iter().filter_map(|b| b.category) {
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

pub fn events() -> Vec<Event> {
    EVENT_TABLE
        .iter()
        .filter_map(|&(date, name, location, time)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            Some(Event {
                date,
                name,
                location,
                time,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_names_are_unique() {
        let mut names: Vec<&str> = BUSINESSES.iter().map(|b| b.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUSINESSES.len());
    }

    #[test]
    fn test_find_business() {
        let biz = find_business("Len Wings").unwrap();
        assert_eq!(biz.phone, "0912-666-6789");
        assert!(find_business("len wings").is_none());
        assert!(find_business("Jollibee").is_none());
    }

    #[test]
    fn test_ratings_in_range() {
        for biz in BUSINESSES {
            assert!((0.0..=5.0).contains(&biz.rating), "{}", biz.name);
        }
    }

    #[test]
    fn test_category_listing() {
        assert_eq!(
            categories(),
            vec![Category::Clothes, Category::Resorts, Category::Restaurants]
        );
        let resorts: Vec<&str> = businesses_in(Category::Resorts)
            .iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(resorts, vec!["BernaBeach Resort", "Golden View Resort"]);
    }

    #[test]
    fn test_all_events_parse() {
        let events = events();
        assert_eq!(events.len(), EVENT_TABLE.len());
        assert_eq!(events[0].name, "Fun Run");
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 6, 22).unwrap());
    }
}
