//! Business listing (Home / Marketplace) and the details page.

use nasugview_shared::fixtures::{businesses, businesses_in, categories, find_business};
use nasugview_shared::{Business, Category, MapRegion};

use crate::error::ClientError;
use crate::navigation::{BusinessParams, Route};
use crate::screens::{lock_nav, SharedNavigator};

pub const NOT_FOUND_MESSAGE: &str = "Business not found.";

pub struct DirectoryScreen {
    nav: SharedNavigator,
    category: Option<Category>,
}

impl DirectoryScreen {
    pub fn new(nav: SharedNavigator) -> Self {
        Self {
            nav,
            category: None,
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        categories()
    }

    /// `None` shows every business.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn listing(&self) -> Vec<&'static Business> {
        match self.category {
            Some(category) => businesses_in(category),
            None => businesses().iter().collect(),
        }
    }

    pub fn open(&self, business_name: &str) -> Result<(), ClientError> {
        lock_nav(&self.nav).navigate(Route::BusinessDetails(BusinessParams::new(business_name)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusinessDetails {
    Found {
        business: &'static Business,
        region: MapRegion,
    },
    NotFound {
        name: String,
    },
}

impl BusinessDetails {
    pub fn load(name: &str) -> Self {
        match find_business(name) {
            Some(business) => BusinessDetails::Found {
                business,
                region: business.location.region(),
            },
            None => {
                tracing::warn!(name, "business not in directory");
                BusinessDetails::NotFound {
                    name: name.to_string(),
                }
            }
        }
    }

    pub fn business(&self) -> Option<&'static Business> {
        match self {
            BusinessDetails::Found { business, .. } => Some(*business),
            BusinessDetails::NotFound { .. } => None,
        }
    }

    /// "See reviews" button.
    pub fn open_reviews(&self, nav: &SharedNavigator) -> Result<(), ClientError> {
        let business = self.business().ok_or_else(|| {
            ClientError::Navigation(NOT_FOUND_MESSAGE.to_string())
        })?;
        lock_nav(nav).navigate(Route::Review(BusinessParams::new(business.name)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use nasugview_shared::constants::MAP_SPAN_DEGREES;
    use nasugview_shared::UserProfile;

    use super::*;
    use crate::navigation::{Navigator, TabsParams};

    fn nav() -> SharedNavigator {
        let mut nav = Navigator::default();
        nav.replace(Route::Tabs(TabsParams {
            profile: UserProfile::named("ana"),
        }))
        .unwrap();
        Arc::new(Mutex::new(nav))
    }

    #[test]
    fn test_category_filter() {
        let mut screen = DirectoryScreen::new(nav());
        assert_eq!(screen.listing().len(), 7);

        screen.set_category(Some(Category::Resorts));
        let names: Vec<_> = screen.listing().iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["BernaBeach Resort", "Golden View Resort"]);

        screen.set_category(None);
        assert_eq!(screen.listing().len(), 7);
    }

    #[test]
    fn test_open_pushes_details() {
        let nav = nav();
        let screen = DirectoryScreen::new(nav.clone());
        screen.open("Len Wings").unwrap();
        assert_eq!(
            nav.lock().unwrap().current(),
            &Route::BusinessDetails(BusinessParams::new("Len Wings"))
        );
        assert!(screen.open("Nowhere Cafe").is_err());
    }

    #[test]
    fn test_details_region() {
        let details = BusinessDetails::load("Pendong By Rance");
        match details {
            BusinessDetails::Found { business, region } => {
                assert_eq!(business.category, None);
                assert_eq!(region.center, business.location);
                assert_eq!(region.latitude_delta, MAP_SPAN_DEGREES);
            }
            BusinessDetails::NotFound { .. } => panic!("fixture missing"),
        }
    }

    #[test]
    fn test_unknown_business() {
        let details = BusinessDetails::load("Nowhere Cafe");
        assert!(details.business().is_none());
        assert!(details.open_reviews(&nav()).is_err());
    }

    #[test]
    fn test_open_reviews() {
        let nav = nav();
        nav.lock()
            .unwrap()
            .navigate(Route::BusinessDetails(BusinessParams::new("Cora RTW Store")))
            .unwrap();
        BusinessDetails::load("Cora RTW Store")
            .open_reviews(&nav)
            .unwrap();
        assert_eq!(
            nav.lock().unwrap().current(),
            &Route::Review(BusinessParams::new("Cora RTW Store"))
        );
    }
}
