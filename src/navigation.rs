//! The page header and its navigation links.

use maud::{Markup, html};

use crate::{endpoints, html::APP_NAME};

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "nav__link nav__link--current"
        } else {
            "nav__link"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            { (self.title) }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![Link {
            url: endpoints::DASHBOARD_VIEW,
            title: "Dashboard",
            is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
        }];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html! {
            header class="header"
            {
                div class="header__content"
                {
                    a href=(endpoints::ROOT) class="header__brand" { (APP_NAME) }

                    nav class="nav"
                    {
                        @for link in self.links {
                            (link.into_html())
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        endpoints,
        test_utils::{parse_markup, select_all, text_of},
    };

    use super::NavBar;

    #[test]
    fn marks_active_link() {
        let html = parse_markup(NavBar::new(endpoints::DASHBOARD_VIEW).into_html());

        let current = select_all(&html, "a[aria-current='page']");
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].value().attr("href"), Some(endpoints::DASHBOARD_VIEW));
        assert_eq!(text_of(&html, ".header__brand"), "Finances");
    }

    #[test]
    fn no_active_link_for_other_pages() {
        let html = parse_markup(NavBar::new(endpoints::INTERNAL_ERROR_VIEW).into_html());

        assert!(select_all(&html, "a[aria-current]").is_empty());
    }
}
