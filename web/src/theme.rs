use crate::utils::*;
use serde::{Deserialize, Serialize};

/// A pinned color scheme; `None` at the `Option<Theme>` level means "follow
/// the user agent preference".
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    /// Next stop on the toggle cycle: auto, light, dark, auto again.
    pub(crate) const fn next(theme: Option<Self>) -> Option<Self> {
        match theme {
            None => Some(Self::Light),
            Some(Self::Light) => Some(Self::Dark),
            Some(Self::Dark) => None,
        }
    }

    pub(crate) const fn label(theme: Option<Self>) -> &'static str {
        match theme {
            None => "Auto",
            Some(Self::Light) => "Light",
            Some(Self::Dark) => "Dark",
        }
    }

    fn update_html(theme: Option<Self>) {
        use gloo::utils::document;
        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        if let Some(theme) = theme {
            let scheme = theme.scheme();
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("no theme preference");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn init() {
        Self::update_html(LocalOrDefault::local_or_default());
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "connections:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_auto_light_dark() {
        let auto = None;
        let light = Theme::next(auto);
        let dark = Theme::next(light);

        assert_eq!(light, Some(Theme::Light));
        assert_eq!(dark, Some(Theme::Dark));
        assert_eq!(Theme::next(dark), None);
    }

    #[test]
    fn labels_cover_every_stop() {
        assert_eq!(Theme::label(None), "Auto");
        assert_eq!(Theme::label(Some(Theme::Light)), "Light");
        assert_eq!(Theme::label(Some(Theme::Dark)), "Dark");
    }
}
