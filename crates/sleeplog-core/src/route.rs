//! Screen routes as the single source of truth for route names.

use std::fmt;
use std::str::FromStr;

/// The screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    SleepBenefits,
    NewSleepEntry,
    ViewSleepData,
}

impl Route {
    pub const ALL: [Self; 4] = [
        Self::Home,
        Self::SleepBenefits,
        Self::NewSleepEntry,
        Self::ViewSleepData,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::SleepBenefits => "sleep_benefits",
            Self::NewSleepEntry => "new_sleep_entry",
            Self::ViewSleepData => "view_sleep_data",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "sleep_benefits" => Ok(Self::SleepBenefits),
            "new_sleep_entry" => Ok(Self::NewSleepEntry),
            "view_sleep_data" => Ok(Self::ViewSleepData),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

/// Error type for unknown route names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route: {}", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_routes() {
        for route in Route::ALL {
            let parsed: Route = route.to_string().parse().expect("should parse");
            assert_eq!(parsed, route, "roundtrip failed for {route:?}");
        }
    }

    #[test]
    fn route_names_are_stable() {
        let names: Vec<_> = Route::ALL.iter().map(Route::as_str).collect();
        assert_eq!(
            names,
            ["home", "sleep_benefits", "new_sleep_entry", "view_sleep_data"]
        );
    }

    #[test]
    fn unknown_route_errors() {
        let err = "settings".parse::<Route>().unwrap_err();
        assert_eq!(err.to_string(), "unknown route: settings");
    }
}
