//! Species and month identifiers
//!
//! The dashboard covers four waterbird species surveyed on the Korean
//! peninsula between 2014 and 2024, and the six calendar months for which
//! survey footage exists. Both sets are closed: every lookup and filename in
//! the crate is keyed by these enums, never by raw strings, so an invalid
//! code or month token cannot travel past the parsing boundary.
//!
//! The `bird1`..`bird4` code tokens come from the survey pipeline that
//! renders the map clips. They key the commentary table and prefix every
//! video filename, so they are wire format and must never change.

/// One of the four surveyed species, in dashboard tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// 괭이갈매기 - coastal gull, winters nationwide
    BlackTailedGull,
    /// 흰뺨검둥오리 - the most climate-tolerant of the four
    SpotBilledDuck,
    /// 쇠백로 - the most SPEI-sensitive of the four
    LittleEgret,
    /// 왜가리 - resident heron, stable low-density distribution
    GreyHeron,
}

impl Species {
    /// Every species, in the order the tabs appear.
    pub const ALL: [Species; 4] = [
        Species::BlackTailedGull,
        Species::SpotBilledDuck,
        Species::LittleEgret,
        Species::GreyHeron,
    ];

    /// Filename prefix and report-table key.
    pub fn code(&self) -> &'static str {
        match self {
            Species::BlackTailedGull => "bird1",
            Species::SpotBilledDuck => "bird2",
            Species::LittleEgret => "bird3",
            Species::GreyHeron => "bird4",
        }
    }

    /// Display name as it appears on the dashboard.
    pub fn korean_name(&self) -> &'static str {
        match self {
            Species::BlackTailedGull => "괭이갈매기",
            Species::SpotBilledDuck => "흰뺨검둥오리",
            Species::LittleEgret => "쇠백로",
            Species::GreyHeron => "왜가리",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Species::BlackTailedGull => "Black-tailed Gull",
            Species::SpotBilledDuck => "Eastern Spot-billed Duck",
            Species::LittleEgret => "Little Egret",
            Species::GreyHeron => "Grey Heron",
        }
    }

    /// Parse a wire code. Codes are exact; no case folding.
    pub fn from_code(code: &str) -> Option<Species> {
        match code {
            "bird1" => Some(Species::BlackTailedGull),
            "bird2" => Some(Species::SpotBilledDuck),
            "bird3" => Some(Species::LittleEgret),
            "bird4" => Some(Species::GreyHeron),
            _ => None,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.korean_name())
    }
}

/// One of the six months with survey footage.
///
/// The set is non-contiguous: the census runs October through March, so
/// `04`..`09` simply do not exist anywhere in the system. Declaration order
/// is the order the month controls present, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Every supported month, in control order.
    pub const ALL: [Month; 6] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Two-digit wire token, used as the filename suffix.
    pub fn token(&self) -> &'static str {
        match self {
            Month::Jan => "01",
            Month::Feb => "02",
            Month::Mar => "03",
            Month::Oct => "10",
            Month::Nov => "11",
            Month::Dec => "12",
        }
    }

    /// Display label for the month controls.
    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "1월",
            Month::Feb => "2월",
            Month::Mar => "3월",
            Month::Oct => "10월",
            Month::Nov => "11월",
            Month::Dec => "12월",
        }
    }

    /// Parse a wire token. Membership is the only validation there is.
    pub fn from_token(token: &str) -> Option<Month> {
        match token {
            "01" => Some(Month::Jan),
            "02" => Some(Month::Feb),
            "03" => Some(Month::Mar),
            "10" => Some(Month::Oct),
            "11" => Some(Month::Nov),
            "12" => Some(Month::Dec),
            _ => None,
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
