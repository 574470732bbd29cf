//! Country code to continent classification, used only for file placement.

use std::fmt;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    /// Continents that have a generated TOC and overview snippet.
    pub const REGIONS: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Antarctica => "Antarctica",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }

    /// Name without spaces, used for folders and file stems.
    pub fn folder(&self) -> String {
        self.name().replace(' ', "")
    }

    pub fn has_region(&self) -> bool {
        Self::REGIONS.contains(self)
    }

    /// Classify an ISO 3166-1 alpha-2 code (case-insensitive).
    pub fn from_country_code(code: &str) -> Result<Self> {
        let upper = code.trim().to_ascii_uppercase();
        let continent = match upper.as_str() {
            "DZ" | "AO" | "BJ" | "BW" | "BF" | "BI" | "CM" | "CV" | "CF" | "TD" | "KM" | "CD"
            | "CG" | "CI" | "DJ" | "EG" | "GQ" | "ER" | "ET" | "GA" | "GM" | "GH" | "GN"
            | "GW" | "KE" | "LS" | "LR" | "LY" | "MG" | "MW" | "ML" | "MR" | "MU" | "YT"
            | "MA" | "MZ" | "NA" | "NE" | "NG" | "RE" | "RW" | "SH" | "ST" | "SN" | "SC"
            | "SL" | "SO" | "ZA" | "SS" | "SD" | "SZ" | "TZ" | "TG" | "TN" | "UG" | "EH"
            | "ZM" | "ZW" => Continent::Africa,

            "AQ" | "BV" | "GS" | "HM" | "TF" => Continent::Antarctica,

            "AF" | "AM" | "AZ" | "BH" | "BD" | "BT" | "BN" | "KH" | "CN" | "CX" | "CC" | "CY"
            | "GE" | "HK" | "IN" | "ID" | "IR" | "IQ" | "IL" | "IO" | "JP" | "JO" | "KZ"
            | "KP" | "KR" | "KW" | "KG" | "LA" | "LB" | "MO" | "MY" | "MV" | "MN" | "MM"
            | "NP" | "OM" | "PK" | "PS" | "PH" | "QA" | "SA" | "SG" | "LK" | "SY" | "TW"
            | "TJ" | "TH" | "TL" | "TR" | "TM" | "AE" | "UZ" | "VN" | "YE" => Continent::Asia,

            "AX" | "AL" | "AD" | "AT" | "BY" | "BE" | "BA" | "BG" | "HR" | "CZ" | "DK" | "EE"
            | "FO" | "FI" | "FR" | "DE" | "GI" | "GR" | "GG" | "VA" | "HU" | "IS" | "IE"
            | "IM" | "IT" | "JE" | "XK" | "LV" | "LI" | "LT" | "LU" | "MT" | "MD" | "MC"
            | "ME" | "NL" | "MK" | "NO" | "PL" | "PT" | "RO" | "RU" | "SM" | "RS" | "SK"
            | "SI" | "ES" | "SJ" | "SE" | "CH" | "UA" | "GB" => Continent::Europe,

            "AI" | "AG" | "AW" | "BS" | "BB" | "BZ" | "BM" | "BQ" | "VG" | "CA" | "KY" | "CR"
            | "CU" | "CW" | "DM" | "DO" | "SV" | "GL" | "GD" | "GP" | "GT" | "HT" | "HN"
            | "JM" | "MQ" | "MX" | "MS" | "NI" | "PA" | "PR" | "BL" | "KN" | "LC" | "MF"
            | "PM" | "VC" | "SX" | "TT" | "TC" | "US" | "VI" => Continent::NorthAmerica,

            "AS" | "AU" | "CK" | "FJ" | "PF" | "GU" | "KI" | "MH" | "FM" | "NR" | "NC" | "NZ"
            | "NU" | "NF" | "MP" | "PW" | "PG" | "PN" | "WS" | "SB" | "TK" | "TO" | "TV"
            | "UM" | "VU" | "WF" => Continent::Oceania,

            "AR" | "BO" | "BR" | "CL" | "CO" | "EC" | "FK" | "GF" | "GY" | "PY" | "PE" | "SR"
            | "UY" | "VE" => Continent::SouthAmerica,

            _ => return Err(Error::UnknownCountry(code.to_string())),
        };
        Ok(continent)
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
