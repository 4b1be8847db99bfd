//! The ip-api field registry.
//!
//! Every attribute the API can return has a wire name and a bit value. A
//! request selects attributes with the `fields` query parameter, either as a
//! comma separated list of names or as the decimal sum of their bits.
//!
//! Bit `262144` is not assigned upstream, so no variant uses it.

use std::fmt;
use std::str::FromStr;

use crate::IpApiError;

/// Field selector used by a freshly constructed [`Client`](crate::Client).
pub const DEFAULT_FIELDS: &str = "status,message,country,countryCode,region,regionName,city,zip,lat,lon,timezone,isp,org,as,query";

/// A selectable response attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Country name.
    Country,
    /// ISO 3166-1 alpha-2 country code.
    CountryCode,
    /// Region or state short code.
    Region,
    /// Region or state name.
    RegionName,
    /// City name.
    City,
    /// Postal code.
    Zip,
    /// Latitude.
    Lat,
    /// Longitude.
    Lon,
    /// IANA time zone name.
    Timezone,
    /// ISP name.
    Isp,
    /// Organization name.
    Org,
    /// AS number and organization.
    As,
    /// Reverse DNS of the IP.
    Reverse,
    /// IP address the answer is about.
    Query,
    /// `success` or `fail`.
    Status,
    /// Failure reason, only sent with `fail`.
    Message,
    /// Cellular connection.
    Mobile,
    /// Proxy, VPN or Tor exit.
    Proxy,
    /// District within the city.
    District,
    /// Continent name.
    Continent,
    /// Two-letter continent code.
    ContinentCode,
    /// AS name from RIR data.
    Asname,
    /// National currency code.
    Currency,
    /// Hosting, colocation or data center.
    Hosting,
    /// UTC offset of the time zone in seconds.
    Offset,
}

impl Field {
    /// All fields, ordered by bit value.
    pub const ALL: [Field; 25] = [
        Field::Country,
        Field::CountryCode,
        Field::Region,
        Field::RegionName,
        Field::City,
        Field::Zip,
        Field::Lat,
        Field::Lon,
        Field::Timezone,
        Field::Isp,
        Field::Org,
        Field::As,
        Field::Reverse,
        Field::Query,
        Field::Status,
        Field::Message,
        Field::Mobile,
        Field::Proxy,
        Field::District,
        Field::Continent,
        Field::ContinentCode,
        Field::Asname,
        Field::Currency,
        Field::Hosting,
        Field::Offset,
    ];

    /// The name used on the wire and as the JSON key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::CountryCode => "countryCode",
            Field::Region => "region",
            Field::RegionName => "regionName",
            Field::City => "city",
            Field::Zip => "zip",
            Field::Lat => "lat",
            Field::Lon => "lon",
            Field::Timezone => "timezone",
            Field::Isp => "isp",
            Field::Org => "org",
            Field::As => "as",
            Field::Reverse => "reverse",
            Field::Query => "query",
            Field::Status => "status",
            Field::Message => "message",
            Field::Mobile => "mobile",
            Field::Proxy => "proxy",
            Field::District => "district",
            Field::Continent => "continent",
            Field::ContinentCode => "continentCode",
            Field::Asname => "asname",
            Field::Currency => "currency",
            Field::Hosting => "hosting",
            Field::Offset => "offset",
        }
    }

    /// The bit used in numeric selectors.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Field::Country => 1,
            Field::CountryCode => 2,
            Field::Region => 4,
            Field::RegionName => 8,
            Field::City => 16,
            Field::Zip => 32,
            Field::Lat => 64,
            Field::Lon => 128,
            Field::Timezone => 256,
            Field::Isp => 512,
            Field::Org => 1024,
            Field::As => 2048,
            Field::Reverse => 4096,
            Field::Query => 8192,
            Field::Status => 16384,
            Field::Message => 32768,
            Field::Mobile => 65536,
            Field::Proxy => 131072,
            Field::District => 524288,
            Field::Continent => 1048576,
            Field::ContinentCode => 2097152,
            Field::Asname => 4194304,
            Field::Currency => 8388608,
            Field::Hosting => 16777216,
            Field::Offset => 33554432,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = IpApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| IpApiError::unknown_field(s))
    }
}

/// Returns true if `name` is a field the API accepts.
#[must_use]
pub fn field_allowed(name: &str) -> bool {
    name.parse::<Field>().is_ok()
}

/// Keeps the known names in first-seen order, dropping unknown names and
/// repeats.
pub(crate) fn filter<I, S>(names: I) -> Vec<Field>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept: Vec<Field> = Vec::new();
    for name in names {
        let name = name.as_ref();
        match name.parse::<Field>() {
            Ok(field) if !kept.contains(&field) => kept.push(field),
            Ok(_) => {}
            Err(_) => log::debug!("dropping unknown field {name:?}"),
        }
    }
    kept
}

/// Comma separated selector.
#[must_use]
pub fn encode_names(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decimal bitmask selector. Callers pass deduplicated fields.
#[must_use]
pub fn encode_numeric(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.bit())
        .sum::<u32>()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct_powers_of_two() {
        let mut seen = 0_u32;
        for field in Field::ALL {
            let bit = field.bit();
            assert!(bit.is_power_of_two(), "{field} has bit {bit}");
            assert_eq!(seen & bit, 0, "{field} reuses bit {bit}");
            seen |= bit;
        }
        // 262144 is unassigned upstream
        assert_eq!(seen & 262_144, 0);
        assert_eq!(seen, 0x03FB_FFFF);
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
            assert!(field_allowed(field.as_str()));
        }
    }

    #[test]
    fn test_field_allowed() {
        assert!(field_allowed("status"));
        assert!(field_allowed("continentCode"));
        assert!(!field_allowed("nonAllowed"));
        assert!(!field_allowed("countrycode"));
        assert!(!field_allowed(""));
    }

    #[test]
    fn test_unknown_field_error() {
        match "bogus".parse::<Field>() {
            Err(IpApiError::UnknownField { name }) => assert_eq!(name, "bogus"),
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_preserves_order_and_dedups() {
        let kept = filter(["query", "bogus", "status", "query", "message"]);
        assert_eq!(kept, vec![Field::Query, Field::Status, Field::Message]);
        assert!(filter(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_encodings() {
        let fields = [Field::Status, Field::Query, Field::Message];
        assert_eq!(encode_names(&fields), "status,query,message");
        assert_eq!(encode_numeric(&fields), "57344");
        assert_eq!(encode_names(&[]), "");
        assert_eq!(encode_numeric(&[]), "0");
    }

    #[test]
    fn test_default_fields_are_known() {
        let names: Vec<&str> = DEFAULT_FIELDS.split(',').collect();
        assert_eq!(filter(&names).len(), names.len());
    }
}
