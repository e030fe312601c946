use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::aggregate::AggregateError;
use super::model::TimeSeriesTable;

// ---------------------------------------------------------------------------
// DistrictKey – the eight city districts present in the housing file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DistrictKey {
    Centrum,
    FosieOxie,
    Hyllie,
    Kirseberg,
    LimhamnBunkeflo,
    RosengardHusie,
    SodraInnerstaden,
    VastraInnerstaden,
}

impl DistrictKey {
    pub const ALL: [DistrictKey; 8] = [
        DistrictKey::Centrum,
        DistrictKey::FosieOxie,
        DistrictKey::Hyllie,
        DistrictKey::Kirseberg,
        DistrictKey::LimhamnBunkeflo,
        DistrictKey::RosengardHusie,
        DistrictKey::SodraInnerstaden,
        DistrictKey::VastraInnerstaden,
    ];

    /// Column-name prefix used in the housing file.
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistrictKey::Centrum => "C",
            DistrictKey::FosieOxie => "FO",
            DistrictKey::Hyllie => "HY",
            DistrictKey::Kirseberg => "KB",
            DistrictKey::LimhamnBunkeflo => "LB",
            DistrictKey::RosengardHusie => "RGH",
            DistrictKey::SodraInnerstaden => "SI",
            DistrictKey::VastraInnerstaden => "VI",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DistrictKey::Centrum => "Centrum",
            DistrictKey::FosieOxie => "Fosie-Oxie",
            DistrictKey::Hyllie => "Hyllie",
            DistrictKey::Kirseberg => "Kirseberg",
            DistrictKey::LimhamnBunkeflo => "Limhamn-Bunkeflo",
            DistrictKey::RosengardHusie => "Rosengård-Husie",
            DistrictKey::SodraInnerstaden => "Södra Innerstaden",
            DistrictKey::VastraInnerstaden => "Västra Innerstaden",
        }
    }

    /// Name of the average price per square meter column.
    pub fn ppsm_column(self) -> String {
        format!("{}_PPSM", self.abbreviation())
    }

    /// Name of the number of sales column.
    pub fn nos_column(self) -> String {
        format!("{}_NOS", self.abbreviation())
    }

    pub fn room_column(self, bucket: RoomBucket) -> String {
        format!("{}_PPSM{}", self.abbreviation(), bucket.suffix())
    }
}

impl fmt::Display for DistrictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown district '{0}'")]
pub struct UnknownDistrict(pub String);

/// Accepts either the abbreviation (`"HY"`) or the display name (`"Hyllie"`).
impl FromStr for DistrictKey {
    type Err = UnknownDistrict;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DistrictKey::ALL
            .into_iter()
            .find(|d| {
                d.abbreviation().eq_ignore_ascii_case(s) || d.display_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| UnknownDistrict(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RoomBucket – price per square meter split by apartment size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomBucket {
    One,
    Two,
    Three,
    FourPlus,
}

impl RoomBucket {
    pub const ALL: [RoomBucket; 4] = [
        RoomBucket::One,
        RoomBucket::Two,
        RoomBucket::Three,
        RoomBucket::FourPlus,
    ];

    fn suffix(self) -> &'static str {
        match self {
            RoomBucket::One => "1R",
            RoomBucket::Two => "2R",
            RoomBucket::Three => "3R",
            RoomBucket::FourPlus => "4PR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomBucket::One => "1 room",
            RoomBucket::Two => "2 rooms",
            RoomBucket::Three => "3 rooms",
            RoomBucket::FourPlus => "4+ rooms",
        }
    }
}

// ---------------------------------------------------------------------------
// DistrictColumns – checked column references for one district
// ---------------------------------------------------------------------------

/// The columns of one district, verified to exist in a specific table.
///
/// PPSM and NOS are required. Room buckets are optional: older exports only
/// carry the district totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictColumns {
    pub district: DistrictKey,
    pub ppsm: String,
    pub nos: String,
    pub rooms: Vec<(RoomBucket, String)>,
}

impl DistrictColumns {
    pub fn resolve(table: &TimeSeriesTable, district: DistrictKey) -> Result<Self, AggregateError> {
        let ppsm = district.ppsm_column();
        let nos = district.nos_column();
        for col in [&ppsm, &nos] {
            if !table.has_column(col) {
                return Err(AggregateError::InvalidColumn(col.clone()));
            }
        }

        let rooms = RoomBucket::ALL
            .into_iter()
            .map(|bucket| (bucket, district.room_column(bucket)))
            .filter(|(_, col)| table.has_column(col))
            .collect();

        Ok(DistrictColumns {
            district,
            ppsm,
            nos,
            rooms,
        })
    }

    /// Room bucket column names, in bucket order.
    pub fn room_columns(&self) -> Vec<String> {
        self.rooms.iter().map(|(_, col)| col.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_abbreviation_and_name() {
        assert_eq!("HY".parse::<DistrictKey>(), Ok(DistrictKey::Hyllie));
        assert_eq!("rgh".parse::<DistrictKey>(), Ok(DistrictKey::RosengardHusie));
        assert_eq!(
            "Södra Innerstaden".parse::<DistrictKey>(),
            Ok(DistrictKey::SodraInnerstaden)
        );
        assert_eq!(
            "Lund".parse::<DistrictKey>(),
            Err(UnknownDistrict("Lund".to_string()))
        );
    }

    #[test]
    fn column_names_follow_prefix_convention() {
        let d = DistrictKey::VastraInnerstaden;
        assert_eq!(d.ppsm_column(), "VI_PPSM");
        assert_eq!(d.nos_column(), "VI_NOS");
        assert_eq!(d.room_column(RoomBucket::FourPlus), "VI_PPSM4PR");
    }

    #[test]
    fn resolve_requires_ppsm_and_nos() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let table = TimeSeriesTable::from_columns(
            vec![date],
            [("C_PPSM", vec![1.0]), ("C_PPSM2R", vec![2.0])],
        )
        .unwrap();

        assert_eq!(
            DistrictColumns::resolve(&table, DistrictKey::Centrum),
            Err(AggregateError::InvalidColumn("C_NOS".into()))
        );
        assert_eq!(
            DistrictColumns::resolve(&table, DistrictKey::Hyllie),
            Err(AggregateError::InvalidColumn("HY_PPSM".into()))
        );
    }

    #[test]
    fn resolve_keeps_present_room_buckets() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let table = TimeSeriesTable::from_columns(
            vec![date],
            [
                ("KB_PPSM", vec![1.0]),
                ("KB_NOS", vec![1.0]),
                ("KB_PPSM1R", vec![1.0]),
                ("KB_PPSM3R", vec![1.0]),
            ],
        )
        .unwrap();

        let cols = DistrictColumns::resolve(&table, DistrictKey::Kirseberg).unwrap();
        assert_eq!(cols.room_columns(), vec!["KB_PPSM1R", "KB_PPSM3R"]);
    }
}
