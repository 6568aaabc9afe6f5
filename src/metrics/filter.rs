use chrono::{Duration, NaiveDate};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::campaign::{Campaign, CampaignStatus, Channel};
use crate::error::Error;

/// Either every value, or exactly one. Written as `ALL` or as the value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value == Some(expected),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Selection<T> {
        Selection::All
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Selection::All => serializer.serialize_str("ALL"),
            Selection::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Selection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }

        T::deserialize(s.as_str().into_deserializer()).map(Selection::Only)
    }
}

/// Inclusive range of calendar days.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<DateRange, Error> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }

        Ok(DateRange { from, to })
    }

    pub fn single_day(day: NaiveDate) -> DateRange {
        DateRange { from: day, to: day }
    }

    /// The `days` days before `today`, up to and including `today`.
    pub fn trailing(days: i64, today: NaiveDate) -> DateRange {
        DateRange {
            from: today - Duration::days(days),
            to: today,
        }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Whether `[start, end]` shares at least one day with the range. A
    /// missing bound is open-ended.
    pub fn overlaps(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        let starts_in_time = start.map_or(true, |start| start <= self.to);
        let ends_in_time = end.map_or(true, |end| end >= self.from);

        starts_in_time && ends_in_time
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum DatePreset {
    #[serde(rename = "TODAY")]
    Today,
    #[serde(rename = "LAST-7-DAYS")]
    Last7Days,
    #[serde(rename = "LAST-30-DAYS")]
    Last30Days,
    #[serde(rename = "LAST-90-DAYS")]
    Last90Days,
    #[serde(rename = "THIS-YEAR")]
    ThisYear,
}

impl DatePreset {
    pub fn days(self) -> i64 {
        match self {
            DatePreset::Today => 0,
            DatePreset::Last7Days => 7,
            DatePreset::Last30Days => 30,
            DatePreset::Last90Days => 90,
            DatePreset::ThisYear => 365,
        }
    }

    pub fn range(self, today: NaiveDate) -> DateRange {
        DateRange::trailing(self.days(), today)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CampaignFilter {
    pub status: Selection<CampaignStatus>,
    pub channel: Selection<Channel>,
    pub date_range: Option<DateRange>,
    pub search: Option<String>,
}

impl CampaignFilter {
    pub fn matches(&self, campaign: &Campaign) -> bool {
        if !self.status.admits(Some(&campaign.status)) {
            return false;
        }

        if !self.channel.admits(campaign.channel.as_ref()) {
            return false;
        }

        if let Some(range) = &self.date_range {
            if !range.overlaps(campaign.start_date, campaign.end_date) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !campaign.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        true
    }

    /// How many of the filter panel's controls are set. The search box is not
    /// one of them.
    pub fn active_count(&self) -> usize {
        let flags = [
            self.date_range.is_some(),
            !self.status.is_all(),
            !self.channel.is_all(),
        ];

        flags.iter().filter(|active| **active).count()
    }
}

pub fn filter_campaigns<'a, I>(campaigns: I, filter: &CampaignFilter) -> Vec<&'a Campaign>
where
    I: IntoIterator<Item = &'a Campaign>,
{
    campaigns
        .into_iter()
        .filter(|campaign| filter.matches(campaign))
        .collect()
}

/// Filter controls as they arrive in a query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub status: Selection<CampaignStatus>,
    #[serde(default)]
    pub channel: Selection<Channel>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub preset: Option<DatePreset>,
    pub search: Option<String>,
}

impl FilterQuery {
    /// An explicit `from` wins over a preset; `to` without `from` is ignored.
    pub fn into_filter(self, today: NaiveDate) -> Result<CampaignFilter, Error> {
        let date_range = match (self.from, self.to, self.preset) {
            (Some(from), Some(to), _) => Some(DateRange::new(from, to)?),
            (Some(from), None, _) => Some(DateRange::single_day(from)),
            (None, _, Some(preset)) => Some(preset.range(today)),
            (None, _, None) => None,
        };

        let search = self.search.filter(|search| !search.trim().is_empty());

        Ok(CampaignFilter {
            status: self.status,
            channel: self.channel,
            date_range,
            search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignDraft, CampaignId};
    use crate::seed;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(name: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Campaign {
        CampaignDraft {
            name: name.into(),
            budget: 100,
            start_date: start,
            end_date: end,
            ..CampaignDraft::default()
        }
        .into_campaign(CampaignId::new(), Utc::now())
    }

    #[test]
    fn default_filter_is_identity() {
        let campaigns = seed::campaigns();

        let filtered = filter_campaigns(&campaigns, &CampaignFilter::default());

        assert_eq!(filtered.len(), campaigns.len());
        assert!(filtered.iter().zip(&campaigns).all(|(a, b)| *a == b));
    }

    #[test]
    fn status_filter_is_exact() {
        let campaigns = seed::campaigns();
        let filter = CampaignFilter {
            status: Selection::Only(CampaignStatus::Paused),
            ..CampaignFilter::default()
        };

        let filtered = filter_campaigns(&campaigns, &filter);

        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|campaign| campaign.status == CampaignStatus::Paused));
    }

    #[test]
    fn channel_filter_skips_campaigns_without_channel() {
        let mut with_channel = dated("Search", None, None);
        with_channel.channel = Some(Channel::Search);
        let without_channel = dated("Unassigned", None, None);
        let campaigns = vec![with_channel, without_channel];
        let filter = CampaignFilter {
            channel: Selection::Only(Channel::Search),
            ..CampaignFilter::default()
        };

        let filtered = filter_campaigns(&campaigns, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Search");
    }

    #[test]
    fn date_range_keeps_overlapping_campaigns() {
        let campaigns = vec![
            dated("January", Some(date(2024, 1, 1)), Some(date(2024, 1, 31))),
            dated("Straddles", Some(date(2024, 1, 20)), Some(date(2024, 2, 20))),
            dated("March", Some(date(2024, 3, 1)), Some(date(2024, 3, 31))),
            dated("Open ended", Some(date(2023, 6, 1)), None),
        ];
        let filter = CampaignFilter {
            date_range: Some(DateRange::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap()),
            ..CampaignFilter::default()
        };

        let names: Vec<_> = filter_campaigns(&campaigns, &filter)
            .into_iter()
            .map(|campaign| campaign.name.as_str())
            .collect();

        assert_eq!(names, ["Straddles", "Open ended"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let campaigns = seed::campaigns();
        let filter = CampaignFilter {
            search: Some("  campaign".into()),
            ..CampaignFilter::default()
        };

        let filtered = filter_campaigns(&campaigns, &filter);

        assert!(filtered
            .iter()
            .all(|campaign| campaign.name.to_lowercase().contains("campaign")));
        assert!(filtered.len() < campaigns.len());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = DateRange::new(date(2024, 3, 1), date(2024, 2, 1));

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidDateRange {
                from: date(2024, 3, 1),
                to: date(2024, 2, 1),
            }
        );
    }

    #[test]
    fn presets_end_today() {
        let today = date(2024, 3, 10);

        let week = DatePreset::Last7Days.range(today);
        let day = DatePreset::Today.range(today);

        assert_eq!(week.from(), date(2024, 3, 3));
        assert_eq!(week.to(), today);
        assert_eq!(day, DateRange::single_day(today));
    }

    #[test]
    fn active_count_ignores_wildcards_and_search() {
        let none = CampaignFilter {
            search: Some("x".into()),
            ..CampaignFilter::default()
        };
        let all = CampaignFilter {
            status: Selection::Only(CampaignStatus::Active),
            channel: Selection::Only(Channel::Email),
            date_range: Some(DateRange::single_day(date(2024, 1, 1))),
            search: None,
        };

        assert_eq!(none.active_count(), 0);
        assert_eq!(all.active_count(), 3);
    }

    #[test]
    fn query_prefers_explicit_dates_over_preset() {
        let today = date(2024, 3, 10);
        let query = FilterQuery {
            from: Some(date(2024, 1, 1)),
            preset: Some(DatePreset::ThisYear),
            ..FilterQuery::default()
        };

        let filter = query.into_filter(today).unwrap();

        assert_eq!(
            filter.date_range,
            Some(DateRange::single_day(date(2024, 1, 1)))
        );
    }

    #[test]
    fn selection_reads_all_or_a_value() {
        let all: Selection<CampaignStatus> = serde_json::from_str("\"all\"").unwrap();
        let paused: Selection<CampaignStatus> = serde_json::from_str("\"PAUSED\"").unwrap();
        let bogus = serde_json::from_str::<Selection<CampaignStatus>>("\"SLEEPING\"");

        assert_eq!(all, Selection::All);
        assert_eq!(paused, Selection::Only(CampaignStatus::Paused));
        assert!(bogus.is_err());
    }
}
