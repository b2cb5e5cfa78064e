use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use legis_core::{collapse_whitespace, format_bill_id, Chamber, Event, Record};
use regex::Regex;
use scrape_logging::{scrape_info, scrape_warn};

use super::Scraper;
use crate::page::{cells, own_texts, selector};
use crate::{Page, RecordSink, ScrapeContext, ScrapeError, ScrapeReport};

const DEFAULT_BASE_URL: &str = "https://www.ilga.gov";
const TIMEZONE: &str = "America/Chicago";
const DATE_FORMAT: &str = "%b %d, %Y %I:%M %p";
const NO_HEARINGS: &str = "No hearings currently scheduled";
const COMMITTEE_SUFFIX: &str = " Committee";

/// Illinois committee hearings, from each chamber's weekly schedule.
pub struct IllinoisEventScraper {
    base_url: String,
    heading_prefix: Regex,
    meridiem: Regex,
}

impl IllinoisEventScraper {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            heading_prefix: Regex::new(r"(?i)^(hearing notice for )?(senate )?(house )?(.*)$")
                .expect("static heading pattern"),
            meridiem: Regex::new(r"(?i)\s*([AP]M)$").expect("static meridiem pattern"),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn schedule_url(&self, chamber: Chamber) -> String {
        let path = match chamber {
            Chamber::Upper => "senate",
            Chamber::Lower => "house",
        };
        format!("{}/{path}/schedules/weeklyhearings.asp", self.base_url)
    }

    fn chamber_name(chamber: Chamber) -> &'static str {
        match chamber {
            Chamber::Upper => "Senate",
            Chamber::Lower => "House",
        }
    }

    /// `"Hearing Notice for Senate Appropriations Committee"` -> `"Appropriations Committee"`.
    pub fn committee_name(&self, heading: &str) -> String {
        let heading = collapse_whitespace(heading);
        self.heading_prefix
            .captures(&heading)
            .and_then(|caps| caps.get(4))
            .map(|m| m.as_str().to_string())
            .unwrap_or(heading)
    }

    /// Drops the committee suffix and spaces out hyphens:
    /// `"Senate Approp-Education Committee"` -> `"Senate Approp - Education"`.
    pub fn describe(chamber_name: &str, committee: &str) -> String {
        let description = format!("{chamber_name} {committee}");
        let description = description
            .strip_suffix(COMMITTEE_SUFFIX)
            .unwrap_or(&description);
        if description.contains('-') {
            description
                .split('-')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" - ")
        } else {
            description.to_string()
        }
    }

    /// `"Mar  3, 2020  2:00PM"` -> 2020-03-03 14:00, local Chicago time.
    pub fn parse_start(&self, raw: &str) -> Option<NaiveDateTime> {
        let collapsed = collapse_whitespace(raw);
        let spaced = self.meridiem.replace(&collapsed, " $1");
        NaiveDateTime::parse_from_str(&spaced, DATE_FORMAT).ok()
    }

    pub(crate) fn parse_hearing(
        &self,
        page: &Page,
        chamber: Chamber,
    ) -> Result<Event, ScrapeError> {
        let committee = self.committee_name(&page.require_text("span.heading")?);

        let tables = page.select("table[cellpadding='3']")?;
        let Some(info) = tables.first() else {
            return Err(ScrapeError::malformed(page.url(), "hearing data table"));
        };

        let mut meta = HashMap::new();
        for row in info.select(&selector("tr")?) {
            let tds = cells(row, "td")?;
            if let [key, value, ..] = tds.as_slice() {
                meta.insert(key.clone(), value.clone());
            }
        }
        let location = meta
            .get("Location:")
            .ok_or_else(|| ScrapeError::malformed(page.url(), "Location:"))?;
        let raw_date = meta
            .get("Scheduled Date:")
            .ok_or_else(|| ScrapeError::malformed(page.url(), "Scheduled Date:"))?;
        let start = self.parse_start(raw_date).ok_or_else(|| {
            ScrapeError::malformed(page.url(), format!("a scheduled date, got {raw_date:?}"))
        })?;

        let description = Self::describe(Self::chamber_name(chamber), &committee);
        let mut event = Event::new(&description, start, TIMEZONE, location);
        event.dedupe_key = Some(format!("{description}#{location}#{start}"));
        event.add_source(page.url());
        event.add_participant(&committee, "organization");

        if let Some(bills) = tables.get(1) {
            for row in bills.select(&selector("tr")?).skip(1) {
                let tds = cells(row, "td")?;
                if tds.len() < 4 {
                    continue;
                }
                match format_bill_id(&tds[0]) {
                    Ok(bill_id) => event.add_agenda_item(&bill_id).add_bill(&bill_id),
                    Err(err) => scrape_warn!("{}: {}", page.url(), err),
                }
            }
        }
        Ok(event)
    }

    fn has_no_hearings(page: &Page) -> Result<bool, ScrapeError> {
        Ok(page
            .select("div")?
            .into_iter()
            .any(|div| own_texts(div).iter().any(|t| t.contains(NO_HEARINGS))))
    }
}

impl Default for IllinoisEventScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait(?Send)]
impl Scraper for IllinoisEventScraper {
    fn name(&self) -> &str {
        "il-events"
    }

    async fn scrape(
        &self,
        ctx: &ScrapeContext,
        sink: &mut dyn RecordSink,
    ) -> Result<ScrapeReport, ScrapeError> {
        let mut report = ScrapeReport::default();
        let mut no_scheduled = 0;
        let mut seen = HashSet::new();

        for chamber in Chamber::BOTH {
            let url = self.schedule_url(chamber);
            let html = ctx.get_required_html(&url).await?;
            let links = {
                let page = Page::parse(&url, &html);
                if Self::has_no_hearings(&page)? {
                    scrape_info!("No hearings in {}", chamber);
                    no_scheduled += 1;
                    continue;
                }
                page.links("table[width='550'] a")?
            };

            for link in links {
                let parsed = match ctx.get_page(&link).await {
                    Ok(Some(page)) => self.parse_hearing(&page, chamber),
                    Ok(None) => {
                        report.record_skipped();
                        continue;
                    }
                    Err(err) => Err(err),
                };
                let event = match parsed {
                    Ok(event) => event,
                    Err(err) if err.is_page_local() => {
                        scrape_warn!("Skipping hearing {}: {}", link, err);
                        report.record_skipped();
                        continue;
                    }
                    Err(err) => return Err(err),
                };

                let key = event.dedupe_key.clone().unwrap_or_default();
                if !seen.insert(key.clone()) {
                    scrape_warn!("Duplicate event {}", key);
                    continue;
                }
                sink.emit(Record::Event(event))?;
                report.record_emitted();
            }
        }

        if no_scheduled == Chamber::BOTH.len() {
            return Err(ScrapeError::EmptyScrape(
                "no hearings scheduled in either chamber".to_string(),
            ));
        }
        Ok(report)
    }
}
