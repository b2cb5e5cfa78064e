use chrono::NaiveDate;
use legis_core::{
    bill_type, clean_id, split_name_list, ActionClassifier, Bill, BillAction, Chamber,
    CommitteeTable, Record, SponsorType, TextNormalizer, VoteEvent, VoteResult, VoteTally,
    VoteValue,
};
use scrape_logging::{scrape_debug, scrape_info, scrape_warn};
use scraper::ElementRef;

use super::Scraper;
use crate::page::{cells, element_text, own_texts, selector};
use crate::{Page, RecordSink, ScrapeContext, ScrapeError, ScrapeReport};

const DEFAULT_BASE_URL: &str = "http://leginfo.legislature.ca.gov";

// Lead authors and coauthors are separate fields on the status page.
const AUTHOR_FIELDS: &[(&str, &str)] = &[
    ("span#leadAuthors", "LEAD_AUTHOR"),
    ("span#principalCoAuthors", "PRINCIPAL_COAUTHOR"),
    ("span#coAuthors", "COAUTHOR"),
];

const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// California bills from leginfo: search results, then one status page per bill.
pub struct CaliforniaBillScraper {
    session: String,
    base_url: String,
    committees: CommitteeTable,
    classifier: ActionClassifier,
}

impl CaliforniaBillScraper {
    pub const DEFAULT_SESSION: &'static str = "20192020";

    pub fn new(session: &str) -> Self {
        Self {
            session: session.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            committees: CommitteeTable::california(),
            classifier: ActionClassifier::california(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/faces/billSearchClient.xhtml?session_year={}&house=Both&author=All&lawCode=All",
            self.base_url, self.session
        )
    }

    async fn scrape_bill(
        &self,
        ctx: &ScrapeContext,
        url: &str,
    ) -> Result<Option<Vec<Record>>, ScrapeError> {
        let Some(page) = ctx.get_page(url).await? else {
            return Ok(None);
        };
        self.parse_bill(&page, ctx.normalizer()).map(Some)
    }

    pub(crate) fn parse_bill(
        &self,
        page: &Page,
        normalizer: &TextNormalizer,
    ) -> Result<Vec<Record>, ScrapeError> {
        let identifier = clean_id(&page.require_text("span#measureNum")?);
        let (chamber, kind) = bill_type(&identifier).ok_or_else(|| {
            ScrapeError::malformed(page.url(), format!("a known bill prefix in {identifier:?}"))
        })?;

        let title = page
            .select("div#bill_title h2")?
            .into_iter()
            .next()
            .and_then(|h2| own_texts(h2).pop())
            .ok_or_else(|| ScrapeError::malformed(page.url(), "div#bill_title h2 text"))?;

        let mut bill = Bill::new(
            &identifier,
            &self.session,
            chamber,
            kind,
            &normalizer.normalize(&title),
        );
        bill.add_source(page.url());

        for (css, code) in AUTHOR_FIELDS {
            let Some(role) = SponsorType::from_code(code) else {
                continue;
            };
            if let Some(names) = page.first_text(css)? {
                for name in split_name_list(&names) {
                    bill.add_sponsorship(&normalizer.normalize(name), role);
                }
            }
        }

        self.parse_history(page, normalizer, &mut bill)?;

        let mut votes = Vec::new();
        for block in page.select("div.vote")? {
            match self.parse_vote(block, &bill, normalizer)? {
                Some(mut vote) => {
                    vote.add_source(page.url());
                    votes.push(Record::VoteEvent(vote));
                }
                None => scrape_debug!("{}: vote block without a date", identifier),
            }
        }

        let mut records = Vec::with_capacity(1 + votes.len());
        records.push(Record::Bill(bill));
        records.extend(votes);
        Ok(records)
    }

    fn parse_history(
        &self,
        page: &Page,
        normalizer: &TextNormalizer,
        bill: &mut Bill,
    ) -> Result<(), ScrapeError> {
        // History rows don't name the chamber; follow the "In Senate."/"In Assembly." markers.
        let mut current = bill.chamber;
        for row in page.select("table#billhistory tbody tr")? {
            let tds = cells(row, "td")?;
            if tds.len() < 2 {
                continue;
            }
            let Some(date) = parse_date(&tds[0]) else {
                scrape_debug!("{}: unparseable action date {:?}", bill.identifier, tds[0]);
                continue;
            };
            let description = normalizer.normalize(&tds[1]);
            if description.contains("In Senate.") {
                current = Chamber::Upper;
            } else if description.contains("In Assembly.") {
                current = Chamber::Lower;
            }

            let analysis = self
                .classifier
                .analyze(current, &description, &self.committees);
            for mention in self.committees.find_abbreviations(&description) {
                if let Err(miss) = self.committees.resolve(current, mention) {
                    scrape_debug!("{}: {}", bill.identifier, miss);
                }
            }
            bill.add_action(BillAction {
                description,
                date,
                chamber: current,
                classification: analysis.classification,
                committees: analysis.committees,
            });
        }
        Ok(())
    }

    fn parse_vote(
        &self,
        block: ElementRef<'_>,
        bill: &Bill,
        normalizer: &TextNormalizer,
    ) -> Result<Option<VoteEvent>, ScrapeError> {
        let Some(date) = text_in(block, "span.date")?.as_deref().and_then(parse_date) else {
            return Ok(None);
        };
        let location = text_in(block, "span.location")?.unwrap_or_default();
        let motion = text_in(block, "span.motion")?
            .map(|m| normalizer.normalize(&m))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| location.clone());
        let result_text = text_in(block, "span.result")?.unwrap_or_default();

        let chamber = if location.starts_with("Sen") {
            Chamber::Upper
        } else if location.starts_with("Asm") {
            Chamber::Lower
        } else {
            bill.chamber
        };

        let mut tally = VoteTally::new();
        let row_selector = selector("tr")?;
        for row in block.select(&row_selector) {
            let Some(label) = text_in(row, "th")? else {
                continue;
            };
            let Some(value) = VoteValue::from_label(&label) else {
                scrape_debug!("{}: unknown vote label {:?}", bill.identifier, label);
                continue;
            };
            if let Some(count) = text_in(row, "td.count")?.and_then(|c| c.parse::<u32>().ok()) {
                tally.set_count(value, count);
            }
            if let Some(names) = text_in(row, "td.names")? {
                tally.record(&names, value);
            }
        }
        if !tally.is_consistent() {
            scrape_warn!(
                "{} {}: reported counts disagree with listed names",
                bill.identifier,
                motion
            );
        }

        let result = VoteResult::resolve(&result_text, &tally);
        Ok(Some(VoteEvent::from_tally(
            bill, chamber, &location, &motion, date, result, &tally,
        )))
    }
}

#[async_trait::async_trait(?Send)]
impl Scraper for CaliforniaBillScraper {
    fn name(&self) -> &str {
        "ca-bills"
    }

    async fn scrape(
        &self,
        ctx: &ScrapeContext,
        sink: &mut dyn RecordSink,
    ) -> Result<ScrapeReport, ScrapeError> {
        let url = self.search_url();
        let html = ctx.get_required_html(&url).await?;
        let links =
            Page::parse(&url, &html).links("table#bill_results tbody tr td:first-child a")?;
        if links.is_empty() {
            return Err(ScrapeError::EmptyScrape(format!(
                "no bills listed for session {}",
                self.session
            )));
        }
        scrape_info!("{} bills listed for session {}", links.len(), self.session);

        let mut report = ScrapeReport::default();
        for link in links {
            // Search results link to the bill text; the status page carries the metadata.
            let status_url = link.replace("billNavClient", "billStatusClient");
            match self.scrape_bill(ctx, &status_url).await {
                Ok(Some(records)) => {
                    for record in records {
                        sink.emit(record)?;
                        report.record_emitted();
                    }
                }
                Ok(None) => report.record_skipped(),
                Err(err) if err.is_page_local() => {
                    scrape_warn!("Skipping {}: {}", status_url, err);
                    report.record_skipped();
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }
}

fn text_in(element: ElementRef<'_>, css: &str) -> Result<Option<String>, ScrapeError> {
    let selector = selector(css)?;
    Ok(element
        .select(&selector)
        .map(element_text)
        .find(|text| !text.is_empty()))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use legis_core::{Record, TextNormalizer, VoteResult, VoteValue};

    use super::{parse_date, CaliforniaBillScraper};
    use crate::Page;

    const STATUS_PAGE: &str = r#"
    <html><body>
      <span id="measureNum">AB-1234</span>
      <div id="bill_title"><h2><span>AB-1234</span> C&#xC3;&#xA9;sar Ch&#xC3;&#xA1;vez Day.</h2></div>
      <span id="leadAuthors">Garcia</span>
      <span id="coAuthors">Lee, Kim, </span>
      <table id="billhistory"><tbody>
        <tr><td>02/14/19</td><td>Introduced. Read first time. To print.</td></tr>
        <tr><td>03/04/19</td><td>Referred to Coms. on ED. and APPR.</td></tr>
        <tr><td>05/20/19</td><td>In Senate. Read first time. To Com. on RLS. for assignment.</td></tr>
        <tr><td>bad</td><td>ignored</td></tr>
      </tbody></table>
      <div class="vote">
        <span class="date">05/16/19</span>
        <span class="location">Asm. Floor</span>
        <span class="motion">AB 1234 Garcia Assembly Third Reading</span>
        <span class="result">(PASS)</span>
        <table>
          <tr><th>Ayes</th><td class="count">2</td><td class="names">Allen, Bates</td></tr>
          <tr><th>Noes</th><td class="count">0</td><td class="names">-</td></tr>
          <tr><th>NVR</th><td class="count">1</td><td class="names">Chen</td></tr>
        </table>
      </div>
    </body></html>
    "#;

    #[test]
    fn status_page_yields_bill_and_vote() {
        let scraper = CaliforniaBillScraper::new("20192020");
        let page = Page::parse("http://example.gov/billStatusClient.xhtml?bill_id=1", STATUS_PAGE);
        let records = scraper.parse_bill(&page, &TextNormalizer::new()).unwrap();
        assert_eq!(records.len(), 2);

        let Record::Bill(bill) = &records[0] else {
            panic!("expected bill first");
        };
        assert_eq!(bill.identifier, "AB 1234");
        assert_eq!(bill.title, "C\u{e9}sar Ch\u{e1}vez Day.");
        let sponsors: Vec<_> = bill
            .sponsorships
            .iter()
            .map(|s| (s.name.as_str(), s.primary))
            .collect();
        assert_eq!(sponsors, vec![("Garcia", true), ("Lee", false), ("Kim", false)]);

        assert_eq!(bill.actions.len(), 3);
        assert!(bill.actions[0].classification.contains("introduction"));
        assert_eq!(
            bill.actions[1].committees,
            vec![
                "Standing Committee on Education".to_string(),
                "Standing Committee on Appropriations".to_string(),
            ]
        );
        assert_eq!(bill.actions[1].chamber, legis_core::Chamber::Lower);
        assert_eq!(bill.actions[2].chamber, legis_core::Chamber::Upper);
        assert_eq!(
            bill.actions[2].committees,
            vec!["Standing Committee on Rules".to_string()]
        );

        let Record::VoteEvent(vote) = &records[1] else {
            panic!("expected vote second");
        };
        assert_eq!(vote.result, VoteResult::Pass);
        assert_eq!(vote.counts.yes, 2);
        assert_eq!(vote.counts.no, 0);
        assert_eq!(vote.counts.other, 1);
        assert!(vote
            .votes
            .iter()
            .any(|v| v.voter_name == "Chen" && v.option == VoteValue::Other));
    }

    #[test]
    fn unknown_prefix_is_malformed() {
        let scraper = CaliforniaBillScraper::new("20192020");
        let page = Page::parse(
            "http://example.gov/x",
            r#"<span id="measureNum">XY-1</span><div id="bill_title"><h2>t</h2></div>"#,
        );
        let err = scraper.parse_bill(&page, &TextNormalizer::new()).unwrap_err();
        assert!(err.is_page_local());
    }

    #[test]
    fn dates_accept_short_and_long_years() {
        assert_eq!(parse_date("02/14/19"), chrono::NaiveDate::from_ymd_opt(2019, 2, 14));
        assert_eq!(parse_date("02/14/2019"), chrono::NaiveDate::from_ymd_opt(2019, 2, 14));
        assert_eq!(parse_date("soon"), None);
    }
}
