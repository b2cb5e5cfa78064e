use std::cell::RefCell;
use std::sync::Arc;

use chrono::NaiveDate;
use legis_core::{Event, Record};
use legis_engine::{
    FetchSettings, MemorySink, RecordSink, ReqwestFetcher, RetryPolicy, ScrapeContext,
    ScrapeError, ScrapeReport, ScrapeRunner, Scraper,
};

struct OneEvent {
    seen_label: RefCell<Option<String>>,
}

#[async_trait::async_trait(?Send)]
impl Scraper for OneEvent {
    fn name(&self) -> &str {
        "one-event"
    }

    async fn scrape(
        &self,
        _ctx: &ScrapeContext,
        sink: &mut dyn RecordSink,
    ) -> Result<ScrapeReport, ScrapeError> {
        *self.seen_label.borrow_mut() = Some(scrape_logging::current_jurisdiction());
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        sink.emit(Record::Event(Event::new(
            "House Rules",
            start,
            "America/Chicago",
            "Room 118",
        )))?;
        let mut report = ScrapeReport::default();
        report.record_emitted();
        Ok(report)
    }
}

struct AlwaysEmpty;

#[async_trait::async_trait(?Send)]
impl Scraper for AlwaysEmpty {
    fn name(&self) -> &str {
        "always-empty"
    }

    async fn scrape(
        &self,
        _ctx: &ScrapeContext,
        _sink: &mut dyn RecordSink,
    ) -> Result<ScrapeReport, ScrapeError> {
        Err(ScrapeError::EmptyScrape("nothing listed".to_string()))
    }
}

fn runner() -> ScrapeRunner {
    let ctx = ScrapeContext::new(
        Arc::new(ReqwestFetcher::new(FetchSettings::default())),
        RetryPolicy::default(),
    );
    ScrapeRunner::new(ctx).unwrap()
}

#[test]
fn failing_jurisdiction_does_not_stop_the_others() {
    let scrapers: Vec<Box<dyn Scraper>> = vec![
        Box::new(AlwaysEmpty),
        Box::new(OneEvent {
            seen_label: RefCell::new(None),
        }),
    ];
    let mut sink = MemorySink::new();

    let summaries = runner().run_all(&scrapers, &mut sink);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "always-empty");
    assert!(matches!(
        summaries[0].result,
        Err(ScrapeError::EmptyScrape(_))
    ));
    assert_eq!(summaries[1].name, "one-event");
    assert_eq!(summaries[1].result.as_ref().unwrap().emitted, 1);
    assert_eq!(sink.records.len(), 1);
}

#[test]
fn run_labels_logs_with_the_scraper_name() {
    let scraper = OneEvent {
        seen_label: RefCell::new(None),
    };
    let mut sink = MemorySink::new();

    runner().run(&scraper, &mut sink).unwrap();

    assert_eq!(scraper.seen_label.borrow().as_deref(), Some("one-event"));
    assert_eq!(scrape_logging::current_jurisdiction(), "-");
}

#[test]
fn registry_knows_both_jurisdictions() {
    for name in legis_engine::available_jurisdictions() {
        let scraper = legis_engine::scraper_for(name, None).expect("registered");
        assert_eq!(scraper.name(), *name);
    }
    assert!(legis_engine::scraper_for("zz-bills", None).is_none());
}
