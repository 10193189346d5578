use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use taxcheck_recon::{
    build_report, run, AuthorityReply, CancelToken, LookupOutcome, NameAuthority, ReconConfig, Throttle,
    MIN_LOOKUP_DELAY,
};

/// In-memory authority: canned replies per search key, everything else
/// answers with an empty candidate list.
#[derive(Default)]
struct FakeAuthority {
    replies: HashMap<String, Result<AuthorityReply, String>>,
    calls: RefCell<Vec<String>>,
}

impl FakeAuthority {
    fn reply(mut self, key: &str, status: u16, body: &str) -> Self {
        self.replies.insert(key.into(), Ok(AuthorityReply::new(status, body)));
        self
    }

    fn fail(mut self, key: &str, detail: &str) -> Self {
        self.replies.insert(key.into(), Err(detail.into()));
        self
    }
}

impl NameAuthority for FakeAuthority {
    fn search(&self, key: &str) -> Result<AuthorityReply, String> {
        self.calls.borrow_mut().push(key.to_string());
        self.replies
            .get(key)
            .cloned()
            .unwrap_or_else(|| Ok(AuthorityReply::new(200, r#"{"scientificNames":[]}"#)))
    }
}

fn matched(name: &str) -> String {
    format!(r#"{{"scientificNames":[{{"combinedName":"{name}","tsn":"1"}}]}}"#)
}

fn recording_throttle() -> (Throttle, Rc<RefCell<Vec<Duration>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let throttle = Throttle::with_sleeper(MIN_LOOKUP_DELAY, move |d| sink.borrow_mut().push(d));
    (throttle, log)
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn fauna_scenario_one_result_per_original_spelling() {
    let authority = FakeAuthority::default().reply("Puma concolor", 200, &matched("Puma concolor"));
    let (mut throttle, _) = recording_throttle();

    let names = ["Puma concolor", "Puma concolor sp.", "Zzznotaspecies", "Puma concolor"];
    let out = run(&authority, names, &ReconConfig::default(), &mut throttle, &CancelToken::new());

    let originals: Vec<&str> = out.results.iter().map(|r| r.original_name.as_str()).collect();
    assert_eq!(originals, vec!["Puma concolor", "Puma concolor sp.", "Zzznotaspecies"]);

    assert_eq!(out.results[0].outcome, LookupOutcome::Matched("Puma concolor".into()));
    assert_eq!(out.results[1].outcome, LookupOutcome::Matched("Puma concolor".into()));
    assert_eq!(out.results[2].outcome, LookupOutcome::NotFound);
    assert_eq!(out.results[2].matched_name, None);

    // Both spellings searched under the same normalized key
    assert_eq!(
        *authority.calls.borrow(),
        vec!["Puma concolor", "Puma concolor", "Zzznotaspecies"]
    );
}

#[test]
fn protocol_error_does_not_stop_batch() {
    let authority = FakeAuthority::default()
        .reply("Tapirus terrestris", 503, "Service Unavailable")
        .reply("Vultur gryphus", 200, &matched("Vultur gryphus"));
    let (mut throttle, _) = recording_throttle();

    let out = run(
        &authority,
        ["Tapirus terrestris", "Vultur gryphus"],
        &ReconConfig::default(),
        &mut throttle,
        &CancelToken::new(),
    );

    assert_eq!(out.results[0].outcome, LookupOutcome::ProtocolError(503));
    assert_eq!(out.results[1].outcome, LookupOutcome::Matched("Vultur gryphus".into()));
}

#[test]
fn invalid_body_does_not_stop_batch() {
    let authority = FakeAuthority::default()
        .reply("Cedrela odorata", 200, "not json")
        .reply("Swietenia macrophylla", 200, &matched("Swietenia macrophylla"));
    let (mut throttle, _) = recording_throttle();

    let out = run(
        &authority,
        ["Cedrela odorata", "Swietenia macrophylla"],
        &ReconConfig::default(),
        &mut throttle,
        &CancelToken::new(),
    );

    assert!(matches!(out.results[0].outcome, LookupOutcome::InvalidResponse(_)));
    assert!(out.results[1].outcome.is_matched());
}

#[test]
fn transport_error_is_recorded() {
    let authority = FakeAuthority::default().fail("Puma concolor", "operation timed out");
    let (mut throttle, _) = recording_throttle();

    let out = run(&authority, ["Puma concolor sp.", "Zzznotaspecies"], &ReconConfig::default(), &mut throttle, &CancelToken::new());

    assert_eq!(out.results[0].outcome, LookupOutcome::TransportError("operation timed out".into()));
    assert_eq!(out.results[1].outcome, LookupOutcome::NotFound);
}

// -------------------------------------------------------------------------
// Pacing + cancellation
// -------------------------------------------------------------------------

#[test]
fn pause_follows_every_lookup_whatever_the_outcome() {
    let authority = FakeAuthority::default()
        .reply("a", 200, &matched("a"))
        .reply("b", 500, "")
        .reply("c", 200, "<html>")
        .fail("d", "connection reset");
    let (mut throttle, slept) = recording_throttle();

    let out = run(&authority, ["a", "b", "c", "d", "e"], &ReconConfig::default(), &mut throttle, &CancelToken::new());

    assert_eq!(out.results.len(), 5);
    let slept = slept.borrow();
    assert_eq!(slept.len(), 5);
    assert!(slept.iter().all(|d| *d >= Duration::from_millis(500)));
}

#[test]
fn cancel_between_lookups_keeps_partial_results() {
    struct CancellingAuthority {
        token: CancelToken,
        calls: RefCell<usize>,
    }

    impl NameAuthority for CancellingAuthority {
        fn search(&self, _key: &str) -> Result<AuthorityReply, String> {
            *self.calls.borrow_mut() += 1;
            if *self.calls.borrow() == 2 {
                self.token.cancel();
            }
            Ok(AuthorityReply::new(200, r#"{"scientificNames":[{"combinedName":"x"}]}"#))
        }
    }

    let token = CancelToken::new();
    let authority = CancellingAuthority {
        token: token.clone(),
        calls: RefCell::new(0),
    };
    let (mut throttle, _) = recording_throttle();
    let config = ReconConfig::default();

    let out = run(&authority, ["a", "b", "c", "d"], &config, &mut throttle, &token);

    assert!(out.cancelled);
    assert_eq!(out.results.len(), 2);
    assert_eq!(*authority.calls.borrow(), 2);

    let report = build_report(&config, out);
    assert!(report.meta.cancelled);
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.match_percentage, 100.0);
}

#[test]
fn empty_input_makes_empty_report() {
    let authority = FakeAuthority::default();
    let (mut throttle, slept) = recording_throttle();
    let config = ReconConfig::default();

    let out = run(&authority, Vec::<String>::new(), &config, &mut throttle, &CancelToken::new());
    let report = build_report(&config, out);

    assert_eq!(report.summary.total, 0);
    assert_eq!(report.summary.match_percentage, 0.0);
    assert!(slept.borrow().is_empty());
}

#[test]
fn report_serializes_for_export() {
    let authority = FakeAuthority::default().reply("Puma concolor", 200, &matched("Puma concolor"));
    let (mut throttle, _) = recording_throttle();
    let config = ReconConfig::default();

    let out = run(&authority, ["Puma concolor", "Zzznotaspecies"], &config, &mut throttle, &CancelToken::new());
    let json = serde_json::to_value(build_report(&config, out)).unwrap();

    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["matched_count"], 1);
    assert_eq!(json["results"][0]["original_name"], "Puma concolor");
    assert_eq!(json["results"][0]["matched_name"], "Puma concolor");
    assert_eq!(json["results"][1]["outcome"]["kind"], "not_found");
    assert!(json["results"][1]["matched_name"].is_null());
}
